// ==========================================
// Cheptel - Localization module
// ==========================================
// Uses rust-i18n; French (default) and English
// Note: the rust_i18n::i18n! macro is initialized in lib.rs
// ==========================================

/// Current locale code.
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// Switch locale ("fr" or "en").
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(locale);
}

/// Translate a message without arguments.
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// Translate a message with `%{name}` placeholders.
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    let mut result = rust_i18n::t!(key).to_string();
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // rust-i18n keeps the locale in global state and Rust tests run in
    // parallel; serialize the locale-dependent ones
    static LOCALE_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_locale_switch() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("en");
        assert_eq!(current_locale(), "en");
        set_locale("fr");
        assert_eq!(current_locale(), "fr");
    }

    #[test]
    fn test_translation_with_args() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("fr");
        let msg = t_with_args("age.months", &[("count", "3")]);
        assert_eq!(msg, "3 mois");
    }
}
