// ==========================================
// Cheptel - Display labels
// ==========================================
// Responsibility: localized rendering of enums and age decompositions for
// the presentation layer
// Rule: engines return structured values; only this module turns them into
// text
// ==========================================

use crate::domain::types::SexCategory;
use crate::engine::age::AgeBreakdown;
use crate::i18n::{t, t_with_args};

/// Localized sex category label ("Mâle"/"Femelle"/"Tous" in French).
pub fn sex_label(sex: SexCategory) -> String {
    t(sex.label_key())
}

/// Localized "x months, y weeks, z days" phrase for an age delta.
/// Zero components are skipped; a zero delta renders the zero-days form.
pub fn age_breakdown_label(breakdown: &AgeBreakdown) -> String {
    let mut parts: Vec<String> = Vec::new();
    if breakdown.months > 0 {
        parts.push(t_with_args(
            "age.months",
            &[("count", &breakdown.months.to_string())],
        ));
    }
    if breakdown.weeks > 0 {
        parts.push(t_with_args(
            "age.weeks",
            &[("count", &breakdown.weeks.to_string())],
        ));
    }
    if breakdown.days > 0 || parts.is_empty() {
        parts.push(t_with_args(
            "age.days",
            &[("count", &breakdown.days.to_string())],
        ));
    }
    parts.join(" ")
}
