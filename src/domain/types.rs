// ==========================================
// Cheptel - Domain type definitions
// ==========================================
// Responsibility: closed enumerations and value objects shared by all layers
// Rule: free-text labels from the outside world are normalized here, once
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// Sex category
// ==========================================
// One normalization point for the historical free-text values
// ("Mâle"/"Femelle"/"Tous", "male"/"female"/"any", single letters).
// Serialization format: SCREAMING_SNAKE_CASE (matches the database)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SexCategory {
    Male,
    Female,
    Any,
}

impl SexCategory {
    /// Normalize a raw label into a category.
    ///
    /// Accepts the French and English spellings found in legacy data,
    /// case-insensitively. Returns `None` for anything else.
    pub fn parse(raw: &str) -> Option<SexCategory> {
        match raw.trim().to_lowercase().as_str() {
            "male" | "mâle" | "m" => Some(SexCategory::Male),
            "female" | "femelle" | "f" => Some(SexCategory::Female),
            "any" | "all" | "tous" | "toutes" | "*" => Some(SexCategory::Any),
            _ => None,
        }
    }

    /// Locale key used by the api layer for display labels.
    pub fn label_key(&self) -> &'static str {
        match self {
            SexCategory::Male => "sex.male",
            SexCategory::Female => "sex.female",
            SexCategory::Any => "sex.any",
        }
    }
}

impl fmt::Display for SexCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SexCategory::Male => write!(f, "MALE"),
            SexCategory::Female => write!(f, "FEMALE"),
            SexCategory::Any => write!(f, "ANY"),
        }
    }
}

// ==========================================
// Age specification
// ==========================================
// User-facing desired age, months + weeks. Convertible to and from a single
// decimal month count using the average month length.

/// Average number of weeks per month, used for months/weeks conversions.
pub const WEEKS_PER_MONTH: f64 = 4.33;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeSpec {
    pub months: u32,
    pub weeks: u32,
}

impl AgeSpec {
    pub fn new(months: u32, weeks: u32) -> Self {
        Self { months, weeks }
    }

    /// Decimal month equivalent: `months + weeks / 4.33`.
    pub fn total_months(&self) -> f64 {
        self.months as f64 + self.weeks as f64 / WEEKS_PER_MONTH
    }

    /// Rebuild a months/weeks pair from a decimal month count.
    ///
    /// # Rules
    /// - `months = floor(total_months)`
    /// - `weeks = round(fractional_part × 4)`
    /// - negative inputs clamp to zero
    pub fn from_total_months(total_months: f64) -> Self {
        let clamped = total_months.max(0.0);
        let months = clamped.floor();
        let weeks = ((clamped - months) * 4.0).round();
        Self {
            months: months as u32,
            weeks: weeks as u32,
        }
    }
}

impl fmt::Display for AgeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}m{}w", self.months, self.weeks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sex_parse_normalizes_legacy_labels() {
        assert_eq!(SexCategory::parse("Mâle"), Some(SexCategory::Male));
        assert_eq!(SexCategory::parse("FEMELLE"), Some(SexCategory::Female));
        assert_eq!(SexCategory::parse("Tous"), Some(SexCategory::Any));
        assert_eq!(SexCategory::parse("male"), Some(SexCategory::Male));
        assert_eq!(SexCategory::parse(" f "), Some(SexCategory::Female));
        assert_eq!(SexCategory::parse("any"), Some(SexCategory::Any));
        assert_eq!(SexCategory::parse("poulet"), None);
        assert_eq!(SexCategory::parse(""), None);
    }

    #[test]
    fn test_age_spec_total_months() {
        let spec = AgeSpec::new(2, 0);
        assert!((spec.total_months() - 2.0).abs() < 1e-9);

        // 2 months 3 weeks -> 2 + 3/4.33
        let spec = AgeSpec::new(2, 3);
        assert!((spec.total_months() - (2.0 + 3.0 / 4.33)).abs() < 1e-9);
    }

    #[test]
    fn test_age_spec_from_total_months() {
        assert_eq!(AgeSpec::from_total_months(2.0), AgeSpec::new(2, 0));
        // 0.96 fractional -> round(3.84) = 4 weeks, left unnormalized
        assert_eq!(AgeSpec::from_total_months(2.96), AgeSpec::new(2, 4));
        assert_eq!(AgeSpec::from_total_months(0.25), AgeSpec::new(0, 1));
        assert_eq!(AgeSpec::from_total_months(-1.5), AgeSpec::new(0, 0));
    }
}
