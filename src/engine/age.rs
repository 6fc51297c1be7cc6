// ==========================================
// Cheptel - Age projection pure functions
// ==========================================
// Responsibility: date <-> age arithmetic used by ranking, pricing and
// collection-date reconciliation
// Rule: stateless, no side effects, no I/O
// ==========================================

use crate::domain::types::AgeSpec;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Average month length in days; all decimal-month math uses this base.
pub const DAYS_PER_MONTH: f64 = 30.44;

// ==========================================
// Age - elapsed time between two dates
// ==========================================
// `days` is signed: a negative value means the cohort has not yet reached
// the target date. `months`/`weeks` are display components and never go
// negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Age {
    pub days: i64,
    pub months: u32,
    pub weeks: u32,
}

impl Age {
    /// Decimal month equivalent (`days / 30.44`), kept signed and unrounded
    /// for precision-sensitive comparisons.
    pub fn months_equivalent(&self) -> f64 {
        self.days as f64 / DAYS_PER_MONTH
    }
}

// ==========================================
// AgeBreakdown - months/weeks/days view of a decimal month count
// ==========================================
// Display decomposition of a non-negative month quantity (an age delta).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeBreakdown {
    pub months: u32,
    pub weeks: u32,
    pub days: u32,
}

// ==========================================
// AgeProjector - pure date arithmetic
// ==========================================
pub struct AgeProjector;

impl AgeProjector {
    /// Age of a cohort at `target`, measured from `reference`.
    ///
    /// # Rules
    /// - `days = floor((target - reference) / 1 day)` (signed)
    /// - `months = floor(days / 30.44)`, clamped at zero
    /// - `weeks = floor((days mod 30.44) / 7)`, clamped at zero
    pub fn age_between(reference: NaiveDate, target: NaiveDate) -> Age {
        let days = target.signed_duration_since(reference).num_days();
        let positive_days = days.max(0) as f64;
        let months = (positive_days / DAYS_PER_MONTH).floor();
        let remainder = positive_days - months * DAYS_PER_MONTH;
        let weeks = (remainder / 7.0).floor();
        Age {
            days,
            months: months as u32,
            weeks: weeks as u32,
        }
    }

    /// Calendar date at which a cohort born on `reference` reaches the
    /// desired age: `reference + round(total_months × 30.44)` days.
    pub fn project_date(reference: NaiveDate, desired_age: &AgeSpec) -> NaiveDate {
        let total_days = (desired_age.total_months() * DAYS_PER_MONTH).round() as i64;
        reference + Duration::days(total_days)
    }

    /// Months/weeks/days decomposition of a decimal month count, for
    /// age-delta display. Negative inputs clamp to zero.
    pub fn breakdown(total_months: f64) -> AgeBreakdown {
        let clamped = total_months.max(0.0);
        let months = clamped.floor();
        let leftover_days = (clamped - months) * DAYS_PER_MONTH;
        let weeks = (leftover_days / 7.0).floor();
        let days = (leftover_days - weeks * 7.0).round();
        AgeBreakdown {
            months: months as u32,
            weeks: weeks as u32,
            days: days as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_age_between_basic() {
        // 2024-01-01 -> 2024-03-02 is 61 days
        let age = AgeProjector::age_between(date(2024, 1, 1), date(2024, 3, 2));
        assert_eq!(age.days, 61);
        assert_eq!(age.months, 2);
        assert_eq!(age.weeks, 0);
        assert!((age.months_equivalent() - 61.0 / 30.44).abs() < 1e-9);
    }

    #[test]
    fn test_age_between_before_reference_is_negative_days() {
        let age = AgeProjector::age_between(date(2024, 6, 1), date(2024, 5, 20));
        assert_eq!(age.days, -12);
        // display components never go negative
        assert_eq!(age.months, 0);
        assert_eq!(age.weeks, 0);
        assert!(age.months_equivalent() < 0.0);
    }

    #[test]
    fn test_age_between_weeks_component() {
        // 82 days = 2 full months (60.88d) + 21.12d remainder = 3 weeks
        let age = AgeProjector::age_between(date(2024, 1, 1), date(2024, 3, 23));
        assert_eq!(age.days, 82);
        assert_eq!(age.months, 2);
        assert_eq!(age.weeks, 3);
    }

    #[test]
    fn test_project_date() {
        // 2 months -> round(2 * 30.44) = 61 days
        let projected = AgeProjector::project_date(date(2024, 1, 1), &AgeSpec::new(2, 0));
        assert_eq!(projected, date(2024, 3, 2));

        // 0 months 0 weeks -> the reference date itself
        let projected = AgeProjector::project_date(date(2024, 1, 1), &AgeSpec::new(0, 0));
        assert_eq!(projected, date(2024, 1, 1));
    }

    #[test]
    fn test_age_symmetry_within_one_day() {
        // age_between(R, project_date(R, A)) stays within one day of A
        let reference = date(2023, 11, 15);
        for months in 0..12u32 {
            for weeks in 0..4u32 {
                let spec = AgeSpec::new(months, weeks);
                let projected = AgeProjector::project_date(reference, &spec);
                let age = AgeProjector::age_between(reference, projected);
                let diff_months = (age.months_equivalent() - spec.total_months()).abs();
                assert!(
                    diff_months <= 1.0 / DAYS_PER_MONTH + 1e-9,
                    "round trip drift for {spec}: {diff_months} months"
                );
            }
        }
    }

    #[test]
    fn test_breakdown_decomposition() {
        let b = AgeProjector::breakdown(0.0);
        assert_eq!((b.months, b.weeks, b.days), (0, 0, 0));

        // 2.5 months = 2 months + 15.22 days = 2 weeks + 1 day
        let b = AgeProjector::breakdown(2.5);
        assert_eq!(b.months, 2);
        assert_eq!(b.weeks, 2);
        assert_eq!(b.days, 1);

        // negatives clamp
        let b = AgeProjector::breakdown(-0.7);
        assert_eq!((b.months, b.weeks, b.days), (0, 0, 0));
    }
}
