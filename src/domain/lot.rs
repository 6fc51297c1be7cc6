// ==========================================
// Cheptel - Lot domain model
// ==========================================
// A lot is a birth/creation cohort holding remaining animal counts broken
// down by race and sex. Lots are created and mutated by the surrounding
// application; every engine in this crate reads them as immutable snapshots.
// ==========================================

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// SexCount - male/female headcount for one race
// ==========================================
// Invariant: counts are unsigned; a 0/0 allocation is equivalent to absence
// and is never surfaced as available.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SexCount {
    pub males: u32,
    pub females: u32,
}

impl SexCount {
    pub fn new(males: u32, females: u32) -> Self {
        Self { males, females }
    }

    pub fn total(&self) -> u32 {
        self.males + self.females
    }
}

// ==========================================
// EstimationInfo - projected (not confirmed) quantities
// ==========================================
// Present when a lot was registered from an egg count before hatching.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimationInfo {
    pub egg_count: u32,
    pub hatched_count: u32,
    pub success_rate_percent: f64,
}

// ==========================================
// Lot - a cohort of animals
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lot {
    // ===== identity =====
    pub id: String,

    // ===== classification =====
    pub species_key: String, // drives which pricing table applies

    // ===== age reference =====
    // Actual hatch/birth date when known, otherwise the registration date.
    pub reference_date: NaiveDate,

    // ===== remaining animals, race -> counts =====
    // Race keys are unique within a lot (map semantics).
    pub race_allocations: BTreeMap<String, SexCount>,

    // ===== lifecycle =====
    pub is_active: bool, // inactive lots are excluded from availability

    // ===== estimation metadata =====
    pub estimation: Option<EstimationInfo>,

    // ===== audit =====
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Lot {
    /// Remaining headcount (males + females) for one race, 0 when the race
    /// is not carried by this lot.
    pub fn total_for_race(&self, race: &str) -> u32 {
        self.race_allocations
            .get(race)
            .map(|c| c.total())
            .unwrap_or(0)
    }

    /// A lot is estimated when it was registered from an egg count, no hatch
    /// has been confirmed yet, and a success rate was supplied.
    pub fn is_estimated(&self) -> bool {
        match &self.estimation {
            Some(info) => {
                info.egg_count > 0 && info.hatched_count == 0 && info.success_rate_percent > 0.0
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lot_with_estimation(estimation: Option<EstimationInfo>) -> Lot {
        Lot {
            id: "L1".to_string(),
            species_key: "chicken".to_string(),
            reference_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            race_allocations: BTreeMap::new(),
            is_active: true,
            estimation,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_total_for_race_missing_race_is_zero() {
        let mut lot = lot_with_estimation(None);
        lot.race_allocations
            .insert("Leghorn".to_string(), SexCount::new(5, 5));
        assert_eq!(lot.total_for_race("Leghorn"), 10);
        assert_eq!(lot.total_for_race("Sussex"), 0);
    }

    #[test]
    fn test_is_estimated_requires_eggs_no_hatch_and_rate() {
        assert!(!lot_with_estimation(None).is_estimated());

        let estimated = lot_with_estimation(Some(EstimationInfo {
            egg_count: 40,
            hatched_count: 0,
            success_rate_percent: 85.0,
        }));
        assert!(estimated.is_estimated());

        // confirmed hatch -> no longer estimated
        let hatched = lot_with_estimation(Some(EstimationInfo {
            egg_count: 40,
            hatched_count: 32,
            success_rate_percent: 85.0,
        }));
        assert!(!hatched.is_estimated());

        let no_rate = lot_with_estimation(Some(EstimationInfo {
            egg_count: 40,
            hatched_count: 0,
            success_rate_percent: 0.0,
        }));
        assert!(!no_rate.is_estimated());
    }
}
