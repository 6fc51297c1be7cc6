// ==========================================
// Test data builders for the integration suites
// ==========================================

use cheptel::domain::lot::{EstimationInfo, Lot, SexCount};
use cheptel::domain::pricing::{PricingEntry, PricingTable};
use cheptel::domain::types::SexCategory;
use chrono::{NaiveDate, Utc};
use std::collections::BTreeMap;

// ==========================================
// Lot builder
// ==========================================

pub struct LotBuilder {
    id: String,
    species_key: String,
    reference_date: NaiveDate,
    race_allocations: BTreeMap<String, SexCount>,
    is_active: bool,
    estimation: Option<EstimationInfo>,
}

impl LotBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            species_key: "chicken".to_string(),
            reference_date: NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date"),
            race_allocations: BTreeMap::new(),
            is_active: true,
            estimation: None,
        }
    }

    pub fn species(mut self, species_key: &str) -> Self {
        self.species_key = species_key.to_string();
        self
    }

    pub fn reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = date;
        self
    }

    pub fn allocation(mut self, race: &str, males: u32, females: u32) -> Self {
        self.race_allocations
            .insert(race.to_string(), SexCount::new(males, females));
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    pub fn estimated(mut self, egg_count: u32, success_rate_percent: f64) -> Self {
        self.estimation = Some(EstimationInfo {
            egg_count,
            hatched_count: 0,
            success_rate_percent,
        });
        self
    }

    pub fn build(self) -> Lot {
        Lot {
            id: self.id,
            species_key: self.species_key,
            reference_date: self.reference_date,
            race_allocations: self.race_allocations,
            is_active: self.is_active,
            estimation: self.estimation,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}

// ==========================================
// Pricing grid helpers
// ==========================================

#[allow(dead_code)]
pub fn chicken_pricing_table() -> PricingTable {
    PricingTable::new(
        "chicken",
        vec![
            PricingEntry::new(1.0, SexCategory::Female, 10.0),
            PricingEntry::new(3.0, SexCategory::Female, 20.0),
            PricingEntry::new(1.0, SexCategory::Male, 7.0),
            PricingEntry::new(3.0, SexCategory::Male, 14.0),
            PricingEntry::new(2.0, SexCategory::Any, 11.0),
        ],
    )
}
