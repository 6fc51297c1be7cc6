// ==========================================
// Cheptel - Pricing domain model
// ==========================================
// Per-species, age-indexed price grid. Entry order is significant: the
// nearest-age lookup resolves equidistant entries in favor of the first one
// encountered, so the stored position must survive persistence round trips.
// ==========================================

use crate::domain::types::SexCategory;
use serde::{Deserialize, Serialize};

// ==========================================
// PricingEntry - one grid cell
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingEntry {
    pub age_months: f64, // non-negative
    pub sex: SexCategory,
    pub price: f64, // non-negative, flat unit price
}

impl PricingEntry {
    pub fn new(age_months: f64, sex: SexCategory, price: f64) -> Self {
        Self {
            age_months,
            sex,
            price,
        }
    }
}

// ==========================================
// PricingTable - age-indexed grid for one species
// ==========================================
// A table with zero entries is "missing pricing" for that species and must
// be reported by the aggregator, never priced as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingTable {
    pub species_key: String,
    pub entries: Vec<PricingEntry>,
}

impl PricingTable {
    pub fn new(species_key: impl Into<String>, entries: Vec<PricingEntry>) -> Self {
        Self {
            species_key: species_key.into(),
            entries,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
