// ==========================================
// Cheptel - Order domain model
// ==========================================
// An order under construction is a set of per-race/sex selection lines plus
// flat-rate product lines. The engines derive a price breakdown and a
// suggested collection date from it; the api layer persists the final
// record. Nothing here mutates lots or pricing tables.
// ==========================================

use crate::domain::lot::Lot;
use crate::domain::types::{AgeSpec, SexCategory};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// ==========================================
// SelectionLine - one race/sex request
// ==========================================
// Closed record: optionality is explicit, quantities are typed integers.
// Uniqueness rule: within one order no two lines share (race, sex).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionLine {
    pub race: String,
    pub species_key: String,
    pub sex_preference: SexCategory,
    pub quantity: u32, // validated strictly positive at the api boundary
    pub desired_age: AgeSpec,
    // Chosen by the user, or auto-selected from the ranked suggestions.
    // None means "no matching lot", which must stay visible to the caller.
    pub bound_lot: Option<Lot>,
}

impl SelectionLine {
    /// Duplicate detection key: two lines conflict when both race and sex
    /// preference are equal.
    pub fn conflicts_with(&self, other: &SelectionLine) -> bool {
        self.race == other.race && self.sex_preference == other.sex_preference
    }
}

// ==========================================
// ProductLine - flat-rate catalog item
// ==========================================
// Priced directly from the catalog, no age involved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductLine {
    pub label: String,
    pub unit_price: f64,
    pub quantity: u32,
}

// ==========================================
// OrderDraft - an order being built
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderDraft {
    pub selections: Vec<SelectionLine>,
    pub products: Vec<ProductLine>,
    pub delivery_date: Option<NaiveDate>,
}

impl OrderDraft {
    pub fn new() -> Self {
        Self::default()
    }
}

// ==========================================
// Price breakdown (derived, never persisted incrementally)
// ==========================================

/// Pricing outcome for one selection line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinePricing {
    pub line: SelectionLine,
    // None when the species has no usable pricing (missing table or no
    // matching entry); the line then contributes zero to the total.
    pub unit_price: Option<f64>,
    pub line_total: f64,
}

/// Pricing outcome for one product line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPricing {
    pub line: ProductLine,
    pub line_total: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderPriceBreakdown {
    pub lines: Vec<LinePricing>,
    pub products: Vec<ProductPricing>,
    pub grand_total: f64,
    // Species that could not be priced. The order is flagged incomplete
    // rather than silently underpriced.
    pub missing_pricing_species: BTreeSet<String>,
}

impl OrderPriceBreakdown {
    pub fn is_complete(&self) -> bool {
        self.missing_pricing_species.is_empty()
    }
}

// ==========================================
// OrderRecord - the persisted payload
// ==========================================
// Handed back to the storage layer on submission; the authoritative stock
// deduction happens there, not in this crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub delivery_date: Option<NaiveDate>,
    pub suggested_collection_date: Option<NaiveDate>,
    pub selections: Vec<SelectionLine>,
    pub products: Vec<ProductLine>,
    pub price_breakdown: OrderPriceBreakdown,
}

impl OrderRecord {
    pub fn grand_total(&self) -> f64 {
        self.price_breakdown.grand_total
    }
}
