// ==========================================
// Cheptel - Lot ranking engine
// ==========================================
// Responsibility: rank candidate lots for a race/age/quantity/delivery-date
// request
// Input: a lot availability snapshot plus the request parameters
// Output: suggestions sorted by closeness to the desired age
// ==========================================

use crate::domain::lot::Lot;
use crate::domain::types::AgeSpec;
use crate::engine::age::{Age, AgeBreakdown, AgeProjector};
use crate::engine::availability::LotAvailabilityIndex;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A lot is "optimal" when its projected age at delivery is within half a
/// month (roughly two weeks) of the requested age. Fixed design constant,
/// not user-configurable.
pub const OPTIMAL_AGE_TOLERANCE_MONTHS: f64 = 0.5;

// ==========================================
// SuggestionRequest - one ranking query
// ==========================================
#[derive(Debug, Clone)]
pub struct SuggestionRequest {
    pub race: String,
    pub desired_age: AgeSpec,
    pub quantity: u32,
    // None means "deliver today"
    pub delivery_date: Option<NaiveDate>,
}

// ==========================================
// LotSuggestion - one ranked candidate
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LotSuggestion {
    pub lot: Lot,
    // decimal months at the delivery date (days / 30.44, unrounded)
    pub age_at_delivery_months: f64,
    pub age_difference_months: f64,
    // display decomposition of the difference
    pub age_difference: AgeBreakdown,
    pub remaining_after_order: u32,
    // date at which THIS lot reaches the desired age, independent of the
    // requested delivery date
    pub target_date: NaiveDate,
    pub is_optimal: bool,
    pub is_estimated: bool,
    pub estimated_remaining: Option<u32>,
    // false while the cohort has not yet been born/created as of today
    pub is_actually_available: bool,
}

// ==========================================
// LotRanker - the central suggestion algorithm
// ==========================================
pub struct LotRanker {
    // stateless engine, no injected dependencies
}

impl LotRanker {
    pub fn new() -> Self {
        Self {}
    }

    /// Ranked lot suggestions for one request.
    ///
    /// # Rules
    /// 1. Candidates come from `lots_offering(race)`; no candidates is an
    ///    empty list, not an error.
    /// 2. Age at delivery uses the unrounded decimal form for precision.
    /// 3. Sort is stable, ascending on `age_difference_months`, so lots at
    ///    equal distance keep the store's insertion order.
    ///
    /// # Arguments
    /// - `index`: lot snapshot to rank against
    /// - `request`: race/age/quantity/delivery-date query
    /// - `today`: the caller's current date (kept explicit so the engine
    ///   stays a pure function)
    pub fn rank(
        &self,
        index: &LotAvailabilityIndex,
        request: &SuggestionRequest,
        today: NaiveDate,
    ) -> Vec<LotSuggestion> {
        let delivery_date = request.delivery_date.unwrap_or(today);
        let desired_months = request.desired_age.total_months();

        let mut suggestions: Vec<LotSuggestion> = index
            .lots_offering(&request.race)
            .into_iter()
            .map(|lot| {
                self.evaluate(lot, request, desired_months, delivery_date, today)
            })
            .collect();

        // stable sort: equidistant lots keep source order
        suggestions.sort_by(|a, b| {
            a.age_difference_months
                .total_cmp(&b.age_difference_months)
        });
        suggestions
    }

    /// Head of the ranked list, used when the caller needs a single best
    /// lot. None must be surfaced as "no matching lot", never silently
    /// replaced by a zero price downstream.
    pub fn auto_select(
        &self,
        index: &LotAvailabilityIndex,
        request: &SuggestionRequest,
        today: NaiveDate,
    ) -> Option<LotSuggestion> {
        self.rank(index, request, today).into_iter().next()
    }

    fn evaluate(
        &self,
        lot: &Lot,
        request: &SuggestionRequest,
        desired_months: f64,
        delivery_date: NaiveDate,
        today: NaiveDate,
    ) -> LotSuggestion {
        let age_at_delivery: Age = AgeProjector::age_between(lot.reference_date, delivery_date);
        let age_at_delivery_months = age_at_delivery.months_equivalent();
        let age_difference_months = (age_at_delivery_months - desired_months).abs();

        LotSuggestion {
            age_at_delivery_months,
            age_difference_months,
            age_difference: AgeProjector::breakdown(age_difference_months),
            remaining_after_order: LotAvailabilityIndex::remaining_after(
                lot,
                &request.race,
                request.quantity,
            ),
            target_date: AgeProjector::project_date(lot.reference_date, &request.desired_age),
            is_optimal: age_difference_months <= OPTIMAL_AGE_TOLERANCE_MONTHS,
            is_estimated: LotAvailabilityIndex::is_estimated(lot),
            estimated_remaining: LotAvailabilityIndex::estimated_remaining(lot),
            is_actually_available: AgeProjector::age_between(lot.reference_date, today).days >= 0,
            lot: lot.clone(),
        }
    }
}
