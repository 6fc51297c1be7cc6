// ==========================================
// Cheptel - Engine layer
// ==========================================
// Responsibility: the business rules — age math, price lookup, availability
// queries, lot ranking, price aggregation, collection-date reconciliation
// Rule: engines are pure functions of their inputs; no SQL, no I/O, no
// shared mutable state
// ==========================================

pub mod age;
pub mod aggregator;
pub mod availability;
pub mod collection;
pub mod pricing;
pub mod ranker;

// Re-export the core engines
pub use age::{Age, AgeBreakdown, AgeProjector, DAYS_PER_MONTH};
pub use aggregator::OrderPriceAggregator;
pub use availability::LotAvailabilityIndex;
pub use collection::CollectionDateReconciler;
pub use pricing::PriceResolver;
pub use ranker::{LotRanker, LotSuggestion, SuggestionRequest, OPTIMAL_AGE_TOLERANCE_MONTHS};
