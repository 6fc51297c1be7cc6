// ==========================================
// Cheptel - Domain model layer
// ==========================================
// Responsibility: entities and value types shared by every layer
// Rule: no data access logic, no engine logic
// ==========================================

pub mod lot;
pub mod order;
pub mod pricing;
pub mod types;

// Re-export the core types
pub use lot::{EstimationInfo, Lot, SexCount};
pub use order::{
    LinePricing, OrderDraft, OrderPriceBreakdown, OrderRecord, ProductLine, ProductPricing,
    SelectionLine,
};
pub use pricing::{PricingEntry, PricingTable};
pub use types::{AgeSpec, SexCategory, WEEKS_PER_MONTH};
