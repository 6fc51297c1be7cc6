// ==========================================
// Cheptel - Core library
// ==========================================
// Farm management decision support: lot availability, age projection and
// order pricing over a local SQLite store. The surrounding application owns
// all mutation of lots; every engine here is a pure function over snapshots.
// ==========================================

// Initialize localization (French default)
rust_i18n::i18n!("locales", fallback = "fr");

// ==========================================
// Module declarations
// ==========================================

// Domain layer - entities and types
pub mod domain;

// Repository layer - data access
pub mod repository;

// Engine layer - business rules
pub mod engine;

// Import layer - external data
pub mod importer;

// Configuration layer
pub mod config;

// Database infrastructure (connection init / uniform PRAGMAs / schema)
pub mod db;

// Logging
pub mod logging;

// Localization
pub mod i18n;

// API layer - business interface
pub mod api;

// ==========================================
// Core type re-exports
// ==========================================

// Domain types
pub use domain::types::{AgeSpec, SexCategory};

// Domain entities
pub use domain::{
    EstimationInfo, LinePricing, Lot, OrderDraft, OrderPriceBreakdown, OrderRecord, PricingEntry,
    PricingTable, ProductLine, SelectionLine, SexCount,
};

// Engines
pub use engine::{
    Age, AgeBreakdown, AgeProjector, CollectionDateReconciler, LotAvailabilityIndex, LotRanker,
    LotSuggestion, OrderPriceAggregator, PriceResolver, SuggestionRequest,
};

// API
pub use api::{ApiError, ApiResult, AvailabilityApi, OrderApi, SelectionBinding};

/// Crate version, surfaced for the application shell's startup banner.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
