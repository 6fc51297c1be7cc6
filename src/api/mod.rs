// ==========================================
// Cheptel - API layer
// ==========================================
// Responsibility: validated business interface over the engines and
// repositories, for the application shell to call
// ==========================================

pub mod availability_api;
pub mod error;
pub mod labels;
pub mod order_api;

// Re-export the core types
pub use availability_api::{AvailabilityApi, RaceAvailability};
pub use error::{ApiError, ApiResult};
pub use order_api::{OrderApi, SelectionBinding};
