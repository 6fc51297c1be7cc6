// ==========================================
// Cheptel - Configuration layer
// ==========================================
// Responsibility: application settings management
// Storage: config_kv table
// ==========================================

pub mod config_manager;

// Re-export the configuration manager
pub use config_manager::{config_keys, ConfigManager};
