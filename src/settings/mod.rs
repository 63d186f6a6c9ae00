//! Settings module
//!
//! Persisted key/value settings with per-key change events. The rest of the
//! daemon reads values fresh at each decision point rather than caching them.

pub mod store;
pub mod values;

// Re-export main types
pub use store::SettingsStore;
pub use values::{SettingKey, Settings, SettingsError, SettingsPatch};
