//! Stretch Break - a break reminder daemon
//!
//! Runs a repeating countdown against a configurable interval and fires a
//! desktop notification (optionally with a sound) each time it elapses.
//! Settings persist across restarts and every change takes effect at
//! runtime through a small HTTP control API.

pub mod api;
pub mod config;
pub mod services;
pub mod settings;
pub mod state;
pub mod tasks;
pub mod utils;

#[cfg(test)]
mod test_util;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use settings::SettingsStore;
pub use state::AppState;
pub use tasks::TimerEngine;
pub use utils::session_end_signal;
