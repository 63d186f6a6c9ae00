//! Background tasks and the timer engine
//!
//! The engine owns its own one-second tick task; the settings watcher runs
//! alongside the HTTP server and drives the engine from change events.

pub mod settings_watcher;
pub mod timer_engine;

// Re-export main types
pub use settings_watcher::settings_watcher_task;
pub use timer_engine::{EngineError, TimerEngine};
