//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// API response structure for state change endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub settings: Settings,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, settings: Settings) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            settings,
        }
    }

    /// Create an enabled response
    pub fn enabled(message: String, settings: Settings) -> Self {
        Self::new("enabled".to_string(), message, settings)
    }

    /// Create a disabled response
    pub fn disabled(message: String, settings: Settings) -> Self {
        Self::new("disabled".to_string(), message, settings)
    }

    /// Create an updated response
    pub fn updated(message: String, settings: Settings) -> Self {
        Self::new("updated".to_string(), message, settings)
    }

    /// Create an error response
    pub fn error(message: String, settings: Settings) -> Self {
        Self::new("error".to_string(), message, settings)
    }
}

/// Status response with live timer information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub settings: Settings,
    pub timer_active: bool,
    pub timer_remaining_seconds: Option<u64>,
    /// Formatted countdown, present only while `show-timer` is on and the
    /// timer is running
    pub countdown: Option<String>,
    pub uptime: String,
    pub port: u16,
    pub host: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
