//! Wall-clock source

use chrono::Utc;

/// Supplies the current time in whole seconds. The timer engine computes
/// elapsed time from absolute readings, so a fake implementation makes the
/// whole countdown deterministic under test.
pub trait Clock: Send + Sync {
    /// Seconds since the Unix epoch
    fn now_epoch(&self) -> u64;
}

/// System wall clock
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch(&self) -> u64 {
        Utc::now().timestamp().max(0) as u64
    }
}
