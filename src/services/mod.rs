//! External collaborator services
//!
//! The timer core talks to the outside world only through the traits in this
//! module: the wall clock, the countdown display, notification delivery, and
//! sound playback. Each trait ships one production implementation here and
//! can be replaced with a fake under test.

pub mod clock;
pub mod dispatcher;
pub mod display;
pub mod notifier;
pub mod sound;

// Re-export main types
pub use clock::{Clock, SystemClock};
pub use dispatcher::ReminderDispatcher;
pub use display::{CountdownDisplay, StatusDisplay};
pub use notifier::{DesktopNotifier, Notifier, ReminderNote, Urgency};
pub use sound::{FreedesktopSound, SoundPlayer};
