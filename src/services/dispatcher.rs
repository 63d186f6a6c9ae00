//! Reminder construction and delivery

use std::sync::Arc;

use tracing::{info, warn};

use crate::settings::values::{DEFAULT_ICON, DEFAULT_MESSAGE, DEFAULT_SOUND};
use crate::settings::Settings;

use super::notifier::{Notifier, ReminderNote, Urgency};
use super::sound::SoundPlayer;

/// Title shown on every reminder notification
pub const REMINDER_TITLE: &str = "Stretch Break";

/// Builds a notification from a fresh settings snapshot and hands it to the
/// delivery collaborators. Fire-and-forget: delivery failures are logged and
/// never retried, per-cycle timing is unaffected.
pub struct ReminderDispatcher {
    notifier: Arc<dyn Notifier>,
    sound: Arc<dyn SoundPlayer>,
}

impl ReminderDispatcher {
    pub fn new(notifier: Arc<dyn Notifier>, sound: Arc<dyn SoundPlayer>) -> Self {
        Self { notifier, sound }
    }

    /// Deliver one reminder according to the given settings snapshot
    pub fn fire(&self, settings: &Settings) {
        let note = build_note(settings);
        info!("reminder due, dispatching notification");

        if let Err(e) = self.notifier.notify(&note) {
            warn!("notification delivery failed: {}", e);
        }

        if settings.play_sound {
            let sound_name = fallback(&settings.sound_name, DEFAULT_SOUND);
            if let Err(e) = self.sound.play(sound_name) {
                warn!("sound playback failed: {}", e);
            }
        }
    }
}

fn build_note(settings: &Settings) -> ReminderNote {
    let urgency = Urgency::from_level(settings.urgency_level).unwrap_or_else(|| {
        warn!(
            "urgency-level {} is out of range, falling back to normal",
            settings.urgency_level
        );
        Urgency::Normal
    });

    ReminderNote {
        title: REMINDER_TITLE.to_string(),
        body: fallback(&settings.message_text, DEFAULT_MESSAGE).to_string(),
        icon: fallback(&settings.icon_name, DEFAULT_ICON).to_string(),
        urgency,
    }
}

fn fallback<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.is_empty() {
        default
    } else {
        value
    }
}
