//! Persisted settings values and partial updates

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Notification body used when `message-text` is left empty
pub const DEFAULT_MESSAGE: &str = "It is time to stretch your back!";
/// Icon used when `icon-name` is left empty
pub const DEFAULT_ICON: &str = "alarm-symbolic";
/// Sound event id used when `sound-name` is left empty
pub const DEFAULT_SOUND: &str = "complete";

/// Allowed range for `interval-min`, in minutes (one minute to one day)
pub const INTERVAL_RANGE: std::ops::RangeInclusive<u32> = 1..=1440;

/// Full settings snapshot, persisted to the config file and returned
/// verbatim by the API. Keys are kebab-case on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Settings {
    /// Master run/stop switch for the reminder timer
    pub timer_enabled: bool,
    /// Start the timer as soon as the daemon activates
    pub auto_start: bool,
    /// Minutes between reminders
    pub interval_min: u32,
    /// Publish a live countdown through the status endpoint
    pub show_timer: bool,
    /// Notification body (empty falls back to [`DEFAULT_MESSAGE`])
    pub message_text: String,
    /// Notification icon (empty falls back to [`DEFAULT_ICON`])
    pub icon_name: String,
    /// Notification urgency: 0 low, 1 normal, 2 critical
    pub urgency_level: u8,
    /// Play a sound alongside each reminder
    pub play_sound: bool,
    /// Sound theme event id (empty falls back to [`DEFAULT_SOUND`])
    pub sound_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timer_enabled: false,
            auto_start: false,
            interval_min: 60,
            show_timer: false,
            message_text: DEFAULT_MESSAGE.to_string(),
            icon_name: DEFAULT_ICON.to_string(),
            urgency_level: 1,
            play_sound: false,
            sound_name: DEFAULT_SOUND.to_string(),
        }
    }
}

/// Identifies a single settings key in change events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    TimerEnabled,
    AutoStart,
    IntervalMin,
    ShowTimer,
    MessageText,
    IconName,
    UrgencyLevel,
    PlaySound,
    SoundName,
}

impl SettingKey {
    /// The wire/config-file spelling of the key
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TimerEnabled => "timer-enabled",
            Self::AutoStart => "auto-start",
            Self::IntervalMin => "interval-min",
            Self::ShowTimer => "show-timer",
            Self::MessageText => "message-text",
            Self::IconName => "icon-name",
            Self::UrgencyLevel => "urgency-level",
            Self::PlaySound => "play-sound",
            Self::SoundName => "sound-name",
        }
    }
}

/// Validation failures for incoming settings updates
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("interval-min must be within 1..=1440 minutes, got {0}")]
    IntervalOutOfRange(u32),

    #[error("urgency-level must be 0, 1 or 2, got {0}")]
    UrgencyOutOfRange(u8),
}

/// Partial settings update, as accepted by `PUT /settings`.
/// Absent fields are left untouched; unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct SettingsPatch {
    pub timer_enabled: Option<bool>,
    pub auto_start: Option<bool>,
    pub interval_min: Option<u32>,
    pub show_timer: Option<bool>,
    pub message_text: Option<String>,
    pub icon_name: Option<String>,
    pub urgency_level: Option<u8>,
    pub play_sound: Option<bool>,
    pub sound_name: Option<String>,
}

impl SettingsPatch {
    /// Check every provided value against its allowed range
    pub fn validate(&self) -> Result<(), SettingsError> {
        if let Some(minutes) = self.interval_min {
            if !INTERVAL_RANGE.contains(&minutes) {
                return Err(SettingsError::IntervalOutOfRange(minutes));
            }
        }
        if let Some(level) = self.urgency_level {
            if level > 2 {
                return Err(SettingsError::UrgencyOutOfRange(level));
            }
        }
        Ok(())
    }

    /// Apply the patch to a settings snapshot, returning the keys whose
    /// values actually changed
    pub fn apply_to(&self, values: &mut Settings) -> Vec<SettingKey> {
        let mut changed = Vec::new();

        macro_rules! merge {
            ($field:ident, $key:expr) => {
                if let Some(new_value) = &self.$field {
                    if values.$field != *new_value {
                        values.$field = new_value.clone();
                        changed.push($key);
                    }
                }
            };
        }

        merge!(timer_enabled, SettingKey::TimerEnabled);
        merge!(auto_start, SettingKey::AutoStart);
        merge!(interval_min, SettingKey::IntervalMin);
        merge!(show_timer, SettingKey::ShowTimer);
        merge!(message_text, SettingKey::MessageText);
        merge!(icon_name, SettingKey::IconName);
        merge!(urgency_level, SettingKey::UrgencyLevel);
        merge!(play_sound, SettingKey::PlaySound);
        merge!(sound_name, SettingKey::SoundName);

        changed
    }
}
