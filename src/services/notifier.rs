//! Desktop notification delivery

/// Notification priority. Critical notifications are auto-expanded by most
/// desktops and stay until dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    Low,
    Normal,
    Critical,
}

impl Urgency {
    /// Map the persisted integer level. Returns `None` for anything outside
    /// 0..=2; the dispatcher decides the fallback.
    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            0 => Some(Self::Low),
            1 => Some(Self::Normal),
            2 => Some(Self::Critical),
            _ => None,
        }
    }
}

/// Fully built reminder notification, ready for delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderNote {
    pub title: String,
    pub body: String,
    pub icon: String,
    pub urgency: Urgency,
}

/// Delivers a reminder to the user. Failures are reported to the caller,
/// which logs them; reminders are never retried.
pub trait Notifier: Send + Sync {
    fn notify(&self, note: &ReminderNote) -> Result<(), String>;
}

/// Sends reminders over the desktop notification bus
pub struct DesktopNotifier;

impl DesktopNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Notifier for DesktopNotifier {
    fn notify(&self, note: &ReminderNote) -> Result<(), String> {
        let urgency = match note.urgency {
            Urgency::Low => notify_rust::Urgency::Low,
            Urgency::Normal => notify_rust::Urgency::Normal,
            Urgency::Critical => notify_rust::Urgency::Critical,
        };

        notify_rust::Notification::new()
            .summary(&note.title)
            .body(&note.body)
            .icon(&note.icon)
            .urgency(urgency)
            .show()
            .map(|_| ())
            .map_err(|e| format!("failed to show desktop notification: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urgency_levels_map_in_order() {
        assert_eq!(Urgency::from_level(0), Some(Urgency::Low));
        assert_eq!(Urgency::from_level(1), Some(Urgency::Normal));
        assert_eq!(Urgency::from_level(2), Some(Urgency::Critical));
    }

    #[test]
    fn out_of_range_levels_are_unmapped() {
        assert_eq!(Urgency::from_level(3), None);
        assert_eq!(Urgency::from_level(255), None);
    }
}
