//! Countdown display output

use tokio::sync::watch;

/// Where the live countdown goes while `show-timer` is on. The engine drives
/// this with explicit show/update/hide calls; the display holds no timer
/// logic of its own.
pub trait CountdownDisplay: Send + Sync {
    /// Make the countdown visible with an initial value
    fn show(&self, text: &str);

    /// Refresh the remaining time
    fn update(&self, text: &str);

    /// Remove the countdown
    fn hide(&self);
}

/// Publishes the formatted remaining time through a watch channel, surfaced
/// to clients by `GET /status`. `None` means the countdown is hidden.
pub struct StatusDisplay {
    current: watch::Sender<Option<String>>,
}

impl StatusDisplay {
    /// Returns the display and the receiver that the status endpoint reads.
    /// The receiver must be kept alive for the lifetime of the daemon.
    pub fn new() -> (Self, watch::Receiver<Option<String>>) {
        let (current, rx) = watch::channel(None);
        (Self { current }, rx)
    }
}

impl CountdownDisplay for StatusDisplay {
    fn show(&self, text: &str) {
        let _ = self.current.send(Some(text.to_string()));
    }

    fn update(&self, text: &str) {
        let _ = self.current.send(Some(text.to_string()));
    }

    fn hide(&self) {
        let _ = self.current.send(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_display_publishes_and_clears() {
        let (display, rx) = StatusDisplay::new();
        assert_eq!(*rx.borrow(), None);

        display.show("01:00");
        assert_eq!(rx.borrow().as_deref(), Some("01:00"));

        display.update("00:59");
        assert_eq!(rx.borrow().as_deref(), Some("00:59"));

        display.hide();
        assert_eq!(*rx.borrow(), None);
    }
}
