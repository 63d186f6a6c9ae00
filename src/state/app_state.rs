//! Main application state and lifecycle

use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Instant,
};

use tokio::{
    sync::watch,
    task::JoinHandle,
};
use tracing::{debug, info, warn};

use crate::settings::SettingsStore;
use crate::tasks::{settings_watcher_task, TimerEngine};

/// Everything the HTTP handlers and background tasks share: the settings
/// store, the timer engine, the live countdown feed, and server metadata.
pub struct AppState {
    pub settings: Arc<SettingsStore>,
    pub engine: Arc<TimerEngine>,
    /// Latest formatted countdown, `None` while hidden or stopped.
    /// Also keeps the display's watch channel open for the daemon lifetime.
    pub countdown: watch::Receiver<Option<String>>,
    /// Server metadata
    pub start_time: Instant,
    pub host: String,
    pub port: u16,
    watcher_task: Mutex<Option<JoinHandle<()>>>,
}

impl AppState {
    pub fn new(
        settings: Arc<SettingsStore>,
        engine: Arc<TimerEngine>,
        countdown: watch::Receiver<Option<String>>,
        host: String,
        port: u16,
    ) -> Self {
        Self {
            settings,
            engine,
            countdown,
            start_time: Instant::now(),
            host,
            port,
            watcher_task: Mutex::new(None),
        }
    }

    /// Wire the settings watcher and honor `auto-start` / a persisted
    /// `timer-enabled` flag. Idempotent: a second call while active is a
    /// logged no-op.
    pub fn activate(self: &Arc<Self>) {
        let mut slot = self.watcher_slot();
        if slot.is_some() {
            debug!("activate called while already active");
            return;
        }

        // Force the master switch on before subscribing, so the direct
        // start below is the only start and the watcher sees no stale event
        if self.settings.auto_start() {
            self.settings.set_timer_enabled(true);
        }

        let changes = self.settings.subscribe();
        let watcher_state = Arc::clone(self);
        *slot = Some(tokio::spawn(async move {
            settings_watcher_task(watcher_state, changes).await;
        }));
        drop(slot);

        if self.settings.timer_enabled() {
            let interval_min = self.settings.interval_min();
            if let Err(e) = self.engine.start(interval_min) {
                warn!("reminder timer not started on activation: {}", e);
            }
        }

        info!("break reminder activated");
    }

    /// Tear everything down: cancel the watcher, force the master switch
    /// off, and stop the engine. Safe to call repeatedly and safe even if
    /// activation never ran; the shutdown-signal path relies on that.
    pub fn deactivate(&self) {
        let task = self.watcher_slot().take();
        let was_active = task.is_some();
        if let Some(task) = task {
            task.abort();
        }

        self.settings.set_timer_enabled(false);
        self.engine.stop();

        if was_active {
            info!("break reminder deactivated");
        }
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    fn watcher_slot(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.watcher_task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use crate::settings::Settings;
    use crate::test_util::AppHarness;

    #[tokio::test]
    async fn activation_honors_auto_start() {
        let harness = AppHarness::with_settings(Settings {
            auto_start: true,
            ..Default::default()
        });

        harness.state.activate();

        assert!(harness.state.settings.timer_enabled());
        assert!(harness.state.engine.is_running());
    }

    #[tokio::test]
    async fn activation_resumes_a_persisted_enabled_timer() {
        let harness = AppHarness::with_settings(Settings {
            timer_enabled: true,
            ..Default::default()
        });

        harness.state.activate();

        assert!(harness.state.engine.is_running());
    }

    #[tokio::test]
    async fn activation_without_auto_start_stays_stopped() {
        let harness = AppHarness::with_settings(Settings::default());

        harness.state.activate();

        assert!(!harness.state.settings.timer_enabled());
        assert!(!harness.state.engine.is_running());
    }

    #[tokio::test]
    async fn activate_is_idempotent() {
        let harness = AppHarness::with_settings(Settings {
            auto_start: true,
            ..Default::default()
        });

        harness.state.activate();
        harness.state.activate();

        assert!(harness.state.engine.is_running());
    }

    #[tokio::test]
    async fn deactivation_forces_the_timer_off() {
        let harness = AppHarness::with_settings(Settings {
            auto_start: true,
            ..Default::default()
        });
        harness.state.activate();

        harness.state.deactivate();

        assert!(!harness.state.settings.timer_enabled());
        assert!(!harness.state.engine.is_running());
    }

    #[tokio::test]
    async fn deactivation_is_safe_without_activation() {
        let harness = AppHarness::with_settings(Settings::default());

        harness.state.deactivate();
        harness.state.deactivate();

        assert!(!harness.state.engine.is_running());
    }
}
