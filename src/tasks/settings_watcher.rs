//! Settings watcher background task

use std::sync::Arc;

use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, info, warn};

use crate::settings::SettingKey;
use crate::state::AppState;

/// Background task that turns settings-change events into engine calls.
/// The receiver is created by the caller before the task is spawned, so no
/// change emitted after activation can be missed.
pub async fn settings_watcher_task(
    state: Arc<AppState>,
    mut changes: broadcast::Receiver<SettingKey>,
) {
    info!("starting settings watcher task");

    loop {
        match changes.recv().await {
            Ok(key) => apply_change(&state, key),
            Err(RecvError::Lagged(missed)) => {
                // Values are re-read on every event, so the latest state
                // still wins after a lag
                warn!("settings watcher lagged, {} change events dropped", missed);
            }
            Err(RecvError::Closed) => break,
        }
    }

    debug!("settings watcher task finished");
}

/// React to a single settings change. Only the master switch and the
/// countdown visibility act immediately; every other key is picked up at
/// its next natural read (interval at the next start, reminder content at
/// the next fire).
pub(crate) fn apply_change(state: &Arc<AppState>, key: SettingKey) {
    match key {
        SettingKey::TimerEnabled => {
            if state.settings.timer_enabled() {
                let interval_min = state.settings.interval_min();
                if let Err(e) = state.engine.start(interval_min) {
                    warn!("reminder timer not started: {}", e);
                }
            } else {
                state.engine.stop();
            }
        }
        SettingKey::ShowTimer => {
            // Visibility only matters while the timer is enabled; otherwise
            // the flag is consulted at the next start
            if state.settings.timer_enabled() {
                state.engine.set_display_enabled(state.settings.show_timer());
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{Settings, SettingsPatch};
    use crate::test_util::AppHarness;

    #[tokio::test]
    async fn enabling_the_timer_starts_the_engine() {
        let harness = AppHarness::with_settings(Settings::default());

        harness.state.settings.set_timer_enabled(true);
        apply_change(&harness.state, SettingKey::TimerEnabled);

        assert!(harness.state.engine.is_running());
    }

    #[tokio::test]
    async fn disabling_the_timer_stops_the_engine() {
        let harness = AppHarness::with_settings(Settings::default());
        harness.state.settings.set_timer_enabled(true);
        apply_change(&harness.state, SettingKey::TimerEnabled);

        harness.state.settings.set_timer_enabled(false);
        apply_change(&harness.state, SettingKey::TimerEnabled);

        assert!(!harness.state.engine.is_running());
        assert!(harness.notifier.notes().is_empty());
    }

    #[tokio::test]
    async fn show_timer_toggle_is_ignored_while_disabled() {
        let harness = AppHarness::with_settings(Settings::default());

        let patch = SettingsPatch {
            show_timer: Some(true),
            ..Default::default()
        };
        harness.state.settings.apply(&patch).unwrap();
        apply_change(&harness.state, SettingKey::ShowTimer);

        assert!(harness.display.events().is_empty());
    }

    #[tokio::test]
    async fn show_timer_toggle_updates_a_running_timer() {
        let harness = AppHarness::with_settings(Settings::default());
        harness.state.settings.set_timer_enabled(true);
        apply_change(&harness.state, SettingKey::TimerEnabled);

        let patch = SettingsPatch {
            show_timer: Some(true),
            ..Default::default()
        };
        harness.state.settings.apply(&patch).unwrap();
        apply_change(&harness.state, SettingKey::ShowTimer);

        assert!(!harness.display.events().is_empty());
    }

    #[tokio::test]
    async fn unrelated_keys_are_ignored() {
        let harness = AppHarness::with_settings(Settings::default());

        apply_change(&harness.state, SettingKey::MessageText);
        apply_change(&harness.state, SettingKey::IntervalMin);

        assert!(!harness.state.engine.is_running());
        assert!(harness.display.events().is_empty());
    }
}
