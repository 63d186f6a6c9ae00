//! Reminder timer engine
//!
//! Owns the single active countdown cycle and its one-second tick task.
//! The cycle state exists exactly while the timer runs: `start` creates it
//! and spawns the tick task, `stop` aborts the task and drops the state.
//! At most one tick task is ever live; a second `start` is rejected instead
//! of stacking another one.

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex, MutexGuard, PoisonError,
    },
    time::Duration,
};

use thiserror::Error;
use tokio::{task::JoinHandle, time::interval};
use tracing::{info, warn};

use crate::services::{Clock, CountdownDisplay, ReminderDispatcher};
use crate::settings::SettingsStore;
use crate::state::TimerState;
use crate::utils::format_countdown;

/// Reasons a start request can be refused
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("reminder timer is already running")]
    AlreadyRunning,

    #[error("reminder interval must be at least one minute, got {0}")]
    InvalidInterval(u32),
}

/// The countdown state machine. All collaborators are injected so the
/// engine runs identically against the real desktop and against fakes.
pub struct TimerEngine {
    clock: Arc<dyn Clock>,
    display: Arc<dyn CountdownDisplay>,
    dispatcher: ReminderDispatcher,
    settings: Arc<SettingsStore>,
    cycle: Mutex<Option<TimerState>>,
    tick_task: Mutex<Option<JoinHandle<()>>>,
    /// Whether the countdown display currently exists. Kept in sync with the
    /// `show-timer` setting by the watcher while the timer runs.
    display_shown: AtomicBool,
}

impl TimerEngine {
    pub fn new(
        clock: Arc<dyn Clock>,
        display: Arc<dyn CountdownDisplay>,
        dispatcher: ReminderDispatcher,
        settings: Arc<SettingsStore>,
    ) -> Self {
        Self {
            clock,
            display,
            dispatcher,
            settings,
            cycle: Mutex::new(None),
            tick_task: Mutex::new(None),
            display_shown: AtomicBool::new(false),
        }
    }

    /// Begin a new cycle and spawn the tick task. Rejects a second start
    /// while running; callers stop the engine first.
    pub fn start(self: &Arc<Self>, interval_min: u32) -> Result<(), EngineError> {
        if interval_min == 0 {
            return Err(EngineError::InvalidInterval(interval_min));
        }
        let interval_seconds = u64::from(interval_min) * 60;

        {
            let mut cycle = self.cycle_state();
            if cycle.is_some() {
                return Err(EngineError::AlreadyRunning);
            }

            let fresh = TimerState::begin(interval_seconds, self.clock.now_epoch());
            if self.settings.show_timer() {
                self.display.show(&format_countdown(fresh.remaining_seconds()));
                self.display_shown.store(true, Ordering::SeqCst);
            }
            *cycle = Some(fresh);
        }

        self.spawn_tick_task();
        info!("reminder timer started, firing every {} min", interval_min);
        Ok(())
    }

    /// Advance the running cycle by one clock reading. Invoked once per
    /// second by the tick task; harmless if a stale call lands after stop.
    pub fn tick(&self) {
        let now = self.clock.now_epoch();
        let shown = self.display_shown.load(Ordering::SeqCst);
        let mut due_snapshot = None;

        {
            let mut cycle = self.cycle_state();
            let Some(state) = cycle.as_mut() else {
                return;
            };

            state.advance(now);
            if shown {
                self.display
                    .update(&format_countdown(state.remaining_seconds()));
            }

            if state.is_due() {
                state.rearm();
                if shown {
                    self.display
                        .update(&format_countdown(state.remaining_seconds()));
                }
                due_snapshot = Some(self.settings.snapshot());
            }
        }
        // Lock released before delivery so a concurrent stop is never held up

        if let Some(settings) = due_snapshot {
            self.dispatcher.fire(&settings);
        }
    }

    /// Cancel the tick task, remove the countdown display, and drop the
    /// cycle state. Calling while stopped is a no-op.
    pub fn stop(&self) {
        if let Some(task) = self.tick_slot().take() {
            task.abort();
        }

        let stopped = self.cycle_state().take().is_some();
        if self.display_shown.swap(false, Ordering::SeqCst) {
            self.display.hide();
        }
        if stopped {
            info!("reminder timer stopped");
        }
    }

    /// Show or hide the countdown while running. Has no effect while
    /// stopped; the flag is consulted again at the next start.
    pub fn set_display_enabled(&self, enabled: bool) {
        let cycle = self.cycle_state();
        let Some(state) = cycle.as_ref() else {
            return;
        };
        let was_shown = self.display_shown.swap(enabled, Ordering::SeqCst);
        if enabled {
            self.display.show(&format_countdown(state.remaining_seconds()));
        } else if was_shown {
            self.display.hide();
        }
    }

    pub fn is_running(&self) -> bool {
        self.cycle_state().is_some()
    }

    /// Remaining seconds of the current cycle, as of the latest tick
    pub fn remaining_seconds(&self) -> Option<u64> {
        self.cycle_state().as_ref().map(TimerState::remaining_seconds)
    }

    fn spawn_tick_task(self: &Arc<Self>) {
        let engine = Arc::clone(self);
        let task = tokio::spawn(async move {
            let mut ticker = interval(Duration::from_secs(1));
            // The first tick of a tokio interval resolves immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                engine.tick();
            }
        });

        if let Some(previous) = self.tick_slot().replace(task) {
            // Unreachable while the cycle guard holds; abort rather than
            // leak if it ever happens
            warn!("replacing a live tick task");
            previous.abort();
        }
    }

    fn cycle_state(&self) -> MutexGuard<'_, Option<TimerState>> {
        self.cycle.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn tick_slot(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.tick_task.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
