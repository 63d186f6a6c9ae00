//! Shared fakes for exercising the timer core without a desktop

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, Mutex,
};

use tokio::sync::watch;

use crate::services::{
    Clock, CountdownDisplay, Notifier, ReminderDispatcher, ReminderNote, SoundPlayer,
};
use crate::settings::{Settings, SettingsStore};
use crate::state::AppState;
use crate::tasks::TimerEngine;

const START_EPOCH: u64 = 1_000_000;

/// Manually stepped clock
pub struct FakeClock {
    now: AtomicU64,
}

impl FakeClock {
    pub fn at(epoch: u64) -> Self {
        Self {
            now: AtomicU64::new(epoch),
        }
    }

    pub fn advance(&self, seconds: u64) {
        self.now.fetch_add(seconds, Ordering::SeqCst);
    }

    pub fn rewind(&self, seconds: u64) {
        self.now.fetch_sub(seconds, Ordering::SeqCst);
    }
}

impl Clock for FakeClock {
    fn now_epoch(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayEvent {
    Shown(String),
    Updated(String),
    Hidden,
}

/// Records every display call in order
#[derive(Default)]
pub struct RecordingDisplay {
    events: Mutex<Vec<DisplayEvent>>,
}

impl RecordingDisplay {
    pub fn events(&self) -> Vec<DisplayEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl CountdownDisplay for RecordingDisplay {
    fn show(&self, text: &str) {
        self.events
            .lock()
            .unwrap()
            .push(DisplayEvent::Shown(text.to_string()));
    }

    fn update(&self, text: &str) {
        self.events
            .lock()
            .unwrap()
            .push(DisplayEvent::Updated(text.to_string()));
    }

    fn hide(&self) {
        self.events.lock().unwrap().push(DisplayEvent::Hidden);
    }
}

/// Captures reminder notes instead of showing them
#[derive(Default)]
pub struct RecordingNotifier {
    notes: Mutex<Vec<ReminderNote>>,
}

impl RecordingNotifier {
    pub fn notes(&self) -> Vec<ReminderNote> {
        self.notes.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, note: &ReminderNote) -> Result<(), String> {
        self.notes.lock().unwrap().push(note.clone());
        Ok(())
    }
}

/// Captures requested sound events
#[derive(Default)]
pub struct RecordingSound {
    played: Mutex<Vec<String>>,
}

impl RecordingSound {
    pub fn played(&self) -> Vec<String> {
        self.played.lock().unwrap().clone()
    }
}

impl SoundPlayer for RecordingSound {
    fn play(&self, sound_name: &str) -> Result<(), String> {
        self.played.lock().unwrap().push(sound_name.to_string());
        Ok(())
    }
}

/// A timer engine wired entirely to fakes
pub struct EngineHarness {
    pub engine: Arc<TimerEngine>,
    pub clock: Arc<FakeClock>,
    pub display: Arc<RecordingDisplay>,
    pub notifier: Arc<RecordingNotifier>,
    pub sound: Arc<RecordingSound>,
    pub settings: Arc<SettingsStore>,
}

impl EngineHarness {
    pub fn with_settings(settings: Settings) -> Self {
        let clock = Arc::new(FakeClock::at(START_EPOCH));
        let display = Arc::new(RecordingDisplay::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let sound = Arc::new(RecordingSound::default());
        let settings = Arc::new(SettingsStore::in_memory(settings));

        let dispatcher =
            ReminderDispatcher::new(Arc::clone(&notifier) as _, Arc::clone(&sound) as _);
        let engine = Arc::new(TimerEngine::new(
            Arc::clone(&clock) as _,
            Arc::clone(&display) as _,
            dispatcher,
            Arc::clone(&settings),
        ));

        Self {
            engine,
            clock,
            display,
            notifier,
            sound,
            settings,
        }
    }
}

/// A full application state wired to fakes
pub struct AppHarness {
    pub state: Arc<AppState>,
    pub clock: Arc<FakeClock>,
    pub display: Arc<RecordingDisplay>,
    pub notifier: Arc<RecordingNotifier>,
    pub sound: Arc<RecordingSound>,
    _countdown_tx: watch::Sender<Option<String>>,
}

impl AppHarness {
    pub fn with_settings(settings: Settings) -> Self {
        let engine = EngineHarness::with_settings(settings);
        let (countdown_tx, countdown_rx) = watch::channel(None);

        let state = Arc::new(AppState::new(
            Arc::clone(&engine.settings),
            Arc::clone(&engine.engine),
            countdown_rx,
            "127.0.0.1".to_string(),
            0,
        ));

        Self {
            state,
            clock: engine.clock,
            display: engine.display,
            notifier: engine.notifier,
            sound: engine.sound,
            _countdown_tx: countdown_tx,
        }
    }
}
