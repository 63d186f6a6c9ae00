//! Settings persistence and change notification

use std::{
    path::PathBuf,
    sync::{Mutex, MutexGuard, PoisonError},
};

use anyhow::Context;
use tokio::sync::broadcast;
use tracing::{debug, warn};

use super::values::{SettingKey, Settings, SettingsError, SettingsPatch};

/// App name used for the default per-user config location
const CONFIG_NAME: &str = "stretch-break";

/// Where the settings file lives
enum StoreLocation {
    /// Per-user config directory resolved by confy
    Default,
    /// Explicit path given on the command line
    File(PathBuf),
    /// No persistence, used by tests
    Memory,
}

/// Holds the current settings, persists every change, and broadcasts one
/// change event per key whose value actually changed. Consumers re-read
/// values at the point of use, so events carry only the key.
pub struct SettingsStore {
    values: Mutex<Settings>,
    location: StoreLocation,
    changes: broadcast::Sender<SettingKey>,
}

impl SettingsStore {
    /// Load settings from the given path, or from the default per-user
    /// config location when no path is given. A missing file yields the
    /// documented defaults and is created on the first write.
    pub fn open(path: Option<PathBuf>) -> anyhow::Result<Self> {
        let (values, location) = match path {
            Some(path) => {
                let values = confy::load_path(&path)
                    .with_context(|| format!("failed to load settings from {}", path.display()))?;
                (values, StoreLocation::File(path))
            }
            None => {
                let values = confy::load(CONFIG_NAME, None)
                    .context("failed to load settings from the default config location")?;
                (values, StoreLocation::Default)
            }
        };
        Ok(Self::with(values, location))
    }

    /// A store that never touches disk
    pub fn in_memory(values: Settings) -> Self {
        Self::with(values, StoreLocation::Memory)
    }

    fn with(values: Settings, location: StoreLocation) -> Self {
        let (changes, _) = broadcast::channel(64);
        Self {
            values: Mutex::new(values),
            location,
            changes,
        }
    }

    /// Subscribe to change events. Events queued before the first poll are
    /// retained by the channel, so subscribing before spawning a consumer
    /// task cannot miss updates.
    pub fn subscribe(&self) -> broadcast::Receiver<SettingKey> {
        self.changes.subscribe()
    }

    pub fn snapshot(&self) -> Settings {
        self.read().clone()
    }

    pub fn timer_enabled(&self) -> bool {
        self.read().timer_enabled
    }

    pub fn auto_start(&self) -> bool {
        self.read().auto_start
    }

    pub fn show_timer(&self) -> bool {
        self.read().show_timer
    }

    pub fn interval_min(&self) -> u32 {
        self.read().interval_min
    }

    /// Flip the master switch. Persists and emits only on an actual change.
    pub fn set_timer_enabled(&self, enabled: bool) {
        let changed = {
            let mut values = self.write();
            if values.timer_enabled == enabled {
                false
            } else {
                values.timer_enabled = enabled;
                true
            }
        };
        if changed {
            self.persist();
            self.emit(SettingKey::TimerEnabled);
        }
    }

    /// Apply a validated partial update and return the resulting snapshot.
    /// One change event is emitted per key whose value changed.
    pub fn apply(&self, patch: &SettingsPatch) -> Result<Settings, SettingsError> {
        patch.validate()?;
        let (snapshot, changed) = {
            let mut values = self.write();
            let changed = patch.apply_to(&mut values);
            (values.clone(), changed)
        };
        if !changed.is_empty() {
            self.persist();
            for key in changed {
                self.emit(key);
            }
        }
        Ok(snapshot)
    }

    fn emit(&self, key: SettingKey) {
        debug!("setting changed: {}", key.as_str());
        // No receivers is fine: nobody is watching yet, or teardown ran
        let _ = self.changes.send(key);
    }

    /// Write the current snapshot to disk. Persistence failures are logged
    /// and do not roll back the in-memory change.
    fn persist(&self) {
        let snapshot = self.snapshot();
        let result = match &self.location {
            StoreLocation::Default => confy::store(CONFIG_NAME, None, &snapshot),
            StoreLocation::File(path) => confy::store_path(path, &snapshot),
            StoreLocation::Memory => return,
        };
        if let Err(e) = result {
            warn!("failed to persist settings: {}", e);
        }
    }

    fn read(&self) -> MutexGuard<'_, Settings> {
        self.values.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> MutexGuard<'_, Settings> {
        self.values.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
