//! Sound alert playback

use tokio::process::Command;
use tracing::debug;

/// Plays a short alert sound identified by a sound-theme event id
pub trait SoundPlayer: Send + Sync {
    fn play(&self, sound_name: &str) -> Result<(), String>;
}

/// Plays freedesktop sound-theme events through `canberra-gtk-play`
pub struct FreedesktopSound;

impl FreedesktopSound {
    pub fn new() -> Self {
        Self
    }
}

impl SoundPlayer for FreedesktopSound {
    fn play(&self, sound_name: &str) -> Result<(), String> {
        debug!("playing sound event {}", sound_name);

        // Fire and forget: the child is detached and reaped by the runtime
        Command::new("canberra-gtk-play")
            .args(["--id", sound_name])
            .spawn()
            .map(|_| ())
            .map_err(|e| format!("failed to spawn canberra-gtk-play: {}", e))
    }
}
