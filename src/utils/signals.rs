//! Session-end signal handling

use futures::stream::StreamExt;
use signal_hook_tokio::Signals;
use tracing::info;

/// Resolve when the session is ending (SIGTERM or SIGINT). The caller runs
/// the same teardown as an explicit deactivation, so a dying session never
/// leaves the timer-enabled flag behind.
pub async fn session_end_signal() {
    let mut signals = Signals::new([
        signal_hook::consts::SIGTERM,
        signal_hook::consts::SIGINT,
    ])
    .expect("Failed to create signal handler");

    if let Some(signal) = signals.next().await {
        info!("received session-end signal: {}", signal);
    }
}
