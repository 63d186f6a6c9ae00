//! Stretch Break - a break reminder daemon
//!
//! This is the main entry point for the stretch-break application.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use stretch_break::{
    api::create_router,
    config::Config,
    services::{DesktopNotifier, FreedesktopSound, ReminderDispatcher, StatusDisplay, SystemClock},
    settings::SettingsStore,
    state::AppState,
    tasks::TimerEngine,
    utils::session_end_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "stretch_break={},tower_http=info",
            config.log_level()
        ))
        .init();

    info!("starting stretch-break v{}", env!("CARGO_PKG_VERSION"));

    // Load persisted settings
    let settings = Arc::new(SettingsStore::open(config.settings.clone())?);
    let snapshot = settings.snapshot();
    info!(
        "settings: interval={}min, auto-start={}, show-timer={}",
        snapshot.interval_min, snapshot.auto_start, snapshot.show_timer
    );

    // Wire the timer core to its desktop collaborators
    let (display, countdown) = StatusDisplay::new();
    let dispatcher = ReminderDispatcher::new(
        Arc::new(DesktopNotifier::new()),
        Arc::new(FreedesktopSound::new()),
    );
    let engine = Arc::new(TimerEngine::new(
        Arc::new(SystemClock),
        Arc::new(display),
        dispatcher,
        Arc::clone(&settings),
    ));

    // Create application state
    let state = Arc::new(AppState::new(
        settings,
        engine,
        countdown,
        config.host.clone(),
        config.port,
    ));

    // Start the settings watcher and honor auto-start
    state.activate();

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("control API running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /enable    - Turn the reminder timer on");
    info!("  POST /disable   - Turn the reminder timer off");
    info!("  GET  /settings  - Read current settings");
    info!("  PUT  /settings  - Update settings");
    info!("  GET  /status    - Timer status and live countdown");
    info!("  GET  /health    - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = session_end_signal() => {
            info!("session ending");
        }
    }

    // Same teardown as an explicit deactivation, so the enabled flag never
    // outlives the process
    state.deactivate();

    info!("shutdown complete");
    Ok(())
}
