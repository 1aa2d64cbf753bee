//! Wiring & DI. Entry point: bootstrap adapters, inject into presenters, run UI.
//! No presentation logic here; the TUI adapter drives the presenters.

use dotenv::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use tweeter::adapters::fake::{FakeData, FakeFollowService, FakeStatusService, FakeUserService};
use tweeter::adapters::persistence::SessionJson;
use tweeter::adapters::ui::{TerminalView, TuiInputPort};
use tweeter::ports::{FollowService, InputPort, SessionStore, StatusService, UserService};
use tweeter::shared::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    let cfg = AppConfig::load().unwrap_or_default();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(cfg.log_filter_or_default())),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    tweeter::adapters::ui::init_ui();

    // --- Backend: in-memory services over one shared data set ---
    let delay_ms = cfg.service_delay_ms_or_default();
    info!(delay_ms, "simulated backend latency: {} ms", delay_ms);
    let data = Arc::new(FakeData::seeded());
    let users: Arc<dyn UserService> =
        Arc::new(FakeUserService::with_delay(Arc::clone(&data), delay_ms));
    let statuses: Arc<dyn StatusService> =
        Arc::new(FakeStatusService::with_delay(Arc::clone(&data), delay_ms));
    let follows: Arc<dyn FollowService> =
        Arc::new(FakeFollowService::with_delay(Arc::clone(&data), delay_ms));

    // --- Remembered session ---
    let session_path = cfg.session_path_or_default();
    info!(path = %session_path.display(), "session file");
    let sessions: Arc<dyn SessionStore> = Arc::new(SessionJson::new(&session_path));

    // --- Run (sign in / register -> feed, story, profiles) ---
    let view = Arc::new(TerminalView::new());
    let input_port: Arc<dyn InputPort> = Arc::new(TuiInputPort::new(
        view, users, statuses, follows, sessions,
    ));
    input_port
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
