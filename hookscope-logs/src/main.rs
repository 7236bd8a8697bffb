use std::net::SocketAddr;

use hookscope_core::config::{load_core_config, CoreConfig};
use hookscope_core::errors::HookscopeError;
use hookscope_core::logging;
use hookscope_logs::{router, AppState, WebhookLogRepository};
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    if let Err(err) = logging::init_tracing(None) {
        eprintln!("failed to initialise tracing: {err}");
    }

    let config: CoreConfig = load_core_config()?;
    let bind_addr: SocketAddr = config.http_bind.parse()?;

    if config.is_production() && config.data_file().is_none() {
        warn!("no HOOKSCOPE_DATA_FILE configured; starting with an empty log store");
    }
    let repository = WebhookLogRepository::from_config(&config).await?;
    let state = AppState::new(repository, config.default_page_size);
    let app = router(state);

    let listener = TcpListener::bind(bind_addr).await?;
    let actual_addr = listener.local_addr()?;
    info!(%actual_addr, node = %config.node_name, "starting hookscope-logs service");
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(%err, "failed to listen for shutdown signal");
    }
    info!("shutting down hookscope-logs service");
}

#[derive(Debug, thiserror::Error)]
enum ServerError {
    #[error("failed to bind webhook log service: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid bind address: {0}")]
    Addr(#[from] std::net::AddrParseError),
    #[error("configuration error: {0}")]
    Config(#[from] HookscopeError),
}
