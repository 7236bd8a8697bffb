//! Hookscope: webhook delivery log console.
//!
//! The workspace is split into:
//!
//! * `hookscope-core`: configuration, errors, logging and serde helpers
//! * `hookscope-protocol`: wire types for logs, attempts, metrics and table criteria
//! * `hookscope-logs`: the filter engine, attempt normalizer, metrics extractor and HTTP service
//! * `hookscope-cli`: the `hookscope` command-line client

use std::future::Future;

use tokio::net::TcpListener;
use tracing::info;

pub use hookscope_core as core;
pub use hookscope_logs as logs;
pub use hookscope_protocol as protocol;

pub use hookscope_core::config::CoreConfig;
pub use hookscope_core::errors::HookscopeError;
pub use hookscope_logs::{
    build_delivery_attempts, extract_metrics, filter_collection, router, select_page, AppState,
    WebhookLogRepository,
};
pub use hookscope_protocol::prelude;

/// Version of the HTTP API served under `/v1`.
pub const API_VERSION: &str = "v1";

/// Serves the webhook log API on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!(%addr, api = API_VERSION, "serving webhook logs");
    axum::serve(listener, router(state).into_make_service())
        .with_graceful_shutdown(shutdown)
        .await
}
