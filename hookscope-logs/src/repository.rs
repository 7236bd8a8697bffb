use std::path::Path;
use std::sync::Arc;

use hookscope_core::config::CoreConfig;
use hookscope_core::errors::{HookscopeError, Result};
use hookscope_core::serde_utils::from_ndjson_str;
use hookscope_protocol::webhook::WebhookLog;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// In-memory store of webhook logs shared by the HTTP handlers.
#[derive(Debug, Clone, Default)]
pub struct WebhookLogRepository {
    logs: Arc<RwLock<Vec<WebhookLog>>>,
}

impl WebhookLogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_logs(logs: Vec<WebhookLog>) -> Self {
        Self {
            logs: Arc::new(RwLock::new(logs)),
        }
    }

    /// Builds the repository from the configured data file, or empty when none is set.
    pub async fn from_config(config: &CoreConfig) -> Result<Self> {
        match config.data_file() {
            Some(path) => Self::load_ndjson(path).await,
            None => Ok(Self::new()),
        }
    }

    /// Loads one log per line; malformed lines are skipped with a warning.
    pub async fn load_ndjson(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = tokio::fs::read_to_string(path).await?;

        let mut logs = Vec::new();
        for parsed in from_ndjson_str::<WebhookLog>(&contents) {
            match parsed {
                Ok(log) => logs.push(log),
                Err((line, err)) => {
                    warn!(path = %path.display(), line, %err, "skipping malformed webhook log")
                }
            }
        }

        info!(path = %path.display(), count = logs.len(), "loaded webhook logs");
        Ok(Self::with_logs(logs))
    }

    /// Stores `log`, replacing any log with the same API and request id.
    pub async fn insert(&self, log: WebhookLog) {
        let mut logs = self.logs.write().await;
        match logs
            .iter_mut()
            .find(|existing| existing.api_id == log.api_id && existing.request_id == log.request_id)
        {
            Some(existing) => *existing = log,
            None => logs.push(log),
        }
    }

    /// Logs of one API, in insertion order.
    pub async fn list(&self, api_id: &str) -> Vec<WebhookLog> {
        self.logs
            .read()
            .await
            .iter()
            .filter(|log| log.api_id == api_id)
            .cloned()
            .collect()
    }

    pub async fn get(&self, api_id: &str, request_id: &str) -> Result<WebhookLog> {
        self.logs
            .read()
            .await
            .iter()
            .find(|log| log.api_id == api_id && log.request_id == request_id)
            .cloned()
            .ok_or_else(|| HookscopeError::LogNotFound(format!("{api_id}/{request_id}")))
    }

    pub async fn len(&self) -> usize {
        self.logs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.logs.read().await.is_empty()
    }
}
