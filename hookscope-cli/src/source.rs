use std::path::Path;

use async_trait::async_trait;
use hookscope_core::errors::HookscopeError;
use hookscope_logs::{
    build_delivery_attempts, extract_metrics, filter_options, select_page, TableState,
    WebhookLogRepository,
};
use hookscope_protocol::webhook::{
    FilterOptions, LogsQueryParams, WebhookLogDetail, WebhookLogsResponse,
};
use reqwest::Url;
use serde::Deserialize;
use tracing::debug;

const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("HTTP request failed: {0}")]
    Http(String),
    #[error("service returned an error: {0}")]
    Service(String),
    #[error(transparent)]
    Local(#[from] HookscopeError),
    #[error("{0}")]
    Validation(String),
}

impl From<reqwest::Error> for CliError {
    fn from(value: reqwest::Error) -> Self {
        Self::Http(value.to_string())
    }
}

/// Where webhook logs are read from.
#[async_trait]
pub trait LogSource {
    async fn list(
        &self,
        api_id: &str,
        params: &LogsQueryParams,
    ) -> Result<WebhookLogsResponse, CliError>;

    async fn detail(&self, api_id: &str, request_id: &str) -> Result<WebhookLogDetail, CliError>;

    async fn options(&self, api_id: &str) -> Result<FilterOptions, CliError>;
}

/// Logs read from a local NDJSON export.
pub struct FileSource {
    repository: WebhookLogRepository,
}

impl FileSource {
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, CliError> {
        let repository = WebhookLogRepository::load_ndjson(path).await?;
        Ok(Self { repository })
    }
}

#[async_trait]
impl LogSource for FileSource {
    async fn list(
        &self,
        api_id: &str,
        params: &LogsQueryParams,
    ) -> Result<WebhookLogsResponse, CliError> {
        let table = TableState::from_query(params, DEFAULT_PAGE_SIZE);
        let logs = self.repository.list(api_id).await;
        Ok(select_page(
            &logs,
            &table.filters,
            table.pagination,
            table.sort.as_ref(),
        ))
    }

    async fn detail(&self, api_id: &str, request_id: &str) -> Result<WebhookLogDetail, CliError> {
        let log = self.repository.get(api_id, request_id).await?;
        let attempts = build_delivery_attempts(&log);
        let metrics = extract_metrics(&log.additional_metrics);
        Ok(WebhookLogDetail {
            log,
            attempts,
            metrics,
        })
    }

    async fn options(&self, api_id: &str) -> Result<FilterOptions, CliError> {
        let logs = self.repository.list(api_id).await;
        Ok(filter_options(&logs))
    }
}

/// Logs served by a running `hookscope-logs` service.
pub struct HttpSource {
    base_url: Url,
    http: reqwest::Client,
}

impl HttpSource {
    pub fn new(base_url: &str) -> Result<Self, CliError> {
        let url = Url::parse(base_url)
            .map_err(|err| CliError::Validation(format!("invalid service URL: {err}")))?;
        Ok(Self {
            base_url: url,
            http: reqwest::Client::new(),
        })
    }

    fn endpoint(&self, api_id: &str, suffix: &str) -> Result<Url, CliError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| CliError::Validation("service URL cannot be a base".into()))?
            .pop_if_empty()
            .extend(["v1", "apis", api_id, "webhook-logs"])
            .extend(suffix.split('/').filter(|segment| !segment.is_empty()));
        Ok(url)
    }
}

#[async_trait]
impl LogSource for HttpSource {
    async fn list(
        &self,
        api_id: &str,
        params: &LogsQueryParams,
    ) -> Result<WebhookLogsResponse, CliError> {
        let url = self.endpoint(api_id, "")?;
        debug!(%url, ?params, "requesting webhook logs");
        let response = self.http.get(url).query(params).send().await?;
        parse_response(response).await
    }

    async fn detail(&self, api_id: &str, request_id: &str) -> Result<WebhookLogDetail, CliError> {
        let mut url = self.endpoint(api_id, "")?;
        url.path_segments_mut()
            .map_err(|_| CliError::Validation("service URL cannot be a base".into()))?
            .push(request_id);
        debug!(%url, "requesting webhook log detail");
        let response = self.http.get(url).send().await?;
        parse_response(response).await
    }

    async fn options(&self, api_id: &str) -> Result<FilterOptions, CliError> {
        let url = self.endpoint(api_id, "filter-options")?;
        let response = self.http.get(url).send().await?;
        parse_response(response).await
    }
}

async fn parse_response<T: for<'de> Deserialize<'de>>(
    response: reqwest::Response,
) -> Result<T, CliError> {
    if response.status().is_success() {
        response
            .json::<T>()
            .await
            .map_err(|err| CliError::Http(err.to_string()))
    } else {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        match serde_json::from_str::<ServiceError>(&body) {
            Ok(err) => Err(CliError::Service(format!("{status}: {}", err.error))),
            Err(_) => Err(CliError::Service(format!("{status}: {body}"))),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ServiceError {
    error: String,
}
