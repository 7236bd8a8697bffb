use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use hookscope_core::errors::HookscopeError;
use hookscope_protocol::webhook::{
    FilterOptions, LogsQueryParams, WebhookLog, WebhookLogDetail, WebhookLogsResponse,
};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::delivery::build_delivery_attempts;
use crate::filters::{filter_options, select_page};
use crate::metrics::extract_metrics;
use crate::repository::WebhookLogRepository;
use crate::view::TableState;

#[derive(Clone)]
pub struct AppState {
    pub repository: WebhookLogRepository,
    pub default_page_size: usize,
}

impl AppState {
    pub fn new(repository: WebhookLogRepository, default_page_size: usize) -> Self {
        Self {
            repository,
            default_page_size: default_page_size.max(1),
        }
    }
}

/// HTTP routes of the webhook log service.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route(
            "/v1/apis/:api_id/webhook-logs",
            get(list_logs).post(create_log),
        )
        .route(
            "/v1/apis/:api_id/webhook-logs/filter-options",
            get(list_filter_options),
        )
        .route("/v1/apis/:api_id/webhook-logs/:request_id", get(get_log))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "ok"
}

type AppResult<T> = Result<T, AppError>;

async fn list_logs(
    State(state): State<AppState>,
    Path(api_id): Path<String>,
    query: Result<Query<LogsQueryParams>, QueryRejection>,
) -> AppResult<Json<WebhookLogsResponse>> {
    let Query(params) = query?;
    let table = TableState::from_query(&params, state.default_page_size);
    let logs = state.repository.list(&api_id).await;
    let response = select_page(
        &logs,
        &table.filters,
        table.pagination,
        table.sort.as_ref(),
    );
    debug!(
        %api_id,
        total = response.pagination.total_count,
        page = response.pagination.page,
        "listed webhook logs"
    );
    Ok(Json(response))
}

async fn list_filter_options(
    State(state): State<AppState>,
    Path(api_id): Path<String>,
) -> AppResult<Json<FilterOptions>> {
    let logs = state.repository.list(&api_id).await;
    Ok(Json(filter_options(&logs)))
}

async fn get_log(
    State(state): State<AppState>,
    Path((api_id, request_id)): Path<(String, String)>,
) -> AppResult<Json<WebhookLogDetail>> {
    let log = state.repository.get(&api_id, &request_id).await?;
    let attempts = build_delivery_attempts(&log);
    let metrics = extract_metrics(&log.additional_metrics);
    Ok(Json(WebhookLogDetail {
        log,
        attempts,
        metrics,
    }))
}

async fn create_log(
    State(state): State<AppState>,
    Path(api_id): Path<String>,
    payload: Result<Json<WebhookLog>, JsonRejection>,
) -> AppResult<(StatusCode, Json<WebhookLog>)> {
    let Json(mut log) = payload?;
    if log.request_id.trim().is_empty() {
        return Err(AppError::bad_request("requestId must not be empty"));
    }
    log.api_id = api_id;
    info!(api_id = %log.api_id, request_id = %log.request_id, "storing webhook log");
    state.repository.insert(log.clone()).await;
    Ok((StatusCode::CREATED, Json(log)))
}

#[derive(Debug, Clone)]
pub struct AppError {
    status: StatusCode,
    message: String,
}

impl AppError {
    fn bad_request<M: Into<String>>(message: M) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn not_found<M: Into<String>>(message: M) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    fn internal<M: Into<String>>(message: M) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.message }));
        (self.status, body).into_response()
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::bad_request(rejection.body_text())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(rejection.body_text())
    }
}

impl From<HookscopeError> for AppError {
    fn from(err: HookscopeError) -> Self {
        match err {
            HookscopeError::InvalidCriteria(message) => AppError::bad_request(message),
            HookscopeError::LogNotFound(id) => {
                AppError::not_found(format!("webhook log not found: {id}"))
            }
            other => AppError::internal(other.to_string()),
        }
    }
}
