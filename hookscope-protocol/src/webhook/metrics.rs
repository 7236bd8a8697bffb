use serde::{Deserialize, Serialize};

/// Metric keys read from a log's additional metrics map.
///
/// Keys follow `{type}_webhook_{field}`. Producers disagree on the exact
/// spelling, so each field lists every accepted key in lookup order.
pub mod keys {
    pub const RESPONSE_TIME: &[&str] = &["long_webhook_responseTime", "long_webhook_resp-time"];
    pub const STATUS: &[&str] = &["int_webhook_status", "int_webhook_resp-status"];
    pub const RETRY_COUNT: &[&str] = &["int_webhook_retry_count", "int_webhook_retry-count"];
    pub const PAYLOAD_SIZE: &[&str] = &["long_webhook_payload_size", "long_webhook_payload-size"];
    pub const REQUEST_TIMESTAMP: &[&str] = &[
        "long_webhook_request_timestamp",
        "long_webhook_req-timestamp",
    ];
    pub const RETRY_TIMELINE: &[&str] = &[
        "string_webhook_retry_timeline",
        "json_webhook_retry-timeline",
    ];
    pub const LAST_ERROR: &[&str] = &["string_webhook_last_error", "string_webhook_last-error"];
    pub const REQUEST_METHOD: &[&str] = &["int_webhook_request_method", "string_webhook_req-method"];
    pub const REQUEST_BODY: &[&str] = &["string_webhook_request_body", "string_webhook_req-body"];
    pub const REQUEST_HEADERS: &[&str] = &[
        "string_webhook_request_headers",
        "string_webhook_req-headers",
    ];
    pub const RESPONSE_BODY: &[&str] = &["string_webhook_response_body", "string_webhook_resp-body"];
    pub const RESPONSE_HEADERS: &[&str] = &[
        "string_webhook_response_headers",
        "string_webhook_resp-headers",
    ];
    pub const URL: &[&str] = &["string_webhook_url"];
    pub const APPLICATION_ID: &[&str] = &["keyword_webhook_application_id", "keyword_webhook_app-id"];
    pub const SUBSCRIPTION_ID: &[&str] = &[
        "keyword_webhook_subscription_id",
        "keyword_webhook_sub-id",
    ];
    pub const DLQ: &[&str] = &["bool_webhook_dlq", "boolean_webhook_dl_queue"];
}

/// Typed view over the loosely typed webhook metrics map.
///
/// Required numeric fields default to zero; everything else is absent
/// unless the raw value already had the declared type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookMetrics {
    pub response_time: u64,
    pub status: u16,
    pub retry_count: u32,
    pub payload_size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timestamp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_timeline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_headers: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_headers: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dlq: Option<bool>,
}
