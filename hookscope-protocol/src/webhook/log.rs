use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Raw value of an entry in a log's additional metrics map.
///
/// The backend serializes metrics loosely: the same key can arrive as a
/// string, a number, a boolean or `null` depending on the producer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Bool(bool),
    Number(Number),
    Text(String),
    Null,
}

impl MetricValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetricValue::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            MetricValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, MetricValue::Null)
    }
}

impl From<&str> for MetricValue {
    fn from(value: &str) -> Self {
        MetricValue::Text(value.to_string())
    }
}

impl From<String> for MetricValue {
    fn from(value: String) -> Self {
        MetricValue::Text(value)
    }
}

impl From<bool> for MetricValue {
    fn from(value: bool) -> Self {
        MetricValue::Bool(value)
    }
}

impl From<i64> for MetricValue {
    fn from(value: i64) -> Self {
        MetricValue::Number(value.into())
    }
}

impl From<u64> for MetricValue {
    fn from(value: u64) -> Self {
        MetricValue::Number(value.into())
    }
}

/// Application that owns the subscription a webhook was pushed for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRef {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_mode: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRef {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}

/// Connection-log record of one webhook push (possibly retried).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookLog {
    pub api_id: String,
    pub request_id: String,
    /// ISO-8601 timestamp of the initial request.
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    pub status: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application: Option<ApplicationRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<PlanRef>,
    #[serde(default)]
    pub request_ended: bool,
    /// Total gateway response time in milliseconds.
    #[serde(default)]
    pub gateway_response_time: u64,
    #[serde(default)]
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
    /// Human readable duration, e.g. `2.8 s`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default)]
    pub additional_metrics: BTreeMap<String, MetricValue>,
}

impl WebhookLog {
    /// Minimal log record; everything optional is left empty.
    pub fn new(
        api_id: impl Into<String>,
        request_id: impl Into<String>,
        timestamp: impl Into<String>,
        status: u16,
    ) -> Self {
        Self {
            api_id: api_id.into(),
            request_id: request_id.into(),
            timestamp: timestamp.into(),
            method: None,
            status,
            application: None,
            plan: None,
            request_ended: true,
            gateway_response_time: 0,
            uri: String::new(),
            endpoint: None,
            callback_url: None,
            duration: None,
            additional_metrics: BTreeMap::new(),
        }
    }

    pub fn with_metric(mut self, key: impl Into<String>, value: impl Into<MetricValue>) -> Self {
        self.additional_metrics.insert(key.into(), value.into());
        self
    }

    pub fn with_application(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.application = Some(ApplicationRef {
            id: id.into(),
            name: name.into(),
            kind: None,
            api_key_mode: None,
        });
        self
    }

    pub fn with_callback_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.uri = url.clone();
        self.callback_url = Some(url);
        self
    }

    pub fn with_response_time(mut self, millis: u64) -> Self {
        self.gateway_response_time = millis;
        self
    }

    /// URL the webhook was pushed to: the callback URL, or the request URI.
    pub fn callback_target(&self) -> &str {
        match self.callback_url.as_deref() {
            Some(url) if !url.is_empty() => url,
            _ => &self.uri,
        }
    }

    /// First present metric among `keys`; explicit `null`s are skipped.
    pub fn metric(&self, keys: &[&str]) -> Option<&MetricValue> {
        keys.iter()
            .filter_map(|key| self.additional_metrics.get(*key))
            .find(|value| !value.is_null())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_values_decode_every_backend_shape() {
        let raw = serde_json::json!({
            "apiId": "api-1",
            "requestId": "req-1",
            "timestamp": "2025-06-15T12:00:00.000Z",
            "status": 200,
            "additionalMetrics": {
                "int_webhook_status": 200,
                "string_webhook_last_error": null,
                "boolean_webhook_dl_queue": false,
                "string_webhook_url": "https://example.com/hook"
            }
        });
        let log: WebhookLog = serde_json::from_value(raw).expect("decode");
        let metrics = &log.additional_metrics;
        assert!(matches!(metrics["int_webhook_status"], MetricValue::Number(_)));
        assert!(metrics["string_webhook_last_error"].is_null());
        assert_eq!(metrics["boolean_webhook_dl_queue"].as_bool(), Some(false));
        assert_eq!(
            metrics["string_webhook_url"].as_str(),
            Some("https://example.com/hook")
        );
    }

    #[test]
    fn callback_target_falls_back_to_uri() {
        let mut log = WebhookLog::new("api", "req", "2025-06-15T12:00:00.000Z", 200);
        log.uri = "https://fallback.example.com".into();
        assert_eq!(log.callback_target(), "https://fallback.example.com");
        log.callback_url = Some("https://hook.example.com".into());
        assert_eq!(log.callback_target(), "https://hook.example.com");
    }

    #[test]
    fn metric_lookup_skips_nulls_and_honours_key_order() {
        let log = WebhookLog::new("api", "req", "2025-06-15T12:00:00.000Z", 200)
            .with_metric("a", MetricValue::Null)
            .with_metric("b", "second")
            .with_metric("c", "third");
        assert_eq!(log.metric(&["a", "b", "c"]).and_then(MetricValue::as_str), Some("second"));
        assert!(log.metric(&["missing"]).is_none());
    }
}
