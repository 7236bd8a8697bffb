//! Typed extraction of the `{type}_webhook_{field}` metrics map.

use std::collections::BTreeMap;

use hookscope_protocol::webhook::{keys, MetricValue, WebhookMetrics};

/// Coerces the raw metrics map into [`WebhookMetrics`].
///
/// Numbers are accepted as JSON numbers or as strings that parse to a
/// finite number; NaN and infinities never count as numbers. Unusable
/// values become `0` for required fields and `None` for optional ones.
/// Strings and booleans are never converted from another type, so
/// `"true"` is not a boolean.
pub fn extract_metrics(raw: &BTreeMap<String, MetricValue>) -> WebhookMetrics {
    let number = |candidates: &[&str]| lookup(raw, candidates).and_then(finite_number);
    let text = |candidates: &[&str]| {
        lookup(raw, candidates)
            .and_then(MetricValue::as_str)
            .map(str::to_string)
    };

    // f64 -> integer casts saturate, which clamps out-of-range values.
    WebhookMetrics {
        response_time: number(keys::RESPONSE_TIME).map_or(0, |n| n as u64),
        status: number(keys::STATUS).map_or(0, |n| n as u16),
        retry_count: number(keys::RETRY_COUNT).map_or(0, |n| n as u32),
        payload_size: number(keys::PAYLOAD_SIZE).map_or(0, |n| n as u64),
        request_timestamp: number(keys::REQUEST_TIMESTAMP).map(|n| n as i64),
        retry_timeline: text(keys::RETRY_TIMELINE),
        last_error: text(keys::LAST_ERROR),
        request_method: text(keys::REQUEST_METHOD),
        request_body: text(keys::REQUEST_BODY),
        request_headers: text(keys::REQUEST_HEADERS),
        response_body: text(keys::RESPONSE_BODY),
        response_headers: text(keys::RESPONSE_HEADERS),
        url: text(keys::URL),
        application_id: text(keys::APPLICATION_ID),
        subscription_id: text(keys::SUBSCRIPTION_ID),
        dlq: lookup(raw, keys::DLQ).and_then(MetricValue::as_bool),
    }
}

fn lookup<'a>(raw: &'a BTreeMap<String, MetricValue>, candidates: &[&str]) -> Option<&'a MetricValue> {
    candidates
        .iter()
        .filter_map(|key| raw.get(*key))
        .find(|value| !value.is_null())
}

/// Numeric reading of a metric value; `None` unless finite.
pub fn finite_number(value: &MetricValue) -> Option<f64> {
    let number = match value {
        MetricValue::Number(number) => number.as_f64()?,
        MetricValue::Text(text) => text.trim().parse::<f64>().ok()?,
        MetricValue::Bool(_) | MetricValue::Null => return None,
    };
    number.is_finite().then_some(number)
}
