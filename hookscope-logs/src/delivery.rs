//! Reconstruction of webhook delivery attempts from a log's retry timeline.

use chrono::{SecondsFormat, TimeZone, Utc};
use hookscope_protocol::webhook::{
    keys, DeliveryAttempt, MetricValue, RetryTimelineItem, WebhookLog, INITIAL_ATTEMPT_REASON,
};
use serde_json::Value;
use tracing::error;

const EMPTY_TIMELINE: &str = "[]";

/// Builds the ordered delivery attempts of `log`.
///
/// The retry timeline metric is a JSON array of untrusted entries. When it
/// is absent, empty, malformed or not an array, a single attempt is
/// derived from the log itself. The result is never empty and depends
/// only on `log`.
pub fn build_delivery_attempts(log: &WebhookLog) -> Vec<DeliveryAttempt> {
    let raw = match log.metric(keys::RETRY_TIMELINE).and_then(MetricValue::as_str) {
        Some(raw) if !raw.is_empty() && raw != EMPTY_TIMELINE => raw,
        _ => return vec![fallback_attempt(log)],
    };

    let parsed: Value = match serde_json::from_str(raw) {
        Ok(parsed) => parsed,
        Err(err) => {
            error!(
                request_id = %log.request_id,
                %err,
                "failed to parse webhook retry timeline"
            );
            return vec![fallback_attempt(log)];
        }
    };

    let entries = match parsed.as_array() {
        Some(entries) if !entries.is_empty() => entries,
        _ => return vec![fallback_attempt(log)],
    };

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| attempt_from_entry(log, index, &RetryTimelineItem::from_value(entry)))
        .collect()
}

/// Single attempt standing in for a log without a usable timeline.
pub fn fallback_attempt(log: &WebhookLog) -> DeliveryAttempt {
    DeliveryAttempt {
        attempt: 1,
        timestamp: log.timestamp.clone(),
        status: log.status,
        duration: log.gateway_response_time,
        reason: Some(default_reason(log)),
    }
}

fn attempt_from_entry(log: &WebhookLog, index: usize, item: &RetryTimelineItem) -> DeliveryAttempt {
    let position = u32::try_from(index + 1).unwrap_or(u32::MAX);

    DeliveryAttempt {
        attempt: item.attempt.as_ref().and_then(whole_number).unwrap_or(position),
        timestamp: entry_timestamp(log, item.timestamp.as_ref()),
        status: item
            .status
            .as_ref()
            .and_then(whole_number)
            .unwrap_or(log.status),
        duration: item
            .duration
            .as_ref()
            .and_then(whole_number)
            .unwrap_or(log.gateway_response_time),
        reason: Some(
            item.reason_str()
                .map(str::to_string)
                .unwrap_or_else(|| default_reason(log)),
        ),
    }
}

fn default_reason(log: &WebhookLog) -> String {
    log.metric(keys::LAST_ERROR)
        .and_then(MetricValue::as_str)
        .unwrap_or(INITIAL_ATTEMPT_REASON)
        .to_string()
}

/// Epoch milliseconds become ISO-8601; strings pass through untouched.
fn entry_timestamp(log: &WebhookLog, value: Option<&Value>) -> String {
    match value {
        Some(Value::String(timestamp)) => timestamp.clone(),
        Some(Value::Number(millis)) => millis
            .as_f64()
            .filter(|millis| millis.is_finite())
            .and_then(|millis| Utc.timestamp_millis_opt(millis.trunc() as i64).single())
            .map(|at| at.to_rfc3339_opts(SecondsFormat::Millis, true))
            .unwrap_or_else(|| log.timestamp.clone()),
        _ => log.timestamp.clone(),
    }
}

/// Non-negative number, truncated, that fits in `T`.
fn whole_number<T: TryFrom<u64>>(value: &Value) -> Option<T> {
    let whole = value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|n| n.is_finite() && *n >= 0.0)
            .map(|n| n.trunc() as u64)
    })?;
    T::try_from(whole).ok()
}
