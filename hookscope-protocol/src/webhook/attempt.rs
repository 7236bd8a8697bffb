use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Reason shown for an attempt when neither the timeline nor the log carries one.
pub const INITIAL_ATTEMPT_REASON: &str = "Initial delivery attempt";

/// One HTTP call in the retry sequence of a webhook push.
///
/// Derived on demand for the detail view and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryAttempt {
    pub attempt: u32,
    /// ISO-8601 timestamp.
    pub timestamp: String,
    pub status: u16,
    /// Duration in milliseconds.
    pub duration: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Untrusted entry of a retry timeline.
///
/// Every field is kept as raw JSON so that wrong types surface as gaps
/// to fill rather than as decoding failures.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RetryTimelineItem {
    pub attempt: Option<Value>,
    pub timestamp: Option<Value>,
    pub duration: Option<Value>,
    pub status: Option<Value>,
    pub reason: Option<Value>,
}

impl RetryTimelineItem {
    /// Reads an entry out of a parsed timeline element; non-objects yield an empty item.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(_) => Self::deserialize(value).unwrap_or_default(),
            _ => Self::default(),
        }
    }

    pub fn reason_str(&self) -> Option<&str> {
        self.reason.as_ref().and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn timeline_item_tolerates_wrong_types() {
        let item = RetryTimelineItem::from_value(&json!({
            "attempt": "one",
            "timestamp": 1718542500000_u64,
            "reason": 42
        }));
        assert_eq!(item.attempt, Some(json!("one")));
        assert_eq!(item.timestamp, Some(json!(1718542500000_u64)));
        assert!(item.reason_str().is_none());
        assert!(item.status.is_none());
    }

    #[test]
    fn non_object_entries_are_empty() {
        assert_eq!(RetryTimelineItem::from_value(&json!(7)), RetryTimelineItem::default());
        assert_eq!(RetryTimelineItem::from_value(&json!(null)), RetryTimelineItem::default());
    }
}
