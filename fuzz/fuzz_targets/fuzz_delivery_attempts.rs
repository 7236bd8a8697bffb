// Fuzz target feeding arbitrary retry timelines and metric maps to the normalizers.
#![no_main]

use std::collections::BTreeMap;

use hookscope_logs::{build_delivery_attempts, extract_metrics};
use hookscope_protocol::webhook::{MetricValue, WebhookLog};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let log = WebhookLog::new("fuzz-api", "fuzz-req", "2025-06-18T15:45:00.000Z", 500)
        .with_metric("string_webhook_retry_timeline", text);
    let attempts = build_delivery_attempts(&log);
    assert!(!attempts.is_empty());
    assert_eq!(attempts, build_delivery_attempts(&log));

    if let Ok(raw) = serde_json::from_str::<BTreeMap<String, MetricValue>>(text) {
        let _ = extract_metrics(&raw);
    }
});
