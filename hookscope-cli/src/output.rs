use colored::*;
use hookscope_protocol::webhook::{
    DeliveryAttempt, FilterOptions, WebhookLog, WebhookLogDetail, WebhookLogsResponse,
    WebhookMetrics,
};

fn colored_status(status: u16) -> ColoredString {
    let text = status.to_string();
    match status {
        200..=299 => text.green(),
        300..=499 => text.yellow(),
        _ => text.red(),
    }
}

fn print_log_row(log: &WebhookLog) {
    let app = log
        .application
        .as_ref()
        .map(|app| app.name.as_str())
        .unwrap_or("-");
    println!(
        "  {} {} {:>6}ms  {}  {}  {}",
        log.timestamp.dimmed(),
        colored_status(log.status),
        log.gateway_response_time,
        log.request_id.bold(),
        app,
        match log.callback_target() {
            "" => "-",
            target => target,
        }
    );
}

pub fn print_page(response: &WebhookLogsResponse) {
    let info = &response.pagination;
    println!(
        "{} page {}/{} ({} of {} logs)",
        "Webhook logs".cyan().bold(),
        info.page,
        info.page_count,
        info.page_items_count,
        info.total_count
    );
    if response.data.is_empty() {
        println!("  {}", "no logs match the current filters".dimmed());
    }
    for log in &response.data {
        print_log_row(log);
    }
}

pub fn print_attempts(detail: &WebhookLogDetail) {
    println!(
        "{} {}",
        "Delivery attempts for".cyan().bold(),
        detail.log.request_id.bold()
    );
    for attempt in &detail.attempts {
        print_attempt(attempt);
    }
}

fn print_attempt(attempt: &DeliveryAttempt) {
    println!(
        "  #{} {} {} {}ms",
        attempt.attempt,
        attempt.timestamp,
        colored_status(attempt.status),
        attempt.duration
    );
    if let Some(reason) = &attempt.reason {
        println!("     {}", reason.dimmed());
    }
}

pub fn print_metrics(detail: &WebhookLogDetail) {
    println!(
        "{} {}",
        "Metrics for".cyan().bold(),
        detail.log.request_id.bold()
    );
    print_metric_fields(&detail.metrics);
}

fn print_metric_fields(metrics: &WebhookMetrics) {
    print_field("response time", format!("{}ms", metrics.response_time));
    print_field("status", colored_status(metrics.status).to_string());
    print_field("retry count", metrics.retry_count.to_string());
    print_field("payload size", format!("{} bytes", metrics.payload_size));

    let optional: [(&str, Option<String>); 12] = [
        ("request timestamp", metrics.request_timestamp.map(|v| v.to_string())),
        ("retry timeline", metrics.retry_timeline.clone()),
        ("last error", metrics.last_error.clone()),
        ("request method", metrics.request_method.clone()),
        ("request body", metrics.request_body.clone()),
        ("request headers", metrics.request_headers.clone()),
        ("response body", metrics.response_body.clone()),
        ("response headers", metrics.response_headers.clone()),
        ("url", metrics.url.clone()),
        ("application id", metrics.application_id.clone()),
        ("subscription id", metrics.subscription_id.clone()),
        ("dead letter queue", metrics.dlq.map(|v| v.to_string())),
    ];
    for (label, value) in optional {
        if let Some(value) = value {
            print_field(label, value);
        }
    }
}

fn print_field(label: &str, value: String) {
    println!("  {:<19} {}", format!("{label}:").bold(), value);
}

pub fn print_filter_options(options: &FilterOptions) {
    println!("{}", "Applications".cyan().bold());
    for app in &options.applications {
        println!("  {}  {}", app.id.bold(), app.name);
    }
    println!("{}", "Callback URLs".cyan().bold());
    for url in &options.callback_urls {
        println!("  {url}");
    }
}
