//! Quick filters of the webhook logs table.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;
use std::sync::OnceLock;

use chrono::DateTime;
use hookscope_protocol::table::{FilterCriteria, Pagination, Sort};
use hookscope_protocol::webhook::{
    ApplicationOption, FilterOptions, PageInfo, WebhookLog, WebhookLogsResponse,
};
use regex::Regex;

use crate::table::{filter_collection, Filterable, SortKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Minutes,
    Hours,
    Days,
}

impl TimeUnit {
    fn millis(self) -> i64 {
        match self {
            TimeUnit::Minutes => 60 * 1000,
            TimeUnit::Hours => 60 * 60 * 1000,
            TimeUnit::Days => 24 * 60 * 60 * 1000,
        }
    }

    fn suffix(self) -> char {
        match self {
            TimeUnit::Minutes => 'm',
            TimeUnit::Hours => 'h',
            TimeUnit::Days => 'd',
        }
    }
}

/// Relative time window such as `-5m`, `-1h` or `-7d`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Timeframe {
    #[default]
    All,
    Last { amount: u32, unit: TimeUnit },
}

impl Timeframe {
    /// Parses the console's timeframe notation; `"0"` and anything
    /// unrecognised mean no time restriction.
    pub fn parse(raw: &str) -> Self {
        static PATTERN: OnceLock<Regex> = OnceLock::new();
        let pattern = PATTERN.get_or_init(|| {
            Regex::new(r"^-(\d+)([mhd])$").expect("timeframe pattern is valid")
        });

        let Some(captures) = pattern.captures(raw.trim()) else {
            return Timeframe::All;
        };
        let Ok(amount) = captures[1].parse::<u32>() else {
            return Timeframe::All;
        };
        let unit = match &captures[2] {
            "m" => TimeUnit::Minutes,
            "h" => TimeUnit::Hours,
            _ => TimeUnit::Days,
        };
        Timeframe::Last { amount, unit }
    }

    /// Window length in milliseconds, `None` when unrestricted.
    pub fn window_millis(&self) -> Option<i64> {
        match self {
            Timeframe::All => None,
            Timeframe::Last { amount: 0, .. } => None,
            Timeframe::Last { amount, unit } => Some(i64::from(*amount) * unit.millis()),
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timeframe::All => write!(f, "0"),
            Timeframe::Last { amount, unit } => write!(f, "-{}{}", amount, unit.suffix()),
        }
    }
}

/// Quick-filter selection of the logs table.
///
/// Empty lists mean "any". The search term is matched by the table
/// engine, see [`Filterable`] for [`WebhookLog`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct WebhookFilters {
    pub search_term: String,
    pub statuses: BTreeSet<u16>,
    pub applications: Vec<String>,
    pub callback_urls: Vec<String>,
    pub timeframe: Timeframe,
}

impl WebhookFilters {
    /// Whether `log` passes the status, application, callback URL and
    /// timeframe filters. `reference_now` is the latest log timestamp in
    /// epoch milliseconds.
    pub fn matches(&self, log: &WebhookLog, reference_now: Option<i64>) -> bool {
        if !self.statuses.is_empty() && !self.statuses.contains(&log.status) {
            return false;
        }

        if !self.applications.is_empty() {
            let app_id = log.application.as_ref().map(|app| app.id.as_str());
            if !app_id.is_some_and(|id| self.applications.iter().any(|wanted| wanted == id)) {
                return false;
            }
        }

        if !self.callback_urls.is_empty()
            && !self.callback_urls.iter().any(|url| url == log.callback_target())
        {
            return false;
        }

        match self.timeframe.window_millis() {
            None => true,
            Some(window) => match (timestamp_millis(&log.timestamp), reference_now) {
                (Some(at), Some(now)) => at >= now.saturating_sub(window) && at <= now,
                _ => false,
            },
        }
    }

    fn criteria(&self, pagination: Pagination, sort: Option<&Sort>) -> FilterCriteria {
        let criteria = FilterCriteria::new(pagination).with_search(self.search_term.clone());
        match sort {
            Some(sort) => criteria.with_sort(sort.clone()),
            None => criteria,
        }
    }
}

/// Applies `filters` to `logs` and returns the requested page.
pub fn select_page(
    logs: &[WebhookLog],
    filters: &WebhookFilters,
    pagination: Pagination,
    sort: Option<&Sort>,
) -> WebhookLogsResponse {
    let reference_now = latest_timestamp(logs);
    let candidates: Vec<&WebhookLog> = logs
        .iter()
        .filter(|log| filters.matches(log, reference_now))
        .collect();

    let result = filter_collection(&candidates, &filters.criteria(pagination, sort));
    let data: Vec<WebhookLog> = result.filtered_collection.into_iter().cloned().collect();

    WebhookLogsResponse {
        pagination: PageInfo::new(
            pagination.index,
            pagination.size,
            data.len(),
            result.unpaginated_length,
        ),
        data,
    }
}

/// Distinct applications and callback URLs, in order of first appearance.
pub fn filter_options(logs: &[WebhookLog]) -> FilterOptions {
    let mut applications: Vec<ApplicationOption> = Vec::new();
    let mut app_positions: HashMap<&str, usize> = HashMap::new();
    let mut callback_urls = Vec::new();
    let mut seen_urls = HashSet::new();

    for log in logs {
        if let Some(app) = log.application.as_ref() {
            if !app.id.is_empty() && !app.name.is_empty() {
                match app_positions.get(app.id.as_str()) {
                    Some(&position) => applications[position].name = app.name.clone(),
                    None => {
                        app_positions.insert(app.id.as_str(), applications.len());
                        applications.push(ApplicationOption {
                            id: app.id.clone(),
                            name: app.name.clone(),
                        });
                    }
                }
            }
        }

        let url = log.callback_target();
        if !url.is_empty() && seen_urls.insert(url) {
            callback_urls.push(url.to_string());
        }
    }

    FilterOptions {
        applications,
        callback_urls,
    }
}

fn timestamp_millis(raw: &str) -> Option<i64> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|at| at.timestamp_millis())
}

fn latest_timestamp(logs: &[WebhookLog]) -> Option<i64> {
    logs.iter()
        .filter_map(|log| timestamp_millis(&log.timestamp))
        .max()
}

impl Filterable for WebhookLog {
    /// Searches the callback URL, request URI, request id and application name.
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = Vec::with_capacity(4);
        if let Some(url) = self.callback_url.as_deref() {
            fields.push(url);
        }
        fields.push(self.uri.as_str());
        fields.push(self.request_id.as_str());
        if let Some(app) = self.application.as_ref() {
            fields.push(app.name.as_str());
        }
        fields.retain(|field| !field.is_empty());
        fields
    }

    fn sort_key(&self, field: &str) -> Option<SortKey> {
        let key = match field {
            "timestamp" => timestamp_millis(&self.timestamp)
                .map(|millis| SortKey::Number(millis as f64))
                .unwrap_or(SortKey::Missing),
            "status" => SortKey::Number(f64::from(self.status)),
            "gatewayResponseTime" => SortKey::Number(self.gateway_response_time as f64),
            "requestId" => SortKey::Text(self.request_id.clone()),
            "application" => self
                .application
                .as_ref()
                .map(|app| SortKey::Text(app.name.clone()))
                .unwrap_or(SortKey::Missing),
            "callbackUrl" => SortKey::Text(self.callback_target().to_string()),
            _ => return None,
        };
        Some(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn sample_logs() -> Vec<WebhookLog> {
        vec![
            WebhookLog::new("api", "req-1", "2025-06-15T12:00:00.000Z", 200)
                .with_application("app-1", "Acme Warehouse Service")
                .with_callback_url("https://warehouse.acme.com/webhooks/fulfillment")
                .with_response_time(2800),
            WebhookLog::new("api", "req-2", "2025-06-16T13:15:00.000Z", 500)
                .with_application("app-2", "Acme Finance Service")
                .with_callback_url("https://finance.acme.com/webhooks/payment-status")
                .with_response_time(980),
            WebhookLog::new("api", "req-3", "2025-06-17T14:30:00.000Z", 200)
                .with_application("app-3", "Acme Inventory Control")
                .with_callback_url("https://inventory.acme.com/webhooks/stock-updates")
                .with_response_time(155),
            WebhookLog::new("api", "req-4", "2025-06-18T15:45:00.000Z", 500)
                .with_application("app-4", "Acme CRM")
                .with_callback_url("https://crm.acme.com/webhooks/customer-notify")
                .with_response_time(1600),
            WebhookLog::new("api", "req-5", "2025-06-19T17:00:00.000Z", 500)
                .with_application("app-5", "Acme Monitoring")
                .with_callback_url("https://monitoring.acme.com/webhooks/store-environment")
                .with_response_time(340),
        ]
    }

    fn request_ids(response: &WebhookLogsResponse) -> Vec<&str> {
        response.data.iter().map(|log| log.request_id.as_str()).collect()
    }

    #[test_case("-5m", Timeframe::Last { amount: 5, unit: TimeUnit::Minutes } ; "minutes")]
    #[test_case("-1h", Timeframe::Last { amount: 1, unit: TimeUnit::Hours } ; "hours")]
    #[test_case("-7d", Timeframe::Last { amount: 7, unit: TimeUnit::Days } ; "days")]
    #[test_case("0", Timeframe::All ; "zero")]
    #[test_case("", Timeframe::All ; "empty")]
    #[test_case("7d", Timeframe::All ; "missing sign")]
    #[test_case("-3w", Timeframe::All ; "unknown unit")]
    #[test_case("-99999999999d", Timeframe::All ; "overflowing amount")]
    fn parses_timeframes(raw: &str, expected: Timeframe) {
        assert_eq!(Timeframe::parse(raw), expected);
    }

    #[test]
    fn timeframe_renders_back_to_its_notation() {
        assert_eq!(Timeframe::parse("-15m").to_string(), "-15m");
        assert_eq!(Timeframe::All.to_string(), "0");
    }

    #[test]
    fn filters_by_status_application_and_callback() {
        let logs = sample_logs();
        let mut filters = WebhookFilters {
            statuses: BTreeSet::from([500]),
            ..Default::default()
        };
        let page = select_page(&logs, &filters, Pagination::first(10), None);
        assert_eq!(request_ids(&page), vec!["req-2", "req-4", "req-5"]);

        filters.applications = vec!["app-4".into(), "app-1".into()];
        let page = select_page(&logs, &filters, Pagination::first(10), None);
        assert_eq!(request_ids(&page), vec!["req-4"]);

        let filters = WebhookFilters {
            callback_urls: vec!["https://inventory.acme.com/webhooks/stock-updates".into()],
            ..Default::default()
        };
        let page = select_page(&logs, &filters, Pagination::first(10), None);
        assert_eq!(request_ids(&page), vec!["req-3"]);
    }

    #[test]
    fn timeframe_is_relative_to_the_latest_log() {
        let logs = sample_logs();
        let filters = WebhookFilters {
            timeframe: Timeframe::parse("-2d"),
            ..Default::default()
        };
        let page = select_page(&logs, &filters, Pagination::first(10), None);
        assert_eq!(request_ids(&page), vec!["req-4", "req-5"]);
    }

    #[test]
    fn unparsable_timestamps_fail_bounded_timeframes() {
        let mut logs = sample_logs();
        logs[4].timestamp = "yesterday".into();
        let filters = WebhookFilters {
            timeframe: Timeframe::parse("-1d"),
            ..Default::default()
        };
        let page = select_page(&logs, &filters, Pagination::first(10), None);
        assert_eq!(request_ids(&page), vec!["req-4"]);

        let all = select_page(&logs, &WebhookFilters::default(), Pagination::first(10), None);
        assert_eq!(all.data.len(), 5);
    }

    #[test]
    fn search_covers_url_request_id_and_application_name() {
        let logs = sample_logs();
        for (term, expected) in [
            ("FINANCE", vec!["req-2"]),
            ("req-3", vec!["req-3"]),
            ("crm", vec!["req-4"]),
            ("acme", vec!["req-1", "req-2", "req-3", "req-4", "req-5"]),
        ] {
            let filters = WebhookFilters {
                search_term: term.into(),
                ..Default::default()
            };
            let page = select_page(&logs, &filters, Pagination::first(10), None);
            assert_eq!(request_ids(&page), expected, "term {term}");
        }
    }

    #[test]
    fn page_metadata_reflects_the_filtered_total() {
        let logs = sample_logs();
        let filters = WebhookFilters {
            statuses: BTreeSet::from([500]),
            ..Default::default()
        };
        let page = select_page(
            &logs,
            &filters,
            Pagination::new(2, 2).expect("valid page"),
            Some(&Sort::desc("gatewayResponseTime")),
        );
        assert_eq!(request_ids(&page), vec!["req-5"]);
        assert_eq!(
            page.pagination,
            PageInfo {
                page: 2,
                per_page: 2,
                page_count: 2,
                page_items_count: 1,
                total_count: 3,
            }
        );
    }

    #[test]
    fn options_are_distinct_and_ordered() {
        let mut logs = sample_logs();
        logs.push(
            WebhookLog::new("api", "req-6", "2025-06-19T18:00:00.000Z", 200)
                .with_application("app-1", "Acme Warehouse (renamed)")
                .with_callback_url("https://warehouse.acme.com/webhooks/fulfillment"),
        );
        let options = filter_options(&logs);
        assert_eq!(options.applications.len(), 5);
        assert_eq!(options.applications[0].id, "app-1");
        assert_eq!(options.applications[0].name, "Acme Warehouse (renamed)");
        assert_eq!(options.callback_urls.len(), 5);
        assert_eq!(
            options.callback_urls[0],
            "https://warehouse.acme.com/webhooks/fulfillment"
        );
    }
}
