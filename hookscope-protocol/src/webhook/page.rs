use serde::{Deserialize, Serialize};

use super::{DeliveryAttempt, WebhookLog, WebhookMetrics};

/// Pagination metadata returned with every page of logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub page: usize,
    pub per_page: usize,
    pub page_count: usize,
    pub page_items_count: usize,
    pub total_count: usize,
}

impl PageInfo {
    /// Metadata for page `page` holding `items` out of `total` matching logs.
    pub fn new(page: usize, per_page: usize, items: usize, total: usize) -> Self {
        let page_count = if per_page == 0 {
            1
        } else {
            total.div_ceil(per_page).max(1)
        };
        Self {
            page,
            per_page,
            page_count,
            page_items_count: items,
            total_count: total,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookLogsResponse {
    pub pagination: PageInfo,
    pub data: Vec<WebhookLog>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationOption {
    pub id: String,
    pub name: String,
}

/// Values offered by the quick filters of the logs table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub applications: Vec<ApplicationOption>,
    pub callback_urls: Vec<String>,
}

/// Everything the detail panel renders for a single log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookLogDetail {
    pub log: WebhookLog,
    pub attempts: Vec<DeliveryAttempt>,
    pub metrics: WebhookMetrics,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_never_drops_below_one() {
        assert_eq!(PageInfo::new(1, 10, 0, 0).page_count, 1);
        assert_eq!(PageInfo::new(1, 10, 10, 10).page_count, 1);
        assert_eq!(PageInfo::new(2, 10, 1, 11).page_count, 2);
    }
}
