pub mod table;
pub mod webhook;

pub mod prelude {
    pub use crate::table::{FilterCriteria, FilterResult, Pagination, Sort, SortDirection};
    pub use crate::webhook::{
        ApplicationOption, ApplicationRef, DeliveryAttempt, FilterOptions, LogsQueryParams,
        MetricValue, PageInfo, PlanRef, RetryTimelineItem, WebhookLog, WebhookLogDetail,
        WebhookLogsResponse, WebhookMetrics,
    };
}
