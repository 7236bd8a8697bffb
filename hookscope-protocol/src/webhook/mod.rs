mod attempt;
mod log;
mod metrics;
mod page;
mod query;

pub use attempt::{DeliveryAttempt, RetryTimelineItem, INITIAL_ATTEMPT_REASON};
pub use log::{ApplicationRef, MetricValue, PlanRef, WebhookLog};
pub use metrics::{keys, WebhookMetrics};
pub use page::{ApplicationOption, FilterOptions, PageInfo, WebhookLogDetail, WebhookLogsResponse};
pub use query::LogsQueryParams;
