//! Webhook log handling for the hookscope console.
//!
//! The pure building blocks ([`table`], [`delivery`], [`metrics`],
//! [`filters`], [`view`]) never perform I/O; [`repository`] and
//! [`server`] wrap them in an in-memory store and an HTTP API.

pub mod delivery;
pub mod filters;
pub mod metrics;
pub mod query_params;
pub mod repository;
pub mod server;
pub mod table;
pub mod view;

pub use delivery::build_delivery_attempts;
pub use filters::{filter_options, select_page, TimeUnit, Timeframe, WebhookFilters};
pub use metrics::extract_metrics;
pub use repository::WebhookLogRepository;
pub use server::{router, AppState};
pub use table::{filter_collection, Filterable, SortKey};
pub use view::{TableState, ViewEvent, ViewUpdate, WebhookLogsView};
