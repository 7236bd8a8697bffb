//! Event-driven state of the webhook logs table.
//!
//! Each UI event goes through [`WebhookLogsView::handle`], which
//! recomputes the visible page unless the resulting criteria equal the
//! last ones applied.

use hookscope_protocol::table::{Pagination, Sort};
use hookscope_protocol::webhook::{LogsQueryParams, WebhookLog, WebhookLogsResponse};
use tracing::debug;

use crate::filters::{select_page, WebhookFilters};

/// Everything that determines the visible page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableState {
    pub filters: WebhookFilters,
    pub pagination: Pagination,
    pub sort: Option<Sort>,
}

impl TableState {
    pub fn new(per_page: usize) -> Self {
        Self {
            filters: WebhookFilters::default(),
            pagination: Pagination::first(per_page),
            sort: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    FiltersChanged(WebhookFilters),
    PaginationChanged(Pagination),
    SortChanged(Option<Sort>),
    /// Recompute even if nothing changed, e.g. after new logs arrived.
    Refresh,
}

/// Page to render and query string to publish after an event.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewUpdate {
    pub response: WebhookLogsResponse,
    pub query: LogsQueryParams,
}

#[derive(Debug, Clone)]
pub struct WebhookLogsView {
    logs: Vec<WebhookLog>,
    state: TableState,
    last_applied: Option<TableState>,
}

impl WebhookLogsView {
    pub fn new(logs: Vec<WebhookLog>, initial: TableState) -> Self {
        Self {
            logs,
            state: initial,
            last_applied: None,
        }
    }

    pub fn state(&self) -> &TableState {
        &self.state
    }

    /// Replaces the underlying logs; the next [`ViewEvent::Refresh`] renders them.
    pub fn replace_logs(&mut self, logs: Vec<WebhookLog>) {
        self.logs = logs;
    }

    /// Applies `event`, returning `None` when the criteria did not change.
    ///
    /// Changed filters always go back to the first page.
    pub fn handle(&mut self, event: ViewEvent) -> Option<ViewUpdate> {
        let mut next = self.state.clone();
        match event {
            ViewEvent::FiltersChanged(filters) => {
                if filters != next.filters {
                    next.filters = filters;
                    next.pagination.index = 1;
                }
            }
            ViewEvent::PaginationChanged(pagination) => next.pagination = pagination,
            ViewEvent::SortChanged(sort) => next.sort = sort,
            ViewEvent::Refresh => {
                self.last_applied = None;
            }
        }

        if self.last_applied.as_ref() == Some(&next) {
            debug!("criteria unchanged, skipping recompute");
            return None;
        }

        self.state = next;
        Some(self.render())
    }

    /// Renders the current state unconditionally.
    pub fn render(&mut self) -> ViewUpdate {
        let state = &self.state;
        let response = select_page(
            &self.logs,
            &state.filters,
            state.pagination,
            state.sort.as_ref(),
        );
        let query = state.to_query();
        self.last_applied = Some(state.clone());
        ViewUpdate { response, query }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn logs() -> Vec<WebhookLog> {
        (1..=12)
            .map(|n| {
                let status = if n % 3 == 0 { 500 } else { 200 };
                WebhookLog::new(
                    "api",
                    format!("req-{n}"),
                    format!("2025-06-{:02}T12:00:00.000Z", n),
                    status,
                )
                .with_callback_url(format!("https://hooks.example.com/{n}"))
            })
            .collect()
    }

    fn view() -> WebhookLogsView {
        WebhookLogsView::new(logs(), TableState::new(5))
    }

    #[test]
    fn first_render_shows_the_first_page() {
        let mut view = view();
        let update = view.render();
        assert_eq!(update.response.data.len(), 5);
        assert_eq!(update.response.pagination.total_count, 12);
        assert_eq!(update.response.pagination.page_count, 3);
        assert_eq!(update.query.page, Some(1));
    }

    #[test]
    fn repeated_events_are_deduplicated() {
        let mut view = view();
        view.render();

        let same_page = ViewEvent::PaginationChanged(Pagination::first(5));
        assert!(view.handle(same_page).is_none());

        let next_page = Pagination::new(2, 5).expect("valid page");
        assert!(view.handle(ViewEvent::PaginationChanged(next_page)).is_some());
        assert!(view.handle(ViewEvent::PaginationChanged(next_page)).is_none());

        assert!(view
            .handle(ViewEvent::FiltersChanged(WebhookFilters::default()))
            .is_none());
    }

    #[test]
    fn every_event_renders_before_the_first_render() {
        let mut filtered = view();
        assert!(filtered
            .handle(ViewEvent::FiltersChanged(WebhookFilters::default()))
            .is_some());

        let mut paged = view();
        assert!(paged
            .handle(ViewEvent::PaginationChanged(Pagination::first(5)))
            .is_some());
        assert!(paged
            .handle(ViewEvent::FiltersChanged(WebhookFilters::default()))
            .is_none());
    }

    #[test]
    fn filter_changes_reset_to_the_first_page() {
        let mut view = view();
        view.render();
        view.handle(ViewEvent::PaginationChanged(Pagination::new(3, 5).expect("valid page")));

        let filters = WebhookFilters {
            statuses: BTreeSet::from([500]),
            ..Default::default()
        };
        let update = view
            .handle(ViewEvent::FiltersChanged(filters))
            .expect("filters changed");
        assert_eq!(update.response.pagination.page, 1);
        assert_eq!(update.response.pagination.total_count, 4);
        assert_eq!(update.query.statuses.as_deref(), Some("500"));
        assert_eq!(update.query.page, Some(1));
    }

    #[test]
    fn refresh_always_recomputes() {
        let mut view = view();
        view.render();
        let mut more = logs();
        more.push(WebhookLog::new("api", "req-13", "2025-06-13T12:00:00.000Z", 200));
        view.replace_logs(more);

        let update = view.handle(ViewEvent::Refresh).expect("refresh renders");
        assert_eq!(update.response.pagination.total_count, 13);
    }

    #[test]
    fn sort_changes_reorder_the_page() {
        let mut view = view();
        view.render();
        let update = view
            .handle(ViewEvent::SortChanged(Some(Sort::desc("timestamp"))))
            .expect("sort changed");
        assert_eq!(update.response.data[0].request_id, "req-12");
        assert_eq!(update.query.sort.as_deref(), Some("timestamp"));
    }
}
