//! Synchronisation between the table state and the URL query string.

use std::collections::BTreeSet;

use hookscope_protocol::table::{Pagination, Sort};
use hookscope_protocol::webhook::LogsQueryParams;

use crate::filters::{Timeframe, WebhookFilters};
use crate::view::TableState;

impl TableState {
    /// Restores the table state from query parameters.
    ///
    /// Unparsable statuses are dropped; a missing or zero page size uses
    /// `default_per_page`.
    pub fn from_query(params: &LogsQueryParams, default_per_page: usize) -> Self {
        let filters = WebhookFilters {
            search_term: params.search.clone().unwrap_or_default(),
            statuses: split_list(params.statuses.as_deref())
                .filter_map(|status| status.parse::<u16>().ok())
                .collect::<BTreeSet<_>>(),
            applications: split_list(params.application_ids.as_deref())
                .map(str::to_string)
                .collect(),
            callback_urls: split_list(params.callback_urls.as_deref())
                .map(str::to_string)
                .collect(),
            timeframe: params
                .timeframe
                .as_deref()
                .map(Timeframe::parse)
                .unwrap_or_default(),
        };

        let size = params
            .per_page
            .filter(|size| *size > 0)
            .unwrap_or(default_per_page)
            .max(1);
        let index = params.page.filter(|page| *page > 0).unwrap_or(1);

        let sort = params.sort.as_ref().filter(|field| !field.is_empty()).map(|field| Sort {
            active: Some(field.clone()),
            direction: params.order,
        });

        Self {
            filters,
            pagination: Pagination { index, size },
            sort,
        }
    }

    /// Query parameters describing this state; empty filters are omitted.
    pub fn to_query(&self) -> LogsQueryParams {
        let filters = &self.filters;
        let search = filters.search_term.trim();
        let effective_sort = self.sort.as_ref().and_then(|sort| sort.effective());

        LogsQueryParams {
            search: (!search.is_empty()).then(|| search.to_string()),
            statuses: join_list(filters.statuses.iter().map(u16::to_string)),
            application_ids: join_list(filters.applications.iter().cloned()),
            callback_urls: join_list(filters.callback_urls.iter().cloned()),
            timeframe: match filters.timeframe {
                Timeframe::All => None,
                timeframe => Some(timeframe.to_string()),
            },
            page: Some(self.pagination.index),
            per_page: Some(self.pagination.size),
            sort: effective_sort.map(|(field, _)| field.to_string()),
            order: effective_sort.map(|(_, direction)| direction),
        }
    }
}

fn split_list(raw: Option<&str>) -> impl Iterator<Item = &str> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
}

fn join_list(items: impl Iterator<Item = String>) -> Option<String> {
    let joined = items.collect::<Vec<_>>().join(",");
    (!joined.is_empty()).then_some(joined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::TimeUnit;
    use hookscope_protocol::table::SortDirection;

    #[test]
    fn restores_state_from_query_params() {
        let params = LogsQueryParams {
            search: Some("acme".into()),
            statuses: Some("500, 200,abc,".into()),
            application_ids: Some("app-1,app-2".into()),
            callback_urls: None,
            timeframe: Some("-1h".into()),
            page: Some(3),
            per_page: Some(25),
            sort: Some("status".into()),
            order: Some(SortDirection::Desc),
        };
        let state = TableState::from_query(&params, 10);
        assert_eq!(state.filters.search_term, "acme");
        assert_eq!(state.filters.statuses, BTreeSet::from([200, 500]));
        assert_eq!(state.filters.applications, vec!["app-1", "app-2"]);
        assert!(state.filters.callback_urls.is_empty());
        assert_eq!(
            state.filters.timeframe,
            Timeframe::Last { amount: 1, unit: TimeUnit::Hours }
        );
        assert_eq!(state.pagination, Pagination { index: 3, size: 25 });
        assert_eq!(state.sort, Some(Sort::desc("status")));
    }

    #[test]
    fn missing_params_use_defaults() {
        let state = TableState::from_query(&LogsQueryParams::default(), 10);
        assert_eq!(state, TableState::new(10));

        let zeroes = LogsQueryParams {
            page: Some(0),
            per_page: Some(0),
            ..Default::default()
        };
        assert_eq!(TableState::from_query(&zeroes, 10).pagination, Pagination::first(10));
    }

    #[test]
    fn empty_filters_are_omitted_from_the_query() {
        let query = TableState::new(10).to_query();
        assert_eq!(
            query,
            LogsQueryParams {
                page: Some(1),
                per_page: Some(10),
                ..Default::default()
            }
        );
    }

    #[test]
    fn query_params_describe_the_state_they_were_read_from() {
        let params = LogsQueryParams {
            search: Some("finance".into()),
            statuses: Some("200,500".into()),
            application_ids: Some("app-2".into()),
            callback_urls: Some("https://finance.acme.com/webhooks/payment-status".into()),
            timeframe: Some("-7d".into()),
            page: Some(2),
            per_page: Some(5),
            sort: Some("timestamp".into()),
            order: Some(SortDirection::Asc),
        };
        assert_eq!(TableState::from_query(&params, 10).to_query(), params);
    }
}
