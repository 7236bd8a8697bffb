use hookscope_core::errors::{HookscopeError, Result};
use serde::{Deserialize, Serialize};

/// 1-based page selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pagination {
    pub index: usize,
    pub size: usize,
}

impl Pagination {
    /// Builds a pagination, rejecting a zero index or size.
    pub fn new(index: usize, size: usize) -> Result<Self> {
        if index == 0 {
            return Err(HookscopeError::InvalidCriteria(
                "page index starts at 1".to_string(),
            ));
        }
        if size == 0 {
            return Err(HookscopeError::InvalidCriteria(
                "page size must be greater than zero".to_string(),
            ));
        }
        Ok(Self { index, size })
    }

    /// First page of the given size.
    pub fn first(size: usize) -> Self {
        Self {
            index: 1,
            size: size.max(1),
        }
    }

    /// Offset of the first item of this page.
    pub fn start(&self) -> usize {
        self.index.saturating_sub(1).saturating_mul(self.size)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self { index: 1, size: 10 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Sort state of a table; either part may be unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sort {
    pub active: Option<String>,
    pub direction: Option<SortDirection>,
}

impl Sort {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            active: Some(field.into()),
            direction: Some(SortDirection::Asc),
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            active: Some(field.into()),
            direction: Some(SortDirection::Desc),
        }
    }

    /// Field and direction to sort by, when both are set.
    pub fn effective(&self) -> Option<(&str, SortDirection)> {
        match (self.active.as_deref(), self.direction) {
            (Some(field), Some(direction)) if !field.is_empty() => Some((field, direction)),
            _ => None,
        }
    }
}

/// Search, sort and page selection applied to a table collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    #[serde(default)]
    pub search_term: String,
    pub pagination: Pagination,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<Sort>,
}

impl FilterCriteria {
    pub fn new(pagination: Pagination) -> Self {
        Self {
            search_term: String::new(),
            pagination,
            sort: None,
        }
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }
}
