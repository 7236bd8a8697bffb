use std::cmp::Ordering;

use hookscope_protocol::table::{FilterCriteria, FilterResult, SortDirection};
use tracing::debug;

/// Value an item exposes for a sortable column.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    /// The column exists but this item has no value; sorts first ascending.
    Missing,
    Number(f64),
    Text(String),
}

impl SortKey {
    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Missing, SortKey::Missing) => Ordering::Equal,
            (SortKey::Missing, _) => Ordering::Less,
            (_, SortKey::Missing) => Ordering::Greater,
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
            (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
            (SortKey::Text(a), SortKey::Text(b)) => a
                .to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b)),
        }
    }
}

/// Per-entity contract of the table engine.
///
/// Implementors document which fields are searched. `sort_key` must
/// return `None` exactly when `field` is not a column of the entity.
pub trait Filterable {
    fn search_fields(&self) -> Vec<&str>;

    fn sort_key(&self, field: &str) -> Option<SortKey>;
}

impl<T: Filterable + ?Sized> Filterable for &T {
    fn search_fields(&self) -> Vec<&str> {
        (**self).search_fields()
    }

    fn sort_key(&self, field: &str) -> Option<SortKey> {
        (**self).sort_key(field)
    }
}

/// Searches, sorts and paginates `collection`.
///
/// The search is a case-insensitive substring match over
/// [`Filterable::search_fields`] that keeps the input order. Sorting is
/// stable, so equal keys keep that order too. A page past the end is
/// empty; a zero page index reads as the first page and a zero page size
/// yields an empty page.
pub fn filter_collection<T>(collection: &[T], criteria: &FilterCriteria) -> FilterResult<T>
where
    T: Filterable + Clone,
{
    let term = criteria.search_term.trim().to_lowercase();

    let mut matching: Vec<&T> = if term.is_empty() {
        collection.iter().collect()
    } else {
        collection
            .iter()
            .filter(|item| matches_search(*item, &term))
            .collect()
    };

    if let Some((field, direction)) = criteria.sort.as_ref().and_then(|sort| sort.effective()) {
        sort_by_field(&mut matching, field, direction);
    }

    let unpaginated_length = matching.len();
    let page = criteria.pagination;
    let filtered_collection = matching
        .into_iter()
        .skip(page.start())
        .take(page.size)
        .cloned()
        .collect();

    FilterResult {
        filtered_collection,
        unpaginated_length,
    }
}

fn matches_search<T: Filterable>(item: &T, lowered_term: &str) -> bool {
    item.search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(lowered_term))
}

fn sort_by_field<T: Filterable>(items: &mut Vec<&T>, field: &str, direction: SortDirection) {
    let keys: Option<Vec<SortKey>> = items.iter().map(|item| item.sort_key(field)).collect();
    let Some(keys) = keys else {
        debug!(field, "ignoring sort on unknown field");
        return;
    };

    let mut keyed: Vec<(SortKey, &T)> = keys.into_iter().zip(items.iter().copied()).collect();
    keyed.sort_by(|(a, _), (b, _)| {
        let ordering = a.compare(b);
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
    *items = keyed.into_iter().map(|(_, item)| item).collect();
}
