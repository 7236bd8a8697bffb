use serde::{Deserialize, Serialize};

/// One page of a filtered collection.
///
/// `unpaginated_length` counts the items that survived the search filter,
/// before the page slice was taken.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterResult<T> {
    pub filtered_collection: Vec<T>,
    pub unpaginated_length: usize,
}
