mod criteria;
mod result;

pub use criteria::{FilterCriteria, Pagination, Sort, SortDirection};
pub use result::FilterResult;
