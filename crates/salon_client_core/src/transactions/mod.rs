//! Transaction list logic: display status, filter mapping, local refine/sort, paging.

pub mod filter;
pub mod pagination;
pub mod query;
pub mod status;

pub use filter::{matches_search, refine, DateType, SortDirection, TransactionFilters};
pub use pagination::{Pagination, PAGE_LIMIT};
pub use query::{filter_params, list_params};
pub use status::{display_status, map_status_filter, DisplayStatus, StatusQuery, UiStatus};
