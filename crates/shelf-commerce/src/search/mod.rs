//! Listing queries and pagination.

mod query;
mod results;

pub use query::{BookQuery, BookSort, SortOrder, TransactionQuery, TransactionSortField};
pub use results::Page;
