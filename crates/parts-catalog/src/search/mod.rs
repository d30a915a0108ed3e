//! Product search, filtering and pagination.

mod filter;
mod matcher;
mod pipeline;
mod query;
mod results;

pub use filter::Filter;
pub use matcher::{match_products, SearchOutcome, SearchType};
pub use pipeline::{filter_products, filter_products_with, sort_products};
pub use query::{ProductQuery, SortOption, DEFAULT_LIMIT};
pub use results::{Pagination, ProductPage};
