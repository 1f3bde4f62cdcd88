//! Game search: parameter parsing, match strategies and SQL generation.

mod bind;
pub mod pagination;
pub mod params;
pub mod query_builder;
pub mod scope;
pub mod strategy;

pub use bind::BindValue;
pub use params::{GameSearchParams, IndexRange, SortBy, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use query_builder::GameQueryBuilder;
pub use scope::{resolve_columns, SearchColumn};
pub use strategy::{BackendCapabilities, SearchStrategy};
