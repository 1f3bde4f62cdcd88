//! Database layer - search query building and data access

pub mod search;
pub mod store;

pub use search::{BackendCapabilities, GameQueryBuilder, GameSearchParams, SortBy};
pub use store::{GameSearchResult, GameStore, PostgresGameStore};
