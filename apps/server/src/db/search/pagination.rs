//! Pagination math for search result pages.

use crate::models::Pagination;

/// Compute page metadata for a result set.
///
/// `amount` was validated during parsing and is at least 1.
pub fn page_metadata(total_count: i64, amount: usize) -> Pagination {
    let amount = amount as i64;
    let total_pages = (total_count + amount - 1) / amount;
    Pagination {
        total_count,
        total_pages,
    }
}
