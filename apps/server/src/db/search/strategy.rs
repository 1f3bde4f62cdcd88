//! Search strategies for matching and ranking free-text queries.
//!
//! The ranked strategy needs PostgreSQL full-text support; the substring
//! strategy only needs `ILIKE` and serves as the portable fallback. Both
//! receive the same resolved scope columns, so `search_in` means the same
//! thing regardless of which backend serves the request.

use super::bind::{push_text, BindValue};
use super::scope::SearchColumn;

/// What the storage backend can do for search.
#[derive(Debug, Clone, Copy, Default)]
pub struct BackendCapabilities {
    /// Weighted full-text ranking is available.
    pub full_text_search: bool,
}

/// How free-text queries match games and how relevance is scored.
pub trait SearchStrategy: Send + Sync {
    /// Short name used in logs and metrics labels.
    fn name(&self) -> &'static str;

    /// Push the text-match condition for `query` over `columns`.
    ///
    /// Pushes nothing when `columns` is empty; a scope that resolves to no
    /// columns cannot constrain results.
    fn push_text_clause(
        &self,
        columns: &[SearchColumn],
        query: &str,
        where_clauses: &mut Vec<String>,
        bind_params: &mut Vec<BindValue>,
    );

    /// Expression scoring how well a game matches `query`, for relevance
    /// ordering (higher is better). `None` when the strategy does not rank.
    fn relevance_expr(
        &self,
        columns: &[SearchColumn],
        query: &str,
        bind_params: &mut Vec<BindValue>,
    ) -> Option<String>;
}

/// Pick the strategy matching the store's backend capabilities.
pub fn select(capabilities: &BackendCapabilities) -> &'static dyn SearchStrategy {
    if capabilities.full_text_search {
        &RankedSearch
    } else {
        &SubstringSearch
    }
}

/// Weighted tsvector matching with `ts_rank` relevance scoring.
///
/// The whole query is compiled to one plain tsquery, so every lexeme must
/// appear somewhere in the searched columns.
pub struct RankedSearch;

impl RankedSearch {
    fn weighted_vector(columns: &[SearchColumn]) -> String {
        columns
            .iter()
            .map(|column| {
                format!(
                    "setweight(to_tsvector('simple', coalesce({}, '')), '{}')",
                    column.expr, column.weight
                )
            })
            .collect::<Vec<_>>()
            .join(" || ")
    }
}

impl SearchStrategy for RankedSearch {
    fn name(&self) -> &'static str {
        "ranked"
    }

    fn push_text_clause(
        &self,
        columns: &[SearchColumn],
        query: &str,
        where_clauses: &mut Vec<String>,
        bind_params: &mut Vec<BindValue>,
    ) {
        if columns.is_empty() {
            return;
        }
        let idx = push_text(bind_params, query.to_string());
        where_clauses.push(format!(
            "({}) @@ plainto_tsquery('simple', ${})",
            Self::weighted_vector(columns),
            idx
        ));
    }

    fn relevance_expr(
        &self,
        columns: &[SearchColumn],
        query: &str,
        bind_params: &mut Vec<BindValue>,
    ) -> Option<String> {
        if columns.is_empty() {
            return None;
        }
        let idx = push_text(bind_params, query.to_string());
        Some(format!(
            "ts_rank({}, plainto_tsquery('simple', ${}))",
            Self::weighted_vector(columns),
            idx
        ))
    }
}

/// Case-insensitive substring matching.
///
/// Each whitespace-separated term must match at least one scope column;
/// terms combine conjunctively. No relevance score is produced.
pub struct SubstringSearch;

impl SearchStrategy for SubstringSearch {
    fn name(&self) -> &'static str {
        "substring"
    }

    fn push_text_clause(
        &self,
        columns: &[SearchColumn],
        query: &str,
        where_clauses: &mut Vec<String>,
        bind_params: &mut Vec<BindValue>,
    ) {
        if columns.is_empty() {
            return;
        }
        for term in query.split_whitespace() {
            let idx = push_text(bind_params, format!("%{}%", escape_like_pattern(term)));
            let mut parts: Vec<String> = columns
                .iter()
                .map(|column| format!("{} ILIKE ${} ESCAPE E'\\\\'", column.expr, idx))
                .collect();
            if parts.len() == 1 {
                where_clauses.push(parts.remove(0));
            } else {
                where_clauses.push(format!("({})", parts.join(" OR ")));
            }
        }
    }

    fn relevance_expr(
        &self,
        _columns: &[SearchColumn],
        _query: &str,
        _bind_params: &mut Vec<BindValue>,
    ) -> Option<String> {
        None
    }
}

fn escape_like_pattern(s: &str) -> String {
    // Escape SQL LIKE meta-characters so user input is treated literally.
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' | '%' | '_' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}
