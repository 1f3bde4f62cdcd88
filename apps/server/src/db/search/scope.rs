//! Search scope resolution shared by every search strategy.

/// A searchable game column together with its full-text rank weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchColumn {
    /// Scope token clients use to request this column.
    pub token: &'static str,
    /// Qualified column expression in search SQL.
    pub expr: &'static str,
    /// Weight label for ranked search; 'A' outranks 'B' outranks 'C'.
    pub weight: char,
}

/// Every searchable column, in the order scopes resolve to.
pub const ALL_COLUMNS: [SearchColumn; 3] = [
    SearchColumn {
        token: "title",
        expr: "g.title",
        weight: 'A',
    },
    SearchColumn {
        token: "description",
        expr: "g.short_description",
        weight: 'B',
    },
    SearchColumn {
        token: "content",
        expr: "g.markdown_content",
        weight: 'C',
    },
];

/// Resolve requested scope tokens to searchable columns.
///
/// An empty scope or any `all` entry selects every column. Unknown tokens
/// select nothing, so a scope made up entirely of unknown tokens resolves to
/// an empty set and callers skip text filtering altogether. Only membership
/// counts; duplicates and request order have no effect.
pub fn resolve_columns(search_in: &[String]) -> Vec<SearchColumn> {
    if search_in.is_empty() || search_in.iter().any(|token| token == "all") {
        return ALL_COLUMNS.to_vec();
    }

    ALL_COLUMNS
        .iter()
        .filter(|column| search_in.iter().any(|token| token == column.token))
        .copied()
        .collect()
}
