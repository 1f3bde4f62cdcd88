//! Search parameter parsing and validation
//!
//! Handles parsing of the game listing query string including:
//! - Pagination controls (`start_index`, `amount`)
//! - Free-text search controls (`q`, `search_in`)
//! - Tag, age group and characteristic range filters
//! - Sort selection (`sort_by`)

use crate::Result;

/// Page size applied when `amount` is absent.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Hard ceiling on `amount`; larger requests are rejected.
pub const MAX_PAGE_SIZE: usize = 50;

/// Parsed game search parameters and controls.
#[derive(Debug, Clone)]
pub struct GameSearchParams {
    /// Free-text query. Empty or whitespace-only applies no text filter.
    pub query: String,

    /// Requested scope tokens in request order.
    ///
    /// Tokens are resolved to columns by `scope::resolve_columns` so that
    /// every search strategy interprets them identically.
    pub search_in: Vec<String>,

    /// Tag names a matching game must carry, all of them.
    pub tag_filter: Vec<String>,

    /// Age group names a matching game must be associated with, all of them.
    pub age_group_filter: Vec<String>,

    pub difficulty: IndexRange,
    pub group_size: IndexRange,
    pub preperation: IndexRange,
    pub physical: IndexRange,
    pub duration: IndexRange,

    pub sort_by: SortBy,

    /// 0-based offset of the first game to return.
    pub start_index: usize,

    /// Page size, between 1 and `MAX_PAGE_SIZE`.
    pub amount: usize,
}

/// Inclusive bounds on a 1-10 characteristic index.
///
/// The defaults are wider than the stored scale so an unfiltered request
/// matches every game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexRange {
    pub min: i32,
    pub max: i32,
}

impl Default for IndexRange {
    fn default() -> Self {
        Self { min: 0, max: 10 }
    }
}

/// Sort order for search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    /// Rank matches best-first where the strategy supports ranking,
    /// otherwise keep the backend's stable default order.
    #[default]
    Relevance,
    Title,
    Newest,
    Upvotes,
}

impl SortBy {
    /// Parse a `sort_by` token. Unrecognized tokens fall back to relevance
    /// rather than erroring.
    pub fn parse(value: &str) -> Self {
        match value {
            "title" => Self::Title,
            "newest" => Self::Newest,
            "upvotes" => Self::Upvotes,
            _ => Self::Relevance,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Relevance => "relevance",
            Self::Title => "title",
            Self::Newest => "newest",
            Self::Upvotes => "upvotes",
        }
    }
}

impl Default for GameSearchParams {
    fn default() -> Self {
        Self {
            query: String::new(),
            search_in: Vec::new(),
            tag_filter: Vec::new(),
            age_group_filter: Vec::new(),
            difficulty: IndexRange::default(),
            group_size: IndexRange::default(),
            preperation: IndexRange::default(),
            physical: IndexRange::default(),
            duration: IndexRange::default(),
            sort_by: SortBy::Relevance,
            start_index: 0,
            amount: DEFAULT_PAGE_SIZE,
        }
    }
}

impl GameSearchParams {
    /// Parse search parameters from ordered (key, value) items.
    ///
    /// List parameters (`search_in`, `tag_filter`, `age_group_filter`)
    /// accumulate across repeated keys; scalar parameters take the last
    /// occurrence. Unknown keys are ignored.
    pub fn from_items(items: &[(String, String)]) -> Result<Self> {
        let mut params = Self::default();

        for (key, value) in items {
            match key.as_str() {
                "start_index" => {
                    params.start_index = value.parse().map_err(|_| {
                        crate::Error::Validation(format!("Invalid start_index value: {}", value))
                    })?;
                }
                "amount" => {
                    let parsed: usize = value.parse().map_err(|_| {
                        crate::Error::Validation(format!("Invalid amount value: {}", value))
                    })?;
                    if parsed == 0 {
                        return Err(crate::Error::Validation(format!(
                            "Invalid amount value: {}",
                            value
                        )));
                    }
                    if parsed > MAX_PAGE_SIZE {
                        return Err(crate::Error::Validation(format!(
                            "Amount exceeds maximum limit of {} games per request",
                            MAX_PAGE_SIZE
                        )));
                    }
                    params.amount = parsed;
                }
                "q" => {
                    params.query = value.clone();
                }
                "search_in" => {
                    params.search_in.push(value.clone());
                }
                "tag_filter" => {
                    params.tag_filter.push(value.clone());
                }
                "age_group_filter" => {
                    params.age_group_filter.push(value.clone());
                }
                "min_difficulty_index" => params.difficulty.min = parse_bound(key, value)?,
                "max_difficulty_index" => params.difficulty.max = parse_bound(key, value)?,
                "min_group_size_index" => params.group_size.min = parse_bound(key, value)?,
                "max_group_size_index" => params.group_size.max = parse_bound(key, value)?,
                "min_preperation_index" => params.preperation.min = parse_bound(key, value)?,
                "max_preperation_index" => params.preperation.max = parse_bound(key, value)?,
                "min_physical_index" => params.physical.min = parse_bound(key, value)?,
                "max_physical_index" => params.physical.max = parse_bound(key, value)?,
                "min_duration_index" => params.duration.min = parse_bound(key, value)?,
                "max_duration_index" => params.duration.max = parse_bound(key, value)?,
                "sort_by" => {
                    params.sort_by = SortBy::parse(value);
                }
                // Unknown parameters are ignored rather than rejected.
                _ => {}
            }
        }

        Ok(params)
    }

    /// True when the request should produce a text-match clause.
    pub fn has_query(&self) -> bool {
        !self.query.trim().is_empty()
    }

    /// The five characteristic ranges with their column names.
    pub fn index_ranges(&self) -> [(&'static str, IndexRange); 5] {
        [
            ("difficulty_index", self.difficulty),
            ("group_size_index", self.group_size),
            ("preperation_index", self.preperation),
            ("physical_index", self.physical),
            ("duration_index", self.duration),
        ]
    }
}

fn parse_bound(key: &str, value: &str) -> Result<i32> {
    value
        .parse()
        .map_err(|_| crate::Error::Validation(format!("Invalid {} value: {}", key, value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn empty_request_uses_defaults() {
        let params = GameSearchParams::from_items(&[]).unwrap();
        assert_eq!(params.start_index, 0);
        assert_eq!(params.amount, DEFAULT_PAGE_SIZE);
        assert_eq!(params.query, "");
        assert!(params.search_in.is_empty());
        assert!(params.tag_filter.is_empty());
        assert_eq!(params.difficulty, IndexRange { min: 0, max: 10 });
        assert_eq!(params.sort_by, SortBy::Relevance);
    }

    #[test]
    fn amount_accepts_the_maximum() {
        let params = GameSearchParams::from_items(&items(&[("amount", "50")])).unwrap();
        assert_eq!(params.amount, 50);
    }

    #[test]
    fn amount_above_maximum_is_rejected_with_limit_message() {
        let err = GameSearchParams::from_items(&items(&[("amount", "51")])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Amount exceeds maximum limit of 50 games per request"
        );
    }

    #[test]
    fn amount_zero_is_rejected() {
        let err = GameSearchParams::from_items(&items(&[("amount", "0")])).unwrap_err();
        assert_eq!(err.to_string(), "Invalid amount value: 0");
    }

    #[test]
    fn amount_must_be_an_integer() {
        let err = GameSearchParams::from_items(&items(&[("amount", "many")])).unwrap_err();
        assert_eq!(err.to_string(), "Invalid amount value: many");
    }

    #[test]
    fn negative_start_index_is_rejected() {
        let err = GameSearchParams::from_items(&items(&[("start_index", "-1")])).unwrap_err();
        assert_eq!(err.to_string(), "Invalid start_index value: -1");
    }

    #[test]
    fn list_parameters_accumulate() {
        let params = GameSearchParams::from_items(&items(&[
            ("search_in", "title"),
            ("search_in", "content"),
            ("tag_filter", "outdoor"),
            ("tag_filter", "team"),
            ("age_group_filter", "teens"),
        ]))
        .unwrap();
        assert_eq!(params.search_in, vec!["title", "content"]);
        assert_eq!(params.tag_filter, vec!["outdoor", "team"]);
        assert_eq!(params.age_group_filter, vec!["teens"]);
    }

    #[test]
    fn repeated_scalars_take_the_last_value() {
        let params =
            GameSearchParams::from_items(&items(&[("q", "tag"), ("q", "fangen")])).unwrap();
        assert_eq!(params.query, "fangen");
    }

    #[test]
    fn range_bounds_parse_into_their_slots() {
        let params = GameSearchParams::from_items(&items(&[
            ("min_difficulty_index", "3"),
            ("max_difficulty_index", "7"),
            ("min_duration_index", "2"),
        ]))
        .unwrap();
        assert_eq!(params.difficulty, IndexRange { min: 3, max: 7 });
        assert_eq!(params.duration, IndexRange { min: 2, max: 10 });
    }

    #[test]
    fn range_bounds_must_be_integers() {
        let err = GameSearchParams::from_items(&items(&[("min_physical_index", "low")]))
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid min_physical_index value: low");
    }

    #[test]
    fn inverted_bounds_are_not_an_error() {
        let params = GameSearchParams::from_items(&items(&[
            ("min_group_size_index", "8"),
            ("max_group_size_index", "2"),
        ]))
        .unwrap();
        assert_eq!(params.group_size, IndexRange { min: 8, max: 2 });
    }

    #[test]
    fn sort_tokens_parse_and_unknown_falls_back() {
        assert_eq!(SortBy::parse("title"), SortBy::Title);
        assert_eq!(SortBy::parse("newest"), SortBy::Newest);
        assert_eq!(SortBy::parse("upvotes"), SortBy::Upvotes);
        assert_eq!(SortBy::parse("relevance"), SortBy::Relevance);
        assert_eq!(SortBy::parse("oldest"), SortBy::Relevance);
        assert_eq!(SortBy::parse(""), SortBy::Relevance);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let params =
            GameSearchParams::from_items(&items(&[("format", "json"), ("q", "tent")])).unwrap();
        assert_eq!(params.query, "tent");
    }

    #[test]
    fn whitespace_query_counts_as_empty() {
        let params = GameSearchParams::from_items(&items(&[("q", "   ")])).unwrap();
        assert!(!params.has_query());
    }
}
