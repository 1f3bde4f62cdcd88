//! SQL query builder for game searches.
//!
//! Builds SQL from parsed search parameters, including:
//! - Strategy-provided text-match conditions
//! - Conjunctive tag and age-group membership filters
//! - Characteristic range filters
//! - Sorting and pagination

use super::bind::{push_int, push_text, BindValue};
use super::params::{GameSearchParams, SortBy};
use super::scope::resolve_columns;
use super::strategy::SearchStrategy;

/// Columns selected for each game in a search page. The tag and age-group
/// arrays and the vote tallies are computed per row so a page is a single
/// round trip.
const SUMMARY_COLUMNS: &str = "g.title, g.short_description, g.slug, g.difficulty_index, g.group_size_index, g.preperation_index, g.physical_index, g.duration_index, ARRAY(SELECT t.name FROM game_tags gt JOIN tags t ON t.id = gt.tag_id WHERE gt.game_id = g.id ORDER BY t.name) AS tags, ARRAY(SELECT ag.name FROM game_age_groups gag JOIN age_groups ag ON ag.id = gag.age_group_id WHERE gag.game_id = g.id ORDER BY ag.min_age, ag.name) AS age_groups, (SELECT COUNT(*) FROM votes v WHERE v.game_id = g.id AND v.value = 1) AS upvote_count, (SELECT COUNT(*) FROM votes v WHERE v.game_id = g.id AND v.value = -1) AS downvote_count";

/// Builds the page and count SQL for one parsed search request.
pub struct GameQueryBuilder<'a> {
    params: &'a GameSearchParams,
    strategy: &'a dyn SearchStrategy,
}

impl<'a> GameQueryBuilder<'a> {
    pub fn new(params: &'a GameSearchParams, strategy: &'a dyn SearchStrategy) -> Self {
        Self { params, strategy }
    }

    /// SQL selecting one page of matching games.
    pub fn build_sql(&self) -> (String, Vec<BindValue>) {
        let mut bind_params = Vec::new();

        let mut sql = format!("SELECT {} FROM games g", SUMMARY_COLUMNS);
        self.push_where(&mut sql, &mut bind_params);
        self.push_order_by(&mut sql, &mut bind_params);

        // Both values were validated during parsing; inline them.
        sql.push_str(&format!(
            " LIMIT {} OFFSET {}",
            self.params.amount, self.params.start_index
        ));

        (sql, bind_params)
    }

    /// SQL counting every match, sharing the page query's filters.
    pub fn build_count_sql(&self) -> (String, Vec<BindValue>) {
        let mut bind_params = Vec::new();

        let mut sql = String::from("SELECT COUNT(*) FROM games g");
        self.push_where(&mut sql, &mut bind_params);

        (sql, bind_params)
    }

    fn push_where(&self, sql: &mut String, bind_params: &mut Vec<BindValue>) {
        let mut where_clauses = Vec::new();

        if self.params.has_query() {
            let columns = resolve_columns(&self.params.search_in);
            self.strategy.push_text_clause(
                &columns,
                &self.params.query,
                &mut where_clauses,
                bind_params,
            );
        }

        // Conjunctive membership: one EXISTS per requested name.
        for tag in &self.params.tag_filter {
            let idx = push_text(bind_params, tag.clone());
            where_clauses.push(format!(
                "EXISTS (SELECT 1 FROM game_tags gt JOIN tags t ON t.id = gt.tag_id WHERE gt.game_id = g.id AND t.name = ${})",
                idx
            ));
        }
        for age_group in &self.params.age_group_filter {
            let idx = push_text(bind_params, age_group.clone());
            where_clauses.push(format!(
                "EXISTS (SELECT 1 FROM game_age_groups gag JOIN age_groups ag ON ag.id = gag.age_group_id WHERE gag.game_id = g.id AND ag.name = ${})",
                idx
            ));
        }

        // Characteristic ranges always apply; the parse defaults span the
        // whole stored scale, so an unfiltered request matches every game.
        for (column, range) in self.params.index_ranges() {
            let min_idx = push_int(bind_params, range.min);
            let max_idx = push_int(bind_params, range.max);
            where_clauses.push(format!(
                "g.{column} >= ${min_idx} AND g.{column} <= ${max_idx}"
            ));
        }

        sql.push_str(" WHERE ");
        sql.push_str(&where_clauses.join(" AND "));
    }

    fn push_order_by(&self, sql: &mut String, bind_params: &mut Vec<BindValue>) {
        let (primary, dir) = match self.params.sort_by {
            SortBy::Title => (Some("g.title".to_string()), "ASC"),
            SortBy::Newest => (Some("g.created_at".to_string()), "DESC"),
            SortBy::Upvotes => (
                Some(
                    "(SELECT COUNT(*) FROM votes v WHERE v.game_id = g.id AND v.value = 1)"
                        .to_string(),
                ),
                "DESC",
            ),
            SortBy::Relevance => {
                let expr = if self.params.has_query() {
                    let columns = resolve_columns(&self.params.search_in);
                    self.strategy
                        .relevance_expr(&columns, &self.params.query, bind_params)
                } else {
                    None
                };
                match expr {
                    // Best match first; strategies without a score keep the
                    // backend's stable default order.
                    Some(expr) => (Some(expr), "DESC"),
                    None => (None, "ASC"),
                }
            }
        };

        let mut order_by = Vec::new();
        if let Some(expr) = primary {
            order_by.push(format!("{expr} {dir}"));
        }
        // Ensure deterministic ordering for pagination.
        order_by.push(format!("g.id {dir}"));

        sql.push_str(" ORDER BY ");
        sql.push_str(&order_by.join(", "));
    }
}
