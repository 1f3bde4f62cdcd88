//! Core trait and PostgreSQL implementation for game storage

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    db::search::{strategy, BackendCapabilities, BindValue, GameQueryBuilder, GameSearchParams},
    models::{AgeGroupInfo, GameDetail, GameSummary, GameVariant, NewGame, NewVariant, TagCount,
        VoteCounts},
    Result,
};

/// One search page together with the pre-paging match total.
#[derive(Debug, Clone)]
pub struct GameSearchResult {
    pub games: Vec<GameSummary>,
    pub total_count: i64,
}

/// Core storage trait for the game archive
///
/// Defines the operations the HTTP layer needs. Any SQL backend can
/// implement this trait; `capabilities` tells the search layer which match
/// strategy the backend supports.
#[async_trait]
pub trait GameStore: Send + Sync + Clone {
    /// What this backend can do for search.
    fn capabilities(&self) -> BackendCapabilities;

    /// One page of games matching `params`, plus the total match count.
    async fn search_games(&self, params: &GameSearchParams) -> Result<GameSearchResult>;

    /// Read the full record for `slug`.
    ///
    /// # Returns
    /// * `Ok(Some(game))` - Game found
    /// * `Ok(None)` - No game with that slug
    async fn get_game(&self, slug: &str) -> Result<Option<GameDetail>>;

    /// Insert a game owned by `creator`, deriving a unique slug from
    /// `base_slug` by appending a numeric suffix when it is taken.
    ///
    /// Tags are created on first use; age groups must already exist.
    async fn create_game(
        &self,
        game: &NewGame,
        base_slug: &str,
        creator: &str,
    ) -> Result<GameDetail>;

    /// Record `voter`'s vote on `slug`, replacing any earlier vote, and
    /// return the new tallies. `Ok(None)` when the game does not exist.
    async fn cast_vote(&self, slug: &str, voter: &str, value: i16) -> Result<Option<VoteCounts>>;

    /// Variants recorded for `slug`, oldest first.
    /// `Ok(None)` when the game does not exist.
    async fn list_variants(&self, slug: &str) -> Result<Option<Vec<GameVariant>>>;

    /// Add a variant to `slug`. `Ok(None)` when the game does not exist.
    async fn create_variant(
        &self,
        slug: &str,
        variant: &NewVariant,
        creator: &str,
    ) -> Result<Option<GameVariant>>;

    /// Every tag with the number of games carrying it, most used first.
    async fn list_tags(&self) -> Result<Vec<TagCount>>;

    /// Every age group, youngest bracket first.
    async fn list_age_groups(&self) -> Result<Vec<AgeGroupInfo>>;
}

/// Columns selected for the game detail shape.
const DETAIL_COLUMNS: &str = "g.title, g.short_description, g.slug, g.markdown_content, g.difficulty_index, g.group_size_index, g.preperation_index, g.physical_index, g.duration_index, ARRAY(SELECT t.name FROM game_tags gt JOIN tags t ON t.id = gt.tag_id WHERE gt.game_id = g.id ORDER BY t.name) AS tags, ARRAY(SELECT ag.name FROM game_age_groups gag JOIN age_groups ag ON ag.id = gag.age_group_id WHERE gag.game_id = g.id ORDER BY ag.min_age, ag.name) AS age_groups, (SELECT COUNT(*) FROM votes v WHERE v.game_id = g.id AND v.value = 1) AS upvote_count, (SELECT COUNT(*) FROM votes v WHERE v.game_id = g.id AND v.value = -1) AS downvote_count, u.username AS creator_username, g.created_at";

/// PostgreSQL-backed game store.
#[derive(Clone)]
pub struct PostgresGameStore {
    pool: PgPool,
    full_text_search: bool,
}

impl PostgresGameStore {
    pub fn new(pool: PgPool, full_text_search: bool) -> Self {
        Self {
            pool,
            full_text_search,
        }
    }

    async fn game_id_by_slug(&self, slug: &str) -> Result<Option<i32>> {
        let id = sqlx::query_scalar::<_, i32>("SELECT id FROM games WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;
        Ok(id)
    }

    /// Upsert keeps the RETURNING row even when the user already exists.
    async fn user_id_for(&self, username: &str) -> Result<i32> {
        let id = sqlx::query_scalar::<_, i32>(
            "INSERT INTO users (username) VALUES ($1) ON CONFLICT (username) DO UPDATE SET username = EXCLUDED.username RETURNING id",
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn slug_exists(&self, slug: &str) -> Result<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM games WHERE slug = $1)")
                .bind(slug)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn unique_slug(&self, base_slug: &str) -> Result<String> {
        let mut slug = base_slug.to_string();
        let mut counter = 1;
        while self.slug_exists(&slug).await? {
            slug = format!("{}-{}", base_slug, counter);
            counter += 1;
        }
        Ok(slug)
    }

    async fn vote_counts(&self, game_id: i32) -> Result<VoteCounts> {
        let counts = sqlx::query_as::<_, VoteCounts>(
            "SELECT COUNT(*) FILTER (WHERE value = 1) AS upvote_count, COUNT(*) FILTER (WHERE value = -1) AS downvote_count FROM votes WHERE game_id = $1",
        )
        .bind(game_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(counts)
    }
}

#[async_trait]
impl GameStore for PostgresGameStore {
    fn capabilities(&self) -> BackendCapabilities {
        BackendCapabilities {
            full_text_search: self.full_text_search,
        }
    }

    async fn search_games(&self, params: &GameSearchParams) -> Result<GameSearchResult> {
        let strategy = strategy::select(&self.capabilities());
        let builder = GameQueryBuilder::new(params, strategy);

        let (sql, bind_values) = builder.build_sql();
        let mut query = sqlx::query_as::<_, GameSummary>(&sql);
        for value in bind_values {
            query = match value {
                BindValue::Text(v) => query.bind(v),
                BindValue::Int(v) => query.bind(v),
            };
        }
        let games = query
            .fetch_all(&self.pool)
            .await
            .map_err(crate::Error::Database)?;

        let (count_sql, count_binds) = builder.build_count_sql();
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        for value in count_binds {
            count_query = match value {
                BindValue::Text(v) => count_query.bind(v),
                BindValue::Int(v) => count_query.bind(v),
            };
        }
        let total_count = count_query
            .fetch_one(&self.pool)
            .await
            .map_err(crate::Error::Database)?;

        Ok(GameSearchResult { games, total_count })
    }

    async fn get_game(&self, slug: &str) -> Result<Option<GameDetail>> {
        let sql = format!(
            "SELECT {} FROM games g JOIN users u ON u.id = g.creator_id WHERE g.slug = $1",
            DETAIL_COLUMNS
        );
        let game = sqlx::query_as::<_, GameDetail>(&sql)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;
        Ok(game)
    }

    async fn create_game(
        &self,
        game: &NewGame,
        base_slug: &str,
        creator: &str,
    ) -> Result<GameDetail> {
        let creator_id = self.user_id_for(creator).await?;
        let slug = self.unique_slug(base_slug).await?;

        let mut tx = self.pool.begin().await?;

        let game_id = sqlx::query_scalar::<_, i32>(
            "INSERT INTO games (title, short_description, slug, markdown_content, creator_id, difficulty_index, group_size_index, preperation_index, physical_index, duration_index) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING id",
        )
        .bind(&game.title)
        .bind(&game.short_description)
        .bind(&slug)
        .bind(&game.markdown_content)
        .bind(creator_id)
        .bind(game.difficulty_index)
        .bind(game.group_size_index)
        .bind(game.preperation_index)
        .bind(game.physical_index)
        .bind(game.duration_index)
        .fetch_one(&mut *tx)
        .await?;

        for tag in &game.tags {
            let tag_id = sqlx::query_scalar::<_, i32>(
                "INSERT INTO tags (name) VALUES ($1) ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name RETURNING id",
            )
            .bind(tag)
            .fetch_one(&mut *tx)
            .await?;
            sqlx::query(
                "INSERT INTO game_tags (game_id, tag_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
            )
            .bind(game_id)
            .bind(tag_id)
            .execute(&mut *tx)
            .await?;
        }

        for age_group in &game.age_groups {
            let age_group_id =
                sqlx::query_scalar::<_, i32>("SELECT id FROM age_groups WHERE name = $1")
                    .bind(age_group)
                    .fetch_optional(&mut *tx)
                    .await?
                    .ok_or_else(|| {
                        crate::Error::Validation(format!("Unknown age group: {}", age_group))
                    })?;
            sqlx::query(
                "INSERT INTO game_age_groups (game_id, age_group_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
            )
            .bind(game_id)
            .bind(age_group_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        self.get_game(&slug).await?.ok_or_else(|| {
            crate::Error::Internal(format!("game '{}' missing directly after insert", slug))
        })
    }

    async fn cast_vote(&self, slug: &str, voter: &str, value: i16) -> Result<Option<VoteCounts>> {
        let Some(game_id) = self.game_id_by_slug(slug).await? else {
            return Ok(None);
        };
        let user_id = self.user_id_for(voter).await?;

        // One row per (game, user); a second vote replaces the first.
        sqlx::query(
            "INSERT INTO votes (game_id, user_id, value) VALUES ($1, $2, $3) ON CONFLICT (game_id, user_id) DO UPDATE SET value = EXCLUDED.value, updated_at = now()",
        )
        .bind(game_id)
        .bind(user_id)
        .bind(value)
        .execute(&self.pool)
        .await?;

        let counts = self.vote_counts(game_id).await?;
        Ok(Some(counts))
    }

    async fn list_variants(&self, slug: &str) -> Result<Option<Vec<GameVariant>>> {
        let Some(game_id) = self.game_id_by_slug(slug).await? else {
            return Ok(None);
        };
        let variants = sqlx::query_as::<_, GameVariant>(
            "SELECT gv.title, gv.markdown_content, u.username AS creator_username, gv.created_at FROM game_variants gv JOIN users u ON u.id = gv.creator_id WHERE gv.game_id = $1 ORDER BY gv.created_at, gv.id",
        )
        .bind(game_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(Some(variants))
    }

    async fn create_variant(
        &self,
        slug: &str,
        variant: &NewVariant,
        creator: &str,
    ) -> Result<Option<GameVariant>> {
        let Some(game_id) = self.game_id_by_slug(slug).await? else {
            return Ok(None);
        };
        let creator_id = self.user_id_for(creator).await?;

        let variant_id = sqlx::query_scalar::<_, i32>(
            "INSERT INTO game_variants (game_id, title, markdown_content, creator_id) VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(game_id)
        .bind(&variant.title)
        .bind(&variant.markdown_content)
        .bind(creator_id)
        .fetch_one(&self.pool)
        .await?;

        let created = sqlx::query_as::<_, GameVariant>(
            "SELECT gv.title, gv.markdown_content, u.username AS creator_username, gv.created_at FROM game_variants gv JOIN users u ON u.id = gv.creator_id WHERE gv.id = $1",
        )
        .bind(variant_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(Some(created))
    }

    async fn list_tags(&self) -> Result<Vec<TagCount>> {
        let tags = sqlx::query_as::<_, TagCount>(
            "SELECT t.name, COUNT(gt.game_id) AS game_count FROM tags t LEFT JOIN game_tags gt ON gt.tag_id = t.id GROUP BY t.id, t.name ORDER BY game_count DESC, t.name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(tags)
    }

    async fn list_age_groups(&self) -> Result<Vec<AgeGroupInfo>> {
        let age_groups = sqlx::query_as::<_, AgeGroupInfo>(
            "SELECT name, min_age, max_age FROM age_groups ORDER BY min_age, name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(age_groups)
    }
}
