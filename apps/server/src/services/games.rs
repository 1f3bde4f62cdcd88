//! Game service - archive operations over a storage backend
//!
//! Orchestrates game operations by:
//! - Parsing and validating search parameters
//! - Delegating storage work to a `GameStore`
//! - Shaping the response bodies the HTTP layer returns

use heck::ToKebabCase;
use validator::Validate;

use crate::{
    db::search::{pagination, strategy},
    db::{GameSearchParams, GameStore},
    models::{
        AgeGroupInfo, GameDetail, GameListResponse, GameVariant, NewGame, NewVariant, TagCount,
        VoteCounts, VoteRequest,
    },
    Result,
};

/// Coordinates archive operations between the HTTP layer and storage.
#[derive(Clone)]
pub struct GameService<S: GameStore> {
    store: S,
}

impl<S: GameStore> GameService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Search the archive.
    ///
    /// GET /games?params
    pub async fn list_games(&self, query_items: &[(String, String)]) -> Result<GameListResponse> {
        let params = GameSearchParams::from_items(query_items)?;
        let strategy = strategy::select(&self.store.capabilities());

        let result = self.store.search_games(&params).await;
        match &result {
            Ok(page) => {
                crate::metrics::GAME_SEARCHES_TOTAL
                    .with_label_values(&[strategy.name(), "success"])
                    .inc();
                crate::metrics::GAME_SEARCH_RESULTS
                    .with_label_values(&[strategy.name()])
                    .observe(page.games.len() as f64);
            }
            Err(_) => {
                crate::metrics::GAME_SEARCHES_TOTAL
                    .with_label_values(&[strategy.name(), "error"])
                    .inc();
            }
        }
        let page = result?;

        Ok(GameListResponse {
            games: page.games,
            pagination: pagination::page_metadata(page.total_count, params.amount),
        })
    }

    /// Read one game.
    ///
    /// GET /games/{slug}
    pub async fn get_game(&self, slug: &str) -> Result<GameDetail> {
        self.store
            .get_game(slug)
            .await?
            .ok_or_else(|| crate::Error::GameNotFound {
                slug: slug.to_string(),
            })
    }

    /// Publish a new game under `creator`'s name.
    ///
    /// POST /games
    pub async fn create_game(&self, new_game: NewGame, creator: &str) -> Result<GameDetail> {
        new_game
            .validate()
            .map_err(|e| crate::Error::Validation(e.to_string()))?;

        // Titles made up entirely of punctuation slugify to nothing.
        let mut base_slug = new_game.title.to_kebab_case();
        if base_slug.is_empty() {
            base_slug = "game".to_string();
        }

        let created = self
            .store
            .create_game(&new_game, &base_slug, creator)
            .await?;
        crate::metrics::GAMES_CREATED_TOTAL.inc();
        Ok(created)
    }

    /// Record `voter`'s vote, replacing any earlier one.
    ///
    /// POST /games/{slug}/vote
    pub async fn cast_vote(
        &self,
        slug: &str,
        voter: &str,
        request: &VoteRequest,
    ) -> Result<VoteCounts> {
        if request.value != 1 && request.value != -1 {
            return Err(crate::Error::Validation(
                "Vote value must be 1 or -1".to_string(),
            ));
        }

        let counts = self
            .store
            .cast_vote(slug, voter, request.value)
            .await?
            .ok_or_else(|| crate::Error::GameNotFound {
                slug: slug.to_string(),
            })?;

        let direction = if request.value == 1 { "up" } else { "down" };
        crate::metrics::VOTES_CAST_TOTAL
            .with_label_values(&[direction])
            .inc();
        Ok(counts)
    }

    /// Variants recorded for a game, oldest first.
    ///
    /// GET /games/{slug}/variants
    pub async fn list_variants(&self, slug: &str) -> Result<Vec<GameVariant>> {
        self.store
            .list_variants(slug)
            .await?
            .ok_or_else(|| crate::Error::GameNotFound {
                slug: slug.to_string(),
            })
    }

    /// Add a variant to a game under `creator`'s name.
    ///
    /// POST /games/{slug}/variants
    pub async fn create_variant(
        &self,
        slug: &str,
        variant: NewVariant,
        creator: &str,
    ) -> Result<GameVariant> {
        variant
            .validate()
            .map_err(|e| crate::Error::Validation(e.to_string()))?;

        self.store
            .create_variant(slug, &variant, creator)
            .await?
            .ok_or_else(|| crate::Error::GameNotFound {
                slug: slug.to_string(),
            })
    }

    /// Tag vocabulary with usage counts, most used first.
    ///
    /// GET /tags
    pub async fn list_tags(&self) -> Result<Vec<TagCount>> {
        self.store.list_tags().await
    }

    /// Age-group vocabulary, youngest bracket first.
    ///
    /// GET /age-groups
    pub async fn list_age_groups(&self) -> Result<Vec<AgeGroupInfo>> {
        self.store.list_age_groups().await
    }
}
