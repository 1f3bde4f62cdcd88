//! Game records and the request/response shapes built from them

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A game as it appears in search listings.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct GameSummary {
    pub title: String,
    pub short_description: String,
    pub slug: String,

    pub difficulty_index: i32,
    pub group_size_index: i32,
    /// Kept with its historical spelling; the public API serializes this name.
    pub preperation_index: i32,
    pub physical_index: i32,
    pub duration_index: i32,

    pub tags: Vec<String>,
    pub age_groups: Vec<String>,

    pub upvote_count: i64,
    pub downvote_count: i64,
}

/// Full game record served from the detail endpoint.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct GameDetail {
    pub title: String,
    pub short_description: String,
    pub slug: String,
    pub markdown_content: String,

    pub difficulty_index: i32,
    pub group_size_index: i32,
    pub preperation_index: i32,
    pub physical_index: i32,
    pub duration_index: i32,

    pub tags: Vec<String>,
    pub age_groups: Vec<String>,

    pub upvote_count: i64,
    pub downvote_count: i64,

    pub creator_username: String,
    pub created_at: DateTime<Utc>,
}

/// One page of search results plus pagination metadata.
#[derive(Debug, Clone, Serialize)]
pub struct GameListResponse {
    pub games: Vec<GameSummary>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Serialize)]
pub struct Pagination {
    /// Games matching the search, before paging.
    pub total_count: i64,
    pub total_pages: i64,
}

/// Payload for creating a game. Omitted characteristic indexes land on the
/// lowest rating rather than failing deserialization.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewGame {
    #[validate(length(min = 1, max = 255))]
    pub title: String,

    #[serde(default)]
    pub short_description: String,

    #[serde(default)]
    pub markdown_content: String,

    #[serde(default = "default_index")]
    #[validate(range(min = 1, max = 10))]
    pub difficulty_index: i32,

    #[serde(default = "default_index")]
    #[validate(range(min = 1, max = 10))]
    pub group_size_index: i32,

    #[serde(default = "default_index")]
    #[validate(range(min = 1, max = 10))]
    pub preperation_index: i32,

    #[serde(default = "default_index")]
    #[validate(range(min = 1, max = 10))]
    pub physical_index: i32,

    #[serde(default = "default_index")]
    #[validate(range(min = 1, max = 10))]
    pub duration_index: i32,

    /// Tag names; unknown ones are created on first use.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Age group names; must already exist.
    #[serde(default)]
    pub age_groups: Vec<String>,
}

fn default_index() -> i32 {
    1
}

/// Payload for casting a vote. `value` must be 1 or -1.
#[derive(Debug, Clone, Deserialize)]
pub struct VoteRequest {
    pub value: i16,
}

/// Vote tallies for a single game.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct VoteCounts {
    pub upvote_count: i64,
    pub downvote_count: i64,
}

/// A community-contributed variation of a game.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct GameVariant {
    pub title: String,
    pub markdown_content: String,
    pub creator_username: String,
    pub created_at: DateTime<Utc>,
}

/// Payload for adding a variant to a game.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewVariant {
    #[validate(length(min = 1, max = 255))]
    pub title: String,

    #[serde(default)]
    pub markdown_content: String,
}

/// A tag together with how many games carry it.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct TagCount {
    pub name: String,
    pub game_count: i64,
}

/// An age bracket games can be filtered by. Open-ended brackets leave
/// `min_age` or `max_age` unset.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct AgeGroupInfo {
    pub name: String,
    pub min_age: Option<i32>,
    pub max_age: Option<i32>,
}
