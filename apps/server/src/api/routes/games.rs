//! Archive API Routes
//!
//! Slugs are case-sensitive and URLs are decoded as UTF-8, both of which
//! Axum's router and `Path` extractor already guarantee. Every route is
//! registered with and without a trailing slash; no redirects are involved.

use crate::api::handlers::{games, reference};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn game_routes() -> Router<AppState> {
    Router::new()
        .route("/games", get(games::list_games).post(games::create_game))
        .route("/games/", get(games::list_games).post(games::create_game))
        .route("/games/:slug", get(games::get_game))
        .route("/games/:slug/", get(games::get_game))
        .route("/games/:slug/vote", post(games::cast_vote))
        .route("/games/:slug/vote/", post(games::cast_vote))
        .route(
            "/games/:slug/variants",
            get(games::list_variants).post(games::create_variant),
        )
        .route(
            "/games/:slug/variants/",
            get(games::list_variants).post(games::create_variant),
        )
        .route("/tags", get(reference::list_tags))
        .route("/tags/", get(reference::list_tags))
        .route("/age-groups", get(reference::list_age_groups))
        .route("/age-groups/", get(reference::list_age_groups))
}
