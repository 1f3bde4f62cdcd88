//! Game endpoint handlers
//!
//! Handlers coordinate between routes and the game service:
//! - GET  /games                  search with paging
//! - POST /games                  publish a new game
//! - GET  /games/{slug}           full game record
//! - POST /games/{slug}/vote      cast or change a vote
//! - GET  /games/{slug}/variants  list community variants
//! - POST /games/{slug}/variants  add a variant

use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

use crate::{api::extractors::CurrentUser, state::AppState, Result};

/// Search the archive.
///
/// Query parameters may repeat (`search_in`, `tag_filter`, `age_group_filter`),
/// so the raw query string is parsed into (key, value) items instead of a map.
pub async fn list_games(State(state): State<AppState>, request: Request) -> Result<Response> {
    let items = match request.uri().query() {
        Some(query) => parse_form_urlencoded(query),
        None => Vec::new(),
    };

    let response = state.games.list_games(&items).await?;
    Ok(Json(response).into_response())
}

/// Read one game by slug.
///
/// - 200 OK with the full record
/// - 404 when the slug is unknown
pub async fn get_game(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Response> {
    let game = state.games.get_game(&slug).await?;
    Ok(Json(game).into_response())
}

/// Publish a new game.
///
/// - 201 Created with the stored record, including the assigned slug
/// - 400 for invalid payloads
pub async fn create_game(
    State(state): State<AppState>,
    user: CurrentUser,
    request: Request,
) -> Result<Response> {
    let payload = json_body(request).await?;
    let created = state.games.create_game(payload, &user.0).await?;
    Ok((StatusCode::CREATED, Json(created)).into_response())
}

/// Cast or change a vote on a game.
///
/// - 200 OK with the updated tallies
/// - 400 when the value is not 1 or -1
pub async fn cast_vote(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    user: CurrentUser,
    request: Request,
) -> Result<Response> {
    let payload = json_body(request).await?;
    let counts = state.games.cast_vote(&slug, &user.0, &payload).await?;
    Ok(Json(counts).into_response())
}

/// List variants recorded for a game, oldest first.
pub async fn list_variants(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Response> {
    let variants = state.games.list_variants(&slug).await?;
    Ok(Json(variants).into_response())
}

/// Add a variant to a game.
pub async fn create_variant(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    user: CurrentUser,
    request: Request,
) -> Result<Response> {
    let payload = json_body(request).await?;
    let created = state.games.create_variant(&slug, payload, &user.0).await?;
    Ok((StatusCode::CREATED, Json(created)).into_response())
}

/// Read and deserialize a JSON request body.
///
/// Deserialization goes through `crate::Error` so malformed bodies produce
/// the same 400 shape as other validation failures.
async fn json_body<T: serde::de::DeserializeOwned>(request: Request) -> Result<T> {
    let bytes = axum::body::to_bytes(request.into_body(), usize::MAX)
        .await
        .map_err(|e| crate::Error::Validation(format!("Failed to read request body: {}", e)))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| crate::Error::Validation(format!("Invalid JSON in request body: {}", e)))
}

/// Parse a query string into (key, value) items, preserving repeats.
fn parse_form_urlencoded(query: &str) -> Vec<(String, String)> {
    // `url::form_urlencoded` implements the full encoding, including '+' as space.
    url::form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect()
}
