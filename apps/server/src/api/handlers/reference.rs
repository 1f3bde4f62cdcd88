//! Reference vocabulary handlers
//!
//! Tags and age groups back the archive's filter dropdowns.

use axum::{
    extract::State,
    response::{IntoResponse, Json, Response},
};

use crate::{state::AppState, Result};

/// List every tag with its usage count, most used first.
pub async fn list_tags(State(state): State<AppState>) -> Result<Response> {
    let tags = state.games.list_tags().await?;
    Ok(Json(tags).into_response())
}

/// List every age group, youngest bracket first.
pub async fn list_age_groups(State(state): State<AppState>) -> Result<Response> {
    let age_groups = state.games.list_age_groups().await?;
    Ok(Json(age_groups).into_response())
}
