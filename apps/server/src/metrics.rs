//! Metrics collection for the archive server
//!
//! This module defines and manages Prometheus metrics for monitoring the archive server.

use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter, register_int_counter_vec,
    register_int_gauge_vec, HistogramVec, IntCounter, IntCounterVec, IntGaugeVec,
};

lazy_static! {
    // HTTP Request Metrics

    /// Total HTTP requests by method, path, and status
    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "archive_http_requests_total",
        "Total number of HTTP requests",
        &["method", "path", "status"]
    )
    .expect("Failed to register HTTP_REQUESTS_TOTAL");

    /// HTTP request duration in seconds
    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "archive_http_request_duration_seconds",
        "HTTP request duration in seconds",
        &["method", "path"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .expect("Failed to register HTTP_REQUEST_DURATION_SECONDS");

    /// In-flight HTTP requests
    pub static ref HTTP_REQUESTS_IN_FLIGHT: IntGaugeVec = register_int_gauge_vec!(
        "archive_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
        &["method", "path"]
    )
    .expect("Failed to register HTTP_REQUESTS_IN_FLIGHT");

    // Search Metrics

    /// Game searches by strategy and outcome
    pub static ref GAME_SEARCHES_TOTAL: IntCounterVec = register_int_counter_vec!(
        "archive_game_searches_total",
        "Total number of game search requests",
        &["strategy", "status"]
    )
    .expect("Failed to register GAME_SEARCHES_TOTAL");

    /// Games returned per search page
    pub static ref GAME_SEARCH_RESULTS: HistogramVec = register_histogram_vec!(
        "archive_game_search_results",
        "Number of games returned by a search page",
        &["strategy"],
        vec![0.0, 1.0, 5.0, 10.0, 20.0, 35.0, 50.0]
    )
    .expect("Failed to register GAME_SEARCH_RESULTS");

    // Contribution Metrics

    /// Votes cast by direction
    pub static ref VOTES_CAST_TOTAL: IntCounterVec = register_int_counter_vec!(
        "archive_votes_cast_total",
        "Total number of votes cast",
        &["direction"]
    )
    .expect("Failed to register VOTES_CAST_TOTAL");

    /// Games created
    pub static ref GAMES_CREATED_TOTAL: IntCounter = register_int_counter!(
        "archive_games_created_total",
        "Total number of games created"
    )
    .expect("Failed to register GAMES_CREATED_TOTAL");
}

/// Helper to sanitize path for metrics labels (remove slugs, limit cardinality)
pub fn sanitize_path(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match segments.as_slice() {
        [] => "/".to_string(),
        [single] => format!("/{single}"),
        ["games", _slug] => "/games/{slug}".to_string(),
        ["games", _slug, "vote"] => "/games/{slug}/vote".to_string(),
        ["games", _slug, "variants"] => "/games/{slug}/variants".to_string(),
        ["games", _slug, ..] => "/games/{slug}".to_string(),
        // Unknown nested paths collapse to their first segment.
        [first, ..] => format!("/{first}"),
    }
}
