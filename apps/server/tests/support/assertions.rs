use anyhow::Context as _;
use axum::http::StatusCode;
use serde_json::Value;

/// Assert a response status with a label for the failing step
pub fn assert_status(status: StatusCode, expected: StatusCode, context: &str) {
    assert_eq!(status, expected, "unexpected status for {context}");
}

/// Parse a response body as JSON
pub fn parse_json(body: &[u8]) -> anyhow::Result<Value> {
    serde_json::from_slice(body).context("response body is JSON")
}

/// Assert the standard validation error shape: `{"error": "..."}`
pub fn assert_error_message(body: &Value, expected: &str) {
    assert_eq!(
        body.get("error").and_then(|v| v.as_str()),
        Some(expected),
        "expected error message {expected:?}, got {body}"
    );
}

/// Assert the not-found shape: `{"detail": "..."}`
pub fn assert_detail_message(body: &Value, expected: &str) {
    assert_eq!(
        body.get("detail").and_then(|v| v.as_str()),
        Some(expected),
        "expected detail message {expected:?}, got {body}"
    );
}

/// Get the games array from a list response
pub fn get_games<'a>(body: &'a Value) -> anyhow::Result<&'a Vec<Value>> {
    body.get("games")
        .and_then(|v| v.as_array())
        .context("response.games is array")
}

/// Extract game slugs from a list response, in order
pub fn game_slugs(body: &Value) -> anyhow::Result<Vec<String>> {
    let slugs = get_games(body)?
        .iter()
        .filter_map(|g| g.get("slug").and_then(|v| v.as_str()).map(String::from))
        .collect();
    Ok(slugs)
}

/// Assert the pagination block of a list response
pub fn assert_pagination(body: &Value, total_count: i64, total_pages: i64) {
    let pagination = body.get("pagination").cloned().unwrap_or_default();
    assert_eq!(
        pagination.get("total_count").and_then(|v| v.as_i64()),
        Some(total_count),
        "total_count in {pagination}"
    );
    assert_eq!(
        pagination.get("total_pages").and_then(|v| v.as_i64()),
        Some(total_pages),
        "total_pages in {pagination}"
    );
}
