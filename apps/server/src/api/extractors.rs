//! Custom Axum extractors for the archive API.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

/// Longest username accepted from the identity header.
const MAX_USERNAME_LENGTH: usize = 150;

/// Axum extractor for the acting user on write endpoints.
///
/// The archive sits behind a gateway that authenticates users and forwards
/// the username in the `X-Archive-User` header. Requests without the header
/// are rejected with 401.
#[derive(Debug)]
pub struct CurrentUser(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = crate::Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let username = parts
            .headers
            .get("x-archive-user")
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .unwrap_or("");

        if username.is_empty() {
            return Err(crate::Error::Unauthorized(
                "Missing X-Archive-User header".to_string(),
            ));
        }
        if username.len() > MAX_USERNAME_LENGTH {
            return Err(crate::Error::Validation(format!(
                "Username exceeds {} characters",
                MAX_USERNAME_LENGTH
            )));
        }

        Ok(CurrentUser(username.to_string()))
    }
}
