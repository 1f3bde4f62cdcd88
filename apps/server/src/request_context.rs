//! Per-request context injected by middleware.

#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: String,
    /// Correlation id supplied by the client, if it sent one.
    pub correlation_id: Option<String>,
}
