//! Request handlers for API endpoints
//!
//! Handlers coordinate between routes and services, handling:
//! - Request extraction and validation
//! - Service invocation
//! - Response formatting
//! - Error handling

pub mod games;
pub mod metrics;
pub mod reference;

pub use games::*;
pub use metrics::*;
pub use reference::*;
