//! Massive Game Archive - HTTP API server
//!
//! A community archive of group games with:
//! - Weighted full-text search with a substring fallback
//! - Tag and age-group filtering with rated index ranges
//! - Up/down voting and community game variants
//! - Prometheus metrics and structured logging

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod request_context;
pub mod services;
pub mod state;

pub use config::Config;
pub use error::{Error, Result};
pub use state::AppState;
