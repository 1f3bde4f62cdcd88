//! Route tables for the API

pub mod games;
pub mod metrics;
