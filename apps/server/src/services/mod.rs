//! Service layer - domain logic between HTTP handlers and storage

pub mod games;

pub use games::GameService;
