//! User infrastructure module
//!
//! This module provides the user service and the repository implementations
//! backing it: an in-memory store and a PostgreSQL store.

mod postgres_repository;
mod repository;
mod service;

pub use postgres_repository::PostgresUserRepository;
pub use repository::InMemoryUserRepository;
pub use service::{UpdateUserRequest, UserService};
