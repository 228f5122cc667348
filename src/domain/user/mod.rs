//! User domain
//!
//! This module provides domain types and traits for user management,
//! including the user entity and the repository trait.

mod entity;
mod repository;

pub use entity::{User, UserId};
pub use repository::UserRepository;

#[cfg(test)]
pub use repository::mock::{MockUserRepository, RepositoryCall};
