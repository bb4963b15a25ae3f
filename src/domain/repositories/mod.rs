//! Repository trait definitions for the domain layer.
//!
//! Only login tokens are stored behind a repository; transaction data is owned
//! by the collaborator services in [`crate::domain::services`].
//!
//! # Available Repositories
//!
//! - [`TokenRepository`] - Customer login token lookup

pub mod token_repository;

pub use token_repository::{CustomerToken, TokenRepository};

#[cfg(test)]
pub use token_repository::MockTokenRepository;
