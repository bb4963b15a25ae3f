//! Services owned by the web front.

pub mod auth_service;

pub use auth_service::{AuthService, hash_token};
