//! Application layer services.
//!
//! Transaction business logic belongs to the collaborator services declared in
//! [`crate::domain::services`]. This layer only holds services the web front
//! owns itself.
//!
//! # Available Services
//!
//! - [`services::auth_service::AuthService`] - Login token authentication

pub mod services;
