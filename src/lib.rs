//! # Expense manager web
//!
//! Browser front of a personal expense manager: list, record and delete
//! transactions of the logged-in customer. Built with Axum and Askama.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Transfer and query objects, issue log, service traits
//! - **Application Layer** ([`application`]) - Login token authentication
//! - **Infrastructure Layer** ([`infrastructure`]) - In-memory backend
//! - **API Layer** ([`api`]) - Health endpoint and HTTP middleware
//! - **Web Layer** ([`web`]) - Transaction controller, sessions and HTML pages
//!
//! ## Features
//!
//! - Transaction list, create form and delete action scoped to the customer
//! - Business issues mapped onto form fields
//! - Cookie sessions with sliding expiry
//! - Rate limiting and observability
//!
//! ## Quick Start
//!
//! ```bash
//! export TOKEN_SIGNING_SECRET="change-me"
//! # Prints a token and the CUSTOMER_TOKENS entry for it
//! cargo run --bin expman-admin -- token create --customer 1
//! export CUSTOMER_TOKENS="1:<hash>"
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;

pub mod config;
pub mod server;

pub mod routes;
pub mod web;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::AuthService;
    pub use crate::domain::entities::{TransactionKind, TransactionTO};
    pub use crate::error::AppError;
    pub use crate::infrastructure::memory::{MemoryStore, MemoryTokenRepository};
    pub use crate::state::AppState;
    pub use crate::web::controller::TransactionController;
}
