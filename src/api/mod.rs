//! JSON and middleware layer.
//!
//! Hosts the health endpoint and the HTTP middleware shared by every route.
//!
//! # Modules
//!
//! - [`dto`] - Response serialization types
//! - [`handlers`] - JSON handlers
//! - [`middleware`] - Rate limiting and request tracing

pub mod dto;
pub mod handlers;
pub mod middleware;
