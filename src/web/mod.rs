//! Web front for browser-based transaction management.
//!
//! Provides HTML pages rendered with Askama templates on top of the
//! [`controller::TransactionController`].
//!
//! # Modules
//!
//! - [`controller`] - Transaction flows and view models
//! - [`forms`] - Form binding and error model
//! - [`handlers`] - Template rendering handlers
//! - [`middleware`] - Session authentication
//! - [`paths`] - Route path constants
//! - [`routes`] - Route configuration
//! - [`session`] - Session store and per-session list state

pub mod controller;
pub mod forms;
pub mod handlers;
pub mod middleware;
pub mod paths;
pub mod routes;
pub mod session;
