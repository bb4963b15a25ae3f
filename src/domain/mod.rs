//! Domain layer containing transfer objects, queries and collaborator contracts.
//!
//! The web layer never talks to storage directly. It builds query objects,
//! hands them to the collaborator services declared in [`services`] and
//! renders the transfer objects those services return.
//!
//! # Architecture
//!
//! - [`entities`] - Read-only transfer objects (`*TO`) returned for display
//! - [`queries`] - Per-request parameter carriers scoped to a customer
//! - [`issues`] - Business issue codes and the issue log
//! - [`results`] - Success-or-issues result wrappers
//! - [`services`] - Collaborator service traits
//! - [`repositories`] - Token storage trait used by authentication
//!
//! # Error Channels
//!
//! Every collaborator call returns `Result<ResultTO<T>, AppError>`:
//!
//! - `Err(AppError)` is an infrastructure failure and propagates to the HTTP layer
//! - `Ok(ResultTO::Issues(..))` is a business rejection shown to the user

pub mod entities;
pub mod issues;
pub mod queries;
pub mod repositories;
pub mod results;
pub mod services;
