//! Infrastructure layer for collaborator implementations.
//!
//! This layer implements the traits defined by the domain layer.
//!
//! # Modules
//!
//! - [`memory`] - Process-local implementations of every collaborator service
//!   and of the login token repository

pub mod memory;
