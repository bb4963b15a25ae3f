//! Repository trait for customer login tokens.

use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// A login token registered for a customer.
///
/// Only the HMAC-SHA256 hash of the raw token is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerToken {
    pub customer_key: i64,
    pub token_hash: String,
    pub last_used_at: Option<DateTime<Utc>>,
}

/// Repository interface for login token lookup.
///
/// # Implementations
///
/// - [`crate::infrastructure::memory::MemoryTokenRepository`] - in-memory implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Resolves a token hash to the customer it was issued for.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(customer_key))` if the hash is registered
    /// - `Ok(None)` otherwise
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_customer(&self, token_hash: &str) -> Result<Option<i64>, AppError>;

    /// Records that the token was just used to log in.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the hash is not registered.
    async fn update_last_used(&self, token_hash: &str) -> Result<(), AppError>;

    /// Lists every registered token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn list_tokens(&self) -> Result<Vec<CustomerToken>, AppError>;
}
