//! Service trait for shared reference data.

use crate::error::AppError;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReferenceService: Send + Sync {
    /// Lists ISO currency codes offered on forms.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage failures.
    async fn fetch_currency_list(&self) -> Result<Vec<String>, AppError>;
}
