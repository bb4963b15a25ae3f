//! Service trait for customer accounts.

use crate::domain::entities::AccountTO;
use crate::domain::queries::AccountQuery;
use crate::domain::results::ResultListTO;
use crate::error::AppError;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Lists the accounts of the query's customer.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage failures.
    async fn fetch_accounts(&self, query: AccountQuery) -> Result<ResultListTO<AccountTO>, AppError>;
}
