//! Service trait for transaction operations.

use crate::domain::entities::TransactionTO;
use crate::domain::queries::{DeleteTransactionQuery, TransactionCreateQuery, TransactionListQuery};
use crate::domain::results::{ResultListTO, ResultTO};
use crate::error::AppError;
use async_trait::async_trait;

/// Transaction lifecycle operations, always scoped to the query's customer.
///
/// # Implementations
///
/// - [`crate::infrastructure::memory::MemoryStore`] - in-memory implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TransactionService: Send + Sync {
    /// Deletes a transaction owned by the query's customer.
    ///
    /// Returns the deleted transaction, or issues when it does not exist or
    /// belongs to someone else.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage failures.
    async fn delete_transaction(
        &self,
        query: DeleteTransactionQuery,
    ) -> Result<ResultTO<TransactionTO>, AppError>;

    /// Fetches one page of the customer's transactions, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage failures.
    async fn fetch_transactions(
        &self,
        query: TransactionListQuery,
    ) -> Result<ResultListTO<TransactionTO>, AppError>;

    /// Validates and records a new transaction.
    ///
    /// Business rule violations are reported as issues, not errors.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage failures.
    async fn create_transaction(
        &self,
        query: TransactionCreateQuery,
    ) -> Result<ResultTO<TransactionTO>, AppError>;
}
