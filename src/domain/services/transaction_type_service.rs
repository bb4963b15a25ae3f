//! Service trait for transaction categories.

use crate::domain::entities::TransactionTypeTO;
use crate::domain::results::ResultListTO;
use crate::error::AppError;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TransactionTypeService: Send + Sync {
    /// Lists the transaction types defined by a customer.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage failures.
    async fn find_transaction_type_list_for_customer(
        &self,
        customer_key: i64,
    ) -> Result<ResultListTO<TransactionTypeTO>, AppError>;
}
