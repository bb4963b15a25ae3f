//! Service trait for counter parties.

use crate::domain::entities::CounterPartyTO;
use crate::domain::results::ResultListTO;
use crate::error::AppError;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CounterPartyService: Send + Sync {
    /// Lists the counter parties known to a customer.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage failures.
    async fn fetch_counter_party_list(
        &self,
        customer_key: i64,
    ) -> Result<ResultListTO<CounterPartyTO>, AppError>;
}
