//! In-memory reference data services: accounts, categories, counter parties, currencies.

use async_trait::async_trait;

use super::MemoryStore;
use crate::domain::entities::{AccountTO, CounterPartyTO, TransactionTypeTO};
use crate::domain::queries::AccountQuery;
use crate::domain::results::ResultListTO;
use crate::domain::services::{
    AccountService, CounterPartyService, ReferenceService, TransactionTypeService,
};
use crate::error::AppError;

#[async_trait]
impl TransactionTypeService for MemoryStore {
    async fn find_transaction_type_list_for_customer(
        &self,
        customer_key: i64,
    ) -> Result<ResultListTO<TransactionTypeTO>, AppError> {
        let data = self.data.read().await;

        let mut list: Vec<TransactionTypeTO> = data
            .transaction_types
            .values()
            .filter(|t| t.customer_key == customer_key)
            .cloned()
            .collect();
        list.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(ResultListTO::of(list))
    }
}

#[async_trait]
impl CounterPartyService for MemoryStore {
    async fn fetch_counter_party_list(
        &self,
        customer_key: i64,
    ) -> Result<ResultListTO<CounterPartyTO>, AppError> {
        let data = self.data.read().await;

        let mut list: Vec<CounterPartyTO> = data
            .counter_parties
            .values()
            .filter(|p| p.customer_key == customer_key)
            .cloned()
            .collect();
        list.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(ResultListTO::of(list))
    }
}

#[async_trait]
impl AccountService for MemoryStore {
    async fn fetch_accounts(&self, query: AccountQuery) -> Result<ResultListTO<AccountTO>, AppError> {
        let data = self.data.read().await;

        // Accounts keep opening order.
        let list = data
            .accounts
            .values()
            .filter(|a| a.customer_key == query.customer_key)
            .cloned()
            .collect();

        Ok(ResultListTO::of(list))
    }
}

#[async_trait]
impl ReferenceService for MemoryStore {
    async fn fetch_currency_list(&self) -> Result<Vec<String>, AppError> {
        Ok(self.currencies.clone())
    }
}
