//! Query objects passed to collaborator services.
//!
//! Queries are created per request and dropped after the call. Every query is
//! tagged with the customer key of the caller so services can scope results.

use rust_decimal::Decimal;

use crate::domain::entities::TransactionKind;

/// Parameters for creating a transaction.
///
/// Built from the submitted create form. Optional fields are `None` when the
/// form left them blank; services decide whether that is an issue.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionCreateQuery {
    pub customer_key: i64,
    pub account_key: Option<i64>,
    pub transaction_type_key: Option<i64>,
    pub counter_party_key: Option<i64>,
    pub kind: Option<TransactionKind>,
    pub amount: Option<Decimal>,
    pub currency: String,
    pub description: String,
}

impl TransactionCreateQuery {
    pub const AMOUNT_FIELD: &'static str = "amount";
    pub const DESCRIPTION_FIELD: &'static str = "description";
    pub const CURRENCY_FIELD: &'static str = "currency";
    pub const ACCOUNT_FIELD: &'static str = "account";
    pub const TRANSACTION_TYPE_FIELD: &'static str = "transaction_type";
    pub const COUNTER_PARTY_FIELD: &'static str = "counter_party";
    pub const KIND_FIELD: &'static str = "kind";

    /// Tags the query with the caller's identity, replacing any previous value.
    pub fn with_customer(mut self, customer_key: i64) -> Self {
        self.customer_key = customer_key;
        self
    }
}

/// Parameters for listing transactions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionListQuery {
    pub customer_key: i64,
    /// 1-based page number.
    pub page: u32,
    pub page_size: u32,
}

impl TransactionListQuery {
    pub const DEFAULT_PAGE_SIZE: u32 = 20;

    /// First page for `customer_key`.
    pub fn for_customer(customer_key: i64, page_size: u32) -> Self {
        Self {
            customer_key,
            page: 1,
            page_size,
        }
    }

    /// Number of records to skip for the requested page.
    pub fn offset(&self) -> usize {
        (self.page.saturating_sub(1) as usize) * self.page_size as usize
    }
}

/// Parameters for deleting a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteTransactionQuery {
    pub transaction_key: i64,
    pub customer_key: i64,
}

/// Parameters for listing accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountQuery {
    pub customer_key: i64,
}
