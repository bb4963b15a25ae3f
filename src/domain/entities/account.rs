//! Account transfer object.

use rust_decimal::Decimal;
use serde::Serialize;

/// A customer account. Every transaction is booked against one account and
/// must use the account's currency.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountTO {
    pub account_key: i64,
    pub customer_key: i64,
    pub name: String,
    pub currency: String,
    pub balance: Decimal,
}

impl AccountTO {
    /// Option label used by the create form, e.g. `Cash (BYN)`.
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.name, self.currency)
    }
}
