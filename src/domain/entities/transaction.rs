//! Transaction transfer object and the kind enumeration.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direction of a transaction.
///
/// The create form offers every value of [`TransactionKind::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    /// All kinds in display order.
    pub const ALL: [TransactionKind; 2] = [TransactionKind::Income, TransactionKind::Expense];

    /// Form value used in `<select>` options.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            other => Err(format!("Unknown transaction kind '{}'", other)),
        }
    }
}

/// A recorded transaction as shown in the transaction list.
///
/// Names of the related account, type and counter party are denormalized so the
/// list page renders without extra lookups.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionTO {
    pub transaction_key: i64,
    pub customer_key: i64,
    pub account_key: i64,
    pub account_name: String,
    pub transaction_type_key: i64,
    pub transaction_type_name: String,
    pub counter_party_key: Option<i64>,
    pub counter_party_name: Option<String>,
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub currency: String,
    pub description: String,
    pub process_date: DateTime<Utc>,
}

impl TransactionTO {
    /// Amount with sign applied: expenses are negative.
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }

    /// Processing date formatted for the list page.
    pub fn process_date_label(&self) -> String {
        self.process_date.format("%Y-%m-%d %H:%M").to_string()
    }
}
