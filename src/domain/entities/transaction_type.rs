use serde::Serialize;

/// A customer-defined transaction category such as "Food" or "Salary".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionTypeTO {
    pub transaction_type_key: i64,
    pub customer_key: i64,
    pub name: String,
    pub description: Option<String>,
}
