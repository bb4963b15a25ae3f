//! Route paths of the web front.
//!
//! Handlers, redirects and tests refer to these constants instead of string
//! literals. Templates mirror the same strings in their links and form actions.

pub const HOME: &str = "/";
pub const LOGIN: &str = "/login";
pub const LOGOUT: &str = "/logout";
pub const TRANSACTION_LIST: &str = "/transaction/list";
pub const TRANSACTION_CREATE: &str = "/transaction/create";
pub const TRANSACTION_DELETE: &str = "/transaction/delete/{transaction_id}";

/// Concrete delete link for one transaction.
pub fn transaction_delete(transaction_key: i64) -> String {
    TRANSACTION_DELETE.replace("{transaction_id}", &transaction_key.to_string())
}
