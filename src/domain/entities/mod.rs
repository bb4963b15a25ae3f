//! Transfer objects returned by collaborator services.
//!
//! Transfer objects are plain read-only projections. They are owned by the
//! service layer and only borrowed by the web layer while a page is assembled.
//!
//! # Entity Types
//!
//! - [`TransactionTO`] - A recorded income or expense
//! - [`AccountTO`] - A customer account holding money in one currency
//! - [`CounterPartyTO`] - The other side of a transaction (shop, employer, ...)
//! - [`TransactionTypeTO`] - A customer-defined category (food, salary, ...)
//! - [`TransactionKind`] - Direction of money flow

pub mod account;
pub mod counter_party;
pub mod transaction;
pub mod transaction_type;

pub use account::AccountTO;
pub use counter_party::CounterPartyTO;
pub use transaction::{TransactionKind, TransactionTO};
pub use transaction_type::TransactionTypeTO;
