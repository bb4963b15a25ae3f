//! Collaborator service contracts consumed by the transaction controller.
//!
//! The controller receives these as `Arc<dyn Trait>` constructor arguments; no
//! container wiring is involved. The shipped implementation lives in
//! [`crate::infrastructure::memory`].
//!
//! # Available Services
//!
//! - [`TransactionService`] - Create, list and delete transactions
//! - [`TransactionTypeService`] - Customer transaction categories
//! - [`CounterPartyService`] - Customer counter parties
//! - [`AccountService`] - Customer accounts
//! - [`ReferenceService`] - Reference data such as currencies
//!
//! # Testing
//!
//! Mock implementations are generated via `mockall` under `cfg(test)`.

pub mod account_service;
pub mod counter_party_service;
pub mod reference_service;
pub mod transaction_service;
pub mod transaction_type_service;

pub use account_service::AccountService;
pub use counter_party_service::CounterPartyService;
pub use reference_service::ReferenceService;
pub use transaction_service::TransactionService;
pub use transaction_type_service::TransactionTypeService;

#[cfg(test)]
pub use account_service::MockAccountService;
#[cfg(test)]
pub use counter_party_service::MockCounterPartyService;
#[cfg(test)]
pub use reference_service::MockReferenceService;
#[cfg(test)]
pub use transaction_service::MockTransactionService;
#[cfg(test)]
pub use transaction_type_service::MockTransactionTypeService;
