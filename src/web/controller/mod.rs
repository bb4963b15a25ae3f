//! Transaction controller and its view models.
//!
//! The controller turns request parameters into query objects, calls the
//! collaborator services and returns view models or redirect targets. HTTP
//! concerns (extractors, templates, cookies) stay in [`crate::web::handlers`].

pub mod issue_resolver;
pub mod transaction_controller;
pub mod view;

pub use issue_resolver::{CREATE_TRANSACTION_FIELDS, IssueFieldTable};
pub use transaction_controller::{LEGACY_TOTAL_PAGES, TransactionController};
pub use view::{CreateOutcome, CreateTransactionPage};
