//! View models produced by the transaction controller.

use crate::domain::entities::{
    AccountTO, CounterPartyTO, TransactionKind, TransactionTO, TransactionTypeTO,
};
use crate::web::forms::{FormErrors, TransactionForm};

/// Everything the create-transaction page renders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateTransactionPage {
    /// Submitted values, blank for a fresh form.
    pub form: TransactionForm,
    pub transaction_types: Vec<TransactionTypeTO>,
    pub counter_parties: Vec<CounterPartyTO>,
    pub currencies: Vec<String>,
    pub kinds: Vec<TransactionKind>,
    pub accounts: Vec<AccountTO>,
    pub errors: FormErrors,
}

/// Result of submitting the create form.
#[derive(Debug, Clone, PartialEq)]
pub enum CreateOutcome {
    /// The transaction was recorded; the browser goes home.
    Created(TransactionTO),
    /// The form is shown again with the submitted values and errors.
    Rejected(Box<CreateTransactionPage>),
}
