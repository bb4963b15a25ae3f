//! Maps business issue codes onto form fields.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::domain::issues::IssueLog;
use crate::domain::issues::codes::create_transaction;
use crate::domain::queries::TransactionCreateQuery;
use crate::web::forms::FormErrors;

/// Immutable issue code → form field name table.
pub type IssueFieldTable = HashMap<&'static str, &'static str>;

/// Field table for the create-transaction form, built once per process.
pub static CREATE_TRANSACTION_FIELDS: LazyLock<IssueFieldTable> = LazyLock::new(|| {
    HashMap::from([
        (
            create_transaction::AMOUNT_IS_INCORRECT,
            TransactionCreateQuery::AMOUNT_FIELD,
        ),
        (
            create_transaction::AMOUNT_IS_MANDATORY,
            TransactionCreateQuery::AMOUNT_FIELD,
        ),
        (
            create_transaction::DESCRIPTION_IS_MANDATORY,
            TransactionCreateQuery::DESCRIPTION_FIELD,
        ),
        (
            create_transaction::DESCRIPTION_IS_TOO_LARGE,
            TransactionCreateQuery::DESCRIPTION_FIELD,
        ),
        (
            create_transaction::CURRENCY_IS_NOT_MATCH_WITH_ACCOUNT_CURRENCY,
            TransactionCreateQuery::CURRENCY_FIELD,
        ),
    ])
});

/// Merges an issue log into a binding result.
///
/// Each issue's message is attached to the field its code maps to. Codes absent
/// from `table` never produce a field error; their messages land in the
/// general bucket instead.
pub fn resolve(issue_log: &IssueLog, table: &IssueFieldTable, binding: FormErrors) -> FormErrors {
    issue_log
        .iter()
        .fold(binding, |mut errors, issue| {
            match table.get(issue.code.as_str()) {
                Some(field) => errors.add_field(field, issue.message.clone()),
                None => {
                    tracing::debug!(code = %issue.code, "Issue code has no form field");
                    errors.add_general(issue.message.clone());
                }
            }
            errors
        })
}
