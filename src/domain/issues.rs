//! Business issue codes and the issue log.
//!
//! Services reject a request by returning an [`IssueLog`] instead of a payload.
//! Each [`Issue`] carries a stable machine code (see [`codes`]) and a message
//! suitable for display next to a form field.

use serde::Serialize;

/// Stable business issue codes, grouped by operation.
pub mod codes {
    /// Codes reported by transaction creation.
    pub mod create_transaction {
        pub const AMOUNT_IS_INCORRECT: &str = "create_transaction.amount_is_incorrect";
        pub const AMOUNT_IS_MANDATORY: &str = "create_transaction.amount_is_mandatory";
        pub const DESCRIPTION_IS_MANDATORY: &str = "create_transaction.description_is_mandatory";
        pub const DESCRIPTION_IS_TOO_LARGE: &str = "create_transaction.description_is_too_large";
        pub const CURRENCY_IS_NOT_MATCH_WITH_ACCOUNT_CURRENCY: &str =
            "create_transaction.currency_is_not_match_with_account_currency";
        pub const ACCOUNT_IS_MANDATORY: &str = "create_transaction.account_is_mandatory";
        pub const ACCOUNT_NOT_FOUND: &str = "create_transaction.account_not_found";
        pub const TRANSACTION_TYPE_NOT_FOUND: &str = "create_transaction.transaction_type_not_found";
        pub const COUNTER_PARTY_NOT_FOUND: &str = "create_transaction.counter_party_not_found";
    }

    /// Codes reported by transaction deletion.
    pub mod delete_transaction {
        pub const TRANSACTION_NOT_FOUND: &str = "delete_transaction.transaction_not_found";
        pub const BALANCE_OUT_OF_RANGE: &str = "delete_transaction.balance_out_of_range";
    }
}

/// Returns the default display message for a known code.
///
/// Unknown codes fall back to the code itself so nothing is rendered empty.
pub fn default_message(code: &str) -> String {
    use codes::create_transaction as create;
    use codes::delete_transaction as delete;

    let message = match code {
        create::AMOUNT_IS_INCORRECT => "Amount must be greater than zero",
        create::AMOUNT_IS_MANDATORY => "Amount is required",
        create::DESCRIPTION_IS_MANDATORY => "Description is required",
        create::DESCRIPTION_IS_TOO_LARGE => "Description is too long",
        create::CURRENCY_IS_NOT_MATCH_WITH_ACCOUNT_CURRENCY => {
            "Currency does not match the account currency"
        }
        create::ACCOUNT_IS_MANDATORY => "Account is required",
        create::ACCOUNT_NOT_FOUND => "Account not found",
        create::TRANSACTION_TYPE_NOT_FOUND => "Transaction type not found",
        create::COUNTER_PARTY_NOT_FOUND => "Counter party not found",
        delete::TRANSACTION_NOT_FOUND => "Transaction not found",
        delete::BALANCE_OUT_OF_RANGE => "Account balance would go out of range",
        other => return other.to_string(),
    };

    message.to_string()
}

/// A single business-rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub code: String,
    pub message: String,
}

impl Issue {
    /// Creates an issue with the default message for `code`.
    pub fn new(code: impl Into<String>) -> Self {
        let code = code.into();
        let message = default_message(&code);
        Self { code, message }
    }

    /// Creates an issue with a custom message.
    pub fn with_message(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Ordered collection of issues reported by one service call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IssueLog {
    issues: Vec<Issue>,
}

impl IssueLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an issue with the default message for `code`.
    pub fn add(&mut self, code: &str) {
        self.issues.push(Issue::new(code));
    }

    pub fn push(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.issues.iter().any(|issue| issue.code == code)
    }

    /// All codes in insertion order, handy for log lines.
    pub fn codes(&self) -> Vec<&str> {
        self.issues.iter().map(|issue| issue.code.as_str()).collect()
    }
}

impl From<Vec<Issue>> for IssueLog {
    fn from(issues: Vec<Issue>) -> Self {
        Self { issues }
    }
}

impl FromIterator<Issue> for IssueLog {
    fn from_iter<T: IntoIterator<Item = Issue>>(iter: T) -> Self {
        Self {
            issues: iter.into_iter().collect(),
        }
    }
}
