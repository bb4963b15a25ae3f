//! Form binding for the create-transaction page.
//!
//! Browsers post every field as text. [`TransactionForm`] keeps the raw values
//! so the page can be re-rendered exactly as submitted, and [`TransactionForm::bind`]
//! converts them into a [`TransactionCreateQuery`] while recording conversion
//! failures in a [`FormErrors`] binding result.

use std::collections::BTreeMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::domain::entities::TransactionKind;
use crate::domain::queries::TransactionCreateQuery;

/// Error messages attached to form fields plus page-level messages.
///
/// Used both as the binding result of [`TransactionForm::bind`] and as the
/// final error model rendered by the create page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormErrors {
    fields: BTreeMap<String, Vec<String>>,
    general: Vec<String>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_field(&mut self, field: &str, message: impl Into<String>) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Adds a message not tied to any field.
    pub fn add_general(&mut self, message: impl Into<String>) {
        self.general.push(message.into());
    }

    /// Messages for `field`; empty when the field is valid.
    pub fn field(&self, field: &str) -> &[String] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn general(&self) -> &[String] {
        &self.general
    }

    /// Names of fields carrying at least one message, sorted.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }

    pub fn has_errors(&self) -> bool {
        !self.fields.is_empty() || !self.general.is_empty()
    }
}

impl From<&ValidationErrors> for FormErrors {
    fn from(errors: &ValidationErrors) -> Self {
        let mut form_errors = FormErrors::new();

        for (field, field_errors) in errors.field_errors() {
            for error in field_errors {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value ({})", error.code));
                form_errors.add_field(&field, message);
            }
        }

        form_errors
    }
}

fn validate_currency_code(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() || (value.len() == 3 && value.chars().all(|c| c.is_ascii_alphabetic())) {
        Ok(())
    } else {
        Err(ValidationError::new("currency_code")
            .with_message("Currency must be a three-letter code".into()))
    }
}

/// Raw create-transaction form as posted by the browser.
///
/// Field names match the `name` attributes in `transaction_create.html` and the
/// field constants on [`TransactionCreateQuery`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, Validate)]
pub struct TransactionForm {
    #[serde(default)]
    pub account: String,
    #[serde(default)]
    pub transaction_type: String,
    #[serde(default)]
    pub counter_party: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    #[validate(custom(function = "validate_currency_code"))]
    pub currency: String,
    #[serde(default)]
    #[validate(length(max = 1000, message = "Description is far too long"))]
    pub description: String,
}

/// A submitted form together with its bound query and binding result.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundForm {
    pub form: TransactionForm,
    pub query: TransactionCreateQuery,
    pub errors: FormErrors,
}

/// Parses an optional text field. Blank input is `None`; unparsable input is
/// `None` plus a binding error on `field`.
fn parse_field<T: FromStr>(
    raw: &str,
    field: &str,
    message: &str,
    errors: &mut FormErrors,
) -> Option<T> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    match raw.parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            errors.add_field(field, message);
            None
        }
    }
}

impl TransactionForm {
    /// Binds the raw form into a create query.
    ///
    /// The returned query is not yet tagged with a customer.
    pub fn bind(self) -> BoundForm {
        let mut errors = match self.validate() {
            Ok(()) => FormErrors::new(),
            Err(e) => FormErrors::from(&e),
        };

        // Accept a decimal comma, common in hand-typed amounts.
        let amount_text = self.amount.replace(',', ".");
        let amount = parse_field::<Decimal>(
            &amount_text,
            TransactionCreateQuery::AMOUNT_FIELD,
            "Amount must be a number",
            &mut errors,
        );
        let account_key = parse_field::<i64>(
            &self.account,
            TransactionCreateQuery::ACCOUNT_FIELD,
            "Unknown account",
            &mut errors,
        );
        let transaction_type_key = parse_field::<i64>(
            &self.transaction_type,
            TransactionCreateQuery::TRANSACTION_TYPE_FIELD,
            "Unknown transaction type",
            &mut errors,
        );
        let counter_party_key = parse_field::<i64>(
            &self.counter_party,
            TransactionCreateQuery::COUNTER_PARTY_FIELD,
            "Unknown counter party",
            &mut errors,
        );
        let kind = parse_field::<TransactionKind>(
            &self.kind,
            TransactionCreateQuery::KIND_FIELD,
            "Unknown transaction kind",
            &mut errors,
        );

        let query = TransactionCreateQuery {
            customer_key: 0,
            account_key,
            transaction_type_key,
            counter_party_key,
            kind,
            amount,
            currency: self.currency.trim().to_ascii_uppercase(),
            description: self.description.clone(),
        };

        BoundForm {
            form: self,
            query,
            errors,
        }
    }
}
