//! Transaction page handlers.
//!
//! Thin adapters between axum and [`crate::web::controller::TransactionController`]:
//! they extract the session and form, call the controller and render its view
//! models with Askama.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Extension, Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};

use crate::domain::entities::TransactionKind;
use crate::error::AppError;
use crate::state::AppState;
use crate::web::controller::{CreateOutcome, CreateTransactionPage};
use crate::web::forms::{FormErrors, TransactionForm};
use crate::web::paths;
use crate::web::session::{CurrentCustomer, TransactionListSession};

/// One rendered row of the transaction list.
pub struct TransactionRow {
    pub date: String,
    pub description: String,
    pub account: String,
    pub transaction_type: String,
    pub counter_party: String,
    pub kind: &'static str,
    pub amount: String,
    pub currency: String,
    pub delete_link: String,
}

/// A page number in the pager.
pub struct PageLink {
    pub number: u32,
    pub current: bool,
}

/// Template for the transaction list page.
///
/// Renders `templates/transaction_list.html` from the session-bound list.
#[derive(Template, WebTemplate)]
#[template(path = "transaction_list.html")]
pub struct TransactionListTemplate {
    pub rows: Vec<TransactionRow>,
    pub pages: Vec<PageLink>,
    pub current_page: u32,
    pub page_size: u32,
    pub total_pages: u32,
}

impl From<&TransactionListSession> for TransactionListTemplate {
    fn from(session: &TransactionListSession) -> Self {
        let rows = session
            .transactions
            .iter()
            .map(|t| TransactionRow {
                date: t.process_date_label(),
                description: t.description.clone(),
                account: t.account_name.clone(),
                transaction_type: t.transaction_type_name.clone(),
                counter_party: t.counter_party_name.clone().unwrap_or_default(),
                kind: t.kind.as_str(),
                amount: t.signed_amount().to_string(),
                currency: t.currency.clone(),
                delete_link: paths::transaction_delete(t.transaction_key),
            })
            .collect();

        let paginator = &session.paginator;
        let pages = paginator
            .pages()
            .into_iter()
            .map(|number| PageLink {
                number,
                current: number == paginator.current_page,
            })
            .collect();

        Self {
            rows,
            pages,
            current_page: paginator.current_page,
            page_size: paginator.page_size,
            total_pages: paginator.total_pages,
        }
    }
}

/// An `<option>` of a select box.
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl SelectOption {
    fn new(value: impl ToString, label: impl Into<String>, current: &str) -> Self {
        let value = value.to_string();
        let selected = value.eq_ignore_ascii_case(current.trim());
        Self {
            value,
            label: label.into(),
            selected,
        }
    }
}

/// Template for the create-transaction page.
///
/// Renders `templates/transaction_create.html`. Select boxes are prepared
/// here so the submitted choice stays selected when the form is shown again.
#[derive(Template, WebTemplate)]
#[template(path = "transaction_create.html")]
pub struct CreateTransactionTemplate {
    pub accounts: Vec<SelectOption>,
    pub transaction_types: Vec<SelectOption>,
    pub counter_parties: Vec<SelectOption>,
    pub currencies: Vec<SelectOption>,
    pub kinds: Vec<SelectOption>,
    pub amount: String,
    pub description: String,
    pub errors: FormErrors,
}

impl From<CreateTransactionPage> for CreateTransactionTemplate {
    fn from(page: CreateTransactionPage) -> Self {
        let form = &page.form;

        let accounts = page
            .accounts
            .iter()
            .map(|a| SelectOption::new(a.account_key, a.display_name(), &form.account))
            .collect();
        let transaction_types = page
            .transaction_types
            .iter()
            .map(|t| {
                SelectOption::new(t.transaction_type_key, t.name.clone(), &form.transaction_type)
            })
            .collect();
        let counter_parties = page
            .counter_parties
            .iter()
            .map(|p| SelectOption::new(p.counter_party_key, p.name.clone(), &form.counter_party))
            .collect();
        let currencies = page
            .currencies
            .iter()
            .map(|c| SelectOption::new(c, c.clone(), &form.currency))
            .collect();

        let chosen_kind = if form.kind.trim().is_empty() {
            TransactionKind::Expense.as_str()
        } else {
            form.kind.as_str()
        };
        let kinds = page
            .kinds
            .iter()
            .map(|k| SelectOption::new(k.as_str(), k.label(), chosen_kind))
            .collect();

        Self {
            accounts,
            transaction_types,
            counter_parties,
            currencies,
            kinds,
            amount: form.amount.clone(),
            description: form.description.clone(),
            errors: page.errors,
        }
    }
}

/// Lists the caller's transactions.
///
/// # Endpoint
///
/// `GET /transaction/list`
///
/// The controller updates the session's list state, which is stored back into
/// the session before rendering.
///
/// # Errors
///
/// Returns an [`AppError`] on backend failure or when the session ended
/// during the request.
pub async fn list_transactions_handler(
    State(st): State<AppState>,
    Extension(customer): Extension<CurrentCustomer>,
) -> Result<TransactionListTemplate, AppError> {
    let session = st.sessions.transaction_list(&customer.session_id).await;

    let session = st
        .transaction_controller
        .list_transactions(&customer, session)
        .await?;

    let template = TransactionListTemplate::from(&session);
    st.sessions
        .store_transaction_list(&customer.session_id, session)
        .await?;

    Ok(template)
}

/// Shows a blank create form.
///
/// # Endpoint
///
/// `GET /transaction/create`
pub async fn show_create_form_handler(
    State(st): State<AppState>,
    Extension(customer): Extension<CurrentCustomer>,
) -> Result<CreateTransactionTemplate, AppError> {
    let page = st.transaction_controller.show_create_form(&customer).await?;
    Ok(CreateTransactionTemplate::from(page))
}

/// Submits the create form.
///
/// # Endpoint
///
/// `POST /transaction/create`
///
/// # Responses
///
/// - **303 See Other** to `/` when the transaction was created
/// - **200 OK** with the form, submitted values and errors otherwise
pub async fn submit_create_form_handler(
    State(st): State<AppState>,
    Extension(customer): Extension<CurrentCustomer>,
    Form(form): Form<TransactionForm>,
) -> Result<Response, AppError> {
    let outcome = st
        .transaction_controller
        .submit_create_form(&customer, form.bind())
        .await?;

    Ok(match outcome {
        CreateOutcome::Created(_) => Redirect::to(paths::HOME).into_response(),
        CreateOutcome::Rejected(page) => CreateTransactionTemplate::from(*page).into_response(),
    })
}

/// Deletes a transaction and returns to the list.
///
/// # Endpoint
///
/// `GET /transaction/delete/{transaction_id}`
pub async fn delete_transaction_handler(
    State(st): State<AppState>,
    Extension(customer): Extension<CurrentCustomer>,
    Path(transaction_id): Path<i64>,
) -> Result<Redirect, AppError> {
    let target = st
        .transaction_controller
        .delete_transaction(&customer, transaction_id)
        .await?;

    Ok(Redirect::to(target))
}
