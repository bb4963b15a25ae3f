//! HTML template rendering handlers for the web front.

mod home;
mod login;
mod transactions;

pub use home::home_handler;
pub use login::{login_handler, login_page_handler, logout_handler};
pub use transactions::{
    delete_transaction_handler, list_transactions_handler, show_create_form_handler,
    submit_create_form_handler,
};
