//! Web front route configuration.

use crate::state::AppState;
use crate::web::handlers::{
    delete_transaction_handler, home_handler, list_transactions_handler, login_handler,
    login_page_handler, logout_handler, show_create_form_handler, submit_create_form_handler,
};
use crate::web::paths;
use axum::{Router, routing::get};

/// Protected routes requiring a session.
///
/// Protected via [`crate::web::middleware::web_auth`] (session cookie).
///
/// # Endpoints
///
/// - `GET /` - Home page
/// - `GET /transaction/list` - Transaction list
/// - `GET /transaction/create` - Create form
/// - `POST /transaction/create` - Submit create form
/// - `GET /transaction/delete/{transaction_id}` - Delete, then back to the list
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route(paths::HOME, get(home_handler))
        .route(paths::TRANSACTION_LIST, get(list_transactions_handler))
        .route(
            paths::TRANSACTION_CREATE,
            get(show_create_form_handler).post(submit_create_form_handler),
        )
        .route(paths::TRANSACTION_DELETE, get(delete_transaction_handler))
}

/// Public routes without authentication.
///
/// # Endpoints
///
/// - `GET /login` - Login page
/// - `POST /login` - Exchange a token for a session
/// - `GET /logout` - End the session
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route(paths::LOGIN, get(login_page_handler).post(login_handler))
        .route(paths::LOGOUT, get(logout_handler))
}
