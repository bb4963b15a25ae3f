//! Cookie-session authentication middleware for the web front.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{Redirect, Response},
};

use crate::api::middleware::tracing as request_tracing;
use crate::state::AppState;
use crate::web::paths;
use crate::web::session::{CurrentCustomer, session_id_from_headers};

/// Resolves the session cookie into the caller's security context.
///
/// # Cookie Format
///
/// ```text
/// Cookie: expman_session=<session id>
/// ```
///
/// # Authentication Flow
///
/// 1. Extract the `expman_session` cookie from the request
/// 2. Resolve it via [`crate::web::session::SessionStore::resolve`], which
///    also slides the session expiry
/// 3. On success, record the customer key on the request span, insert
///    [`CurrentCustomer`] into request extensions and continue to the handler
/// 4. On a missing, unknown or expired session, redirect to `/login`
///
/// # Example
///
/// ```rust,ignore
/// let protected = Router::new()
///     .route("/transaction/list", get(list_transactions_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), web_auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Redirect> {
    let Some(session_id) = session_id_from_headers(req.headers()) else {
        return Err(Redirect::to(paths::LOGIN));
    };

    match st.sessions.resolve(&session_id).await {
        Some(customer_key) => {
            request_tracing::record_customer(customer_key);
            req.extensions_mut().insert(CurrentCustomer {
                customer_key,
                session_id,
            });
            Ok(next.run(req).await)
        }
        None => {
            tracing::debug!("Unknown or expired session, redirecting to login");
            Err(Redirect::to(paths::LOGIN))
        }
    }
}
