//! Login and logout handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::{HeaderMap, StatusCode, header::SET_COOKIE},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::error::AppError;
use crate::state::AppState;
use crate::web::paths;
use crate::web::session::{expired_session_cookie, session_cookie, session_id_from_headers};

/// Template for the login page.
///
/// Renders `templates/login.html` with:
/// - Token input form
/// - Error banner after a rejected token
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: String,
}

/// Submitted login form.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub token: String,
}

/// Renders the login page.
///
/// # Endpoint
///
/// `GET /login`
pub async fn login_page_handler() -> impl IntoResponse {
    LoginTemplate {
        error: String::new(),
    }
}

/// Exchanges a login token for a session cookie.
///
/// # Endpoint
///
/// `POST /login`
///
/// # Responses
///
/// - **303 See Other** to `/` with `Set-Cookie: expman_session=...` on success
/// - **401 Unauthorized** with the login page and an error banner when the
///   token is blank or unknown
pub async fn login_handler(State(st): State<AppState>, Form(form): Form<LoginForm>) -> Response {
    match st.auth_service.authenticate(&form.token).await {
        Ok(customer_key) => {
            let session_id = st.sessions.create(customer_key).await;
            let cookie = session_cookie(&session_id, st.session_ttl(), st.cookie_secure);

            ([(SET_COOKIE, cookie)], Redirect::to(paths::HOME)).into_response()
        }
        Err(AppError::Unauthorized { .. }) => {
            tracing::info!("Login rejected");
            (
                StatusCode::UNAUTHORIZED,
                LoginTemplate {
                    error: "Invalid token".to_string(),
                },
            )
                .into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// Ends the session and clears the cookie.
///
/// # Endpoint
///
/// `GET /logout`
pub async fn logout_handler(State(st): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    if let Some(session_id) = session_id_from_headers(&headers)
        && st.sessions.remove(&session_id).await
    {
        tracing::info!("Session closed");
    }

    (
        [(SET_COOKIE, expired_session_cookie())],
        Redirect::to(paths::LOGIN),
    )
}
