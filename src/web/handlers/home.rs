//! Home page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Extension, response::IntoResponse};

use crate::web::session::CurrentCustomer;

/// Template for the home page.
///
/// Renders `templates/home.html` with links to the transaction pages.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub customer_key: i64,
}

/// Renders the home page.
///
/// # Endpoint
///
/// `GET /`
///
/// Also the landing page after login and after a transaction is created.
pub async fn home_handler(Extension(customer): Extension<CurrentCustomer>) -> impl IntoResponse {
    HomeTemplate {
        customer_key: customer.customer_key,
    }
}
