//! Serves the embedded browser client.

use axum::response::{Html, IntoResponse};

const INDEX_HTML: &str = include_str!("../../../assets/index.html");

/// GET / - The two-screen competitor search page.
pub async fn index() -> impl IntoResponse {
    Html(INDEX_HTML)
}
