use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// GET /
/// The single-page chat shell. All state lives server-side in the session API.
pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}
