use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// GET /
/// The single-page form that drives the Generation and Poster APIs.
pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}
