//! Handler for the service index.

use axum::{Json, extract::Query};

use crate::api::dto::index::{IndexQuery, IndexResponse};

/// Identifies the service and echoes any redirect error flag.
///
/// # Endpoint
///
/// `GET /`
///
/// Failed short link redirects land here as `/?error=url_not_found`.
pub async fn index_handler(Query(query): Query<IndexQuery>) -> Json<IndexResponse> {
    Json(IndexResponse {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        error: query.error,
    })
}
