//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::{debug, error};

use crate::error::AppError;
use crate::state::AppState;

/// Where unknown or expired codes are sent.
pub const NOT_FOUND_REDIRECT: &str = "/?error=url_not_found";

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// Every successful redirect increments the mapping's click count. Unknown
/// and expired codes both redirect to [`NOT_FOUND_REDIRECT`].
///
/// # Errors
///
/// Returns 500 Internal Server Error if the store is unavailable or the
/// stored URL cannot be sent as a `Location` header.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    match state.url_service.resolve(&code).await? {
        Some(original_url) => temporary_redirect(&original_url),
        None => {
            debug!("No active mapping for {}", code);
            temporary_redirect(NOT_FOUND_REDIRECT)
        }
    }
}

/// Builds a 307 response without panicking on URLs that are not valid
/// header values.
fn temporary_redirect(location: &str) -> Result<Response, AppError> {
    let value = HeaderValue::from_str(location).map_err(|_| {
        error!("Stored URL is not a valid Location header: {:?}", location);
        AppError::internal("Stored URL cannot be redirected to", json!({}))
    })?;

    Ok((StatusCode::TEMPORARY_REDIRECT, [(header::LOCATION, value)]).into_response())
}
