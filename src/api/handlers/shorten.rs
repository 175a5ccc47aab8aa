//! Handler for link shortening endpoint.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use validator::Validate;

use crate::api::dto::shorten::{MessageResponse, ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link for a long URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/very/long/url", "expirationDays": 7 }
/// ```
///
/// # Response
///
/// ```json
/// { "shortUrl": "http://localhost:8080/jsWWxE" }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request with `{ "message": "..." }` if the URL is blank or
/// malformed. Storage failures are returned as 500 with the standard error
/// envelope.
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>, Response> {
    match process_request(&state, payload).await {
        Ok(short_url) => Ok(Json(ShortenResponse { short_url })),
        Err(AppError::Validation { message, .. }) => {
            Err((StatusCode::BAD_REQUEST, Json(MessageResponse { message })).into_response())
        }
        Err(err) => Err(err.into_response()),
    }
}

async fn process_request(state: &AppState, payload: ShortenRequest) -> Result<String, AppError> {
    payload.validate()?;

    let code = state
        .url_service
        .create_short_code(&payload.url, payload.expiration_days)
        .await?;

    Ok(state.url_service.short_url(&state.base_url, &code))
}
