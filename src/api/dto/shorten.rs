//! DTOs for link shortening endpoint.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

/// Longest original URL accepted by the API.
pub const MAX_URL_LENGTH: usize = 2048;

/// Request to shorten a single URL.
///
/// ```json
/// { "url": "https://example.com/very/long/url", "expirationDays": 7 }
/// ```
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    /// The original URL. A missing field is treated as blank.
    #[serde(default)]
    #[validate(custom(function = "validate_url_field"))]
    pub url: String,

    /// Optional lifetime in days; zero or negative means no expiry.
    pub expiration_days: Option<i64>,
}

/// Successful shortening result.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub short_url: String,
}

/// Client error body returned for rejected URLs.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

fn validate_url_field(url: &str) -> Result<(), ValidationError> {
    if url.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(Cow::from("URL cannot be empty")));
    }

    if url.chars().count() > MAX_URL_LENGTH {
        return Err(ValidationError::new("length")
            .with_message(Cow::from("URL must be at most 2048 characters")));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_uses_camel_case() {
        let request: ShortenRequest = serde_json::from_value(json!({
            "url": "https://example.com",
            "expirationDays": 3
        }))
        .unwrap();

        assert_eq!(request.url, "https://example.com");
        assert_eq!(request.expiration_days, Some(3));
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_missing_url_is_blank() {
        let request: ShortenRequest = serde_json::from_value(json!({})).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_blank_url_rejected() {
        let request: ShortenRequest = serde_json::from_value(json!({ "url": "   " })).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_overlong_url_rejected() {
        let url = format!("https://example.com/{}", "a".repeat(MAX_URL_LENGTH));
        let request: ShortenRequest = serde_json::from_value(json!({ "url": url })).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_url_limit_counts_characters() {
        let prefix = "https://example.com/";
        let url = format!("{}{}", prefix, "é".repeat(MAX_URL_LENGTH - prefix.len()));
        assert!(url.len() > MAX_URL_LENGTH);

        let request: ShortenRequest = serde_json::from_value(json!({ "url": url })).unwrap();
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_weak_urls_pass_dto_validation() {
        // Format checks belong to the service; the DTO only rejects blanks.
        let request: ShortenRequest =
            serde_json::from_value(json!({ "url": "not-a-url" })).unwrap();
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_response_serializes_short_url() {
        let body = serde_json::to_value(ShortenResponse {
            short_url: "http://localhost:8080/abc123".to_string(),
        })
        .unwrap();

        assert_eq!(body, json!({ "shortUrl": "http://localhost:8080/abc123" }));
    }
}
