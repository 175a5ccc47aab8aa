//! Short code creation and resolution service.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde_json::json;
use tracing::{debug, warn};

use crate::domain::entities::NewUrlMapping;
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::code_generator::{
    counter_encode, deterministic_candidate, is_valid_short_code, random_candidate,
};

/// Random candidates tried after the deterministic one collides.
const MAX_RANDOM_ATTEMPTS: usize = 5;

/// Times candidate selection is re-run when the store rejects the insert
/// because another request took the code in the meantime.
const MAX_CONFLICT_RETRIES: usize = 3;

/// Shortest URL accepted by [`UrlService::create_short_code`].
const MIN_URL_LENGTH: usize = 10;

/// Service for creating and resolving short codes.
///
/// Owns the collision-avoidance policy on top of a [`UrlRepository`], plus
/// soft expiry and click counting at resolution time.
///
/// # Concurrency
///
/// The collision check and the insert are separate repository calls. Two
/// concurrent creates can pick the same code; the store's uniqueness
/// constraint rejects the loser, which is retried up to
/// `MAX_CONFLICT_RETRIES` times. Click counting is read-modify-write, so
/// concurrent resolutions of one code may lose increments.
pub struct UrlService<R: UrlRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: UrlRepository + ?Sized> UrlService<R> {
    /// Creates a new URL service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Creates a mapping for `original_url` and returns its short code.
    ///
    /// When `ttl_days` is positive the mapping expires that many days from
    /// now; otherwise it never expires.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL does not start with
    /// `http://` or `https://` or is shorter than 10 characters, or if
    /// `ttl_days` puts the expiry beyond the representable date range.
    ///
    /// Returns [`AppError::Conflict`] if every insert attempt lost a race for
    /// its code. Storage errors are propagated unchanged.
    pub async fn create_short_code(
        &self,
        original_url: &str,
        ttl_days: Option<i64>,
    ) -> Result<String, AppError> {
        if !is_valid_url(original_url) {
            return Err(AppError::bad_request(
                "Invalid URL format",
                json!({ "url": original_url }),
            ));
        }

        let mut retries = 0;
        loop {
            let short_code = self.select_code(original_url, retries).await?;

            let now = Utc::now();
            let expires_at = expiry_from(now, ttl_days)?;

            let new_mapping = NewUrlMapping {
                original_url: original_url.to_string(),
                short_code,
                created_at: now,
                expires_at,
            };

            match self.repository.create(new_mapping).await {
                Ok(mapping) => {
                    debug!("Created mapping {} -> {}", mapping.short_code, original_url);
                    return Ok(mapping.short_code);
                }
                Err(AppError::Conflict { .. }) if retries < MAX_CONFLICT_RETRIES => {
                    retries += 1;
                    warn!(
                        "Short code taken between check and insert, retrying ({}/{})",
                        retries, MAX_CONFLICT_RETRIES
                    );
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Resolves a short code to its original URL and records the click.
    ///
    /// Returns `Ok(None)` when the code is unknown or the mapping has
    /// expired; the two cases are not distinguished. Expired mappings are
    /// left untouched.
    ///
    /// # Errors
    ///
    /// Storage errors are propagated unchanged.
    pub async fn resolve(&self, short_code: &str) -> Result<Option<String>, AppError> {
        if !is_valid_short_code(short_code) {
            debug!("Rejected malformed short code {:?}", short_code);
            return Ok(None);
        }

        let Some(mut mapping) = self.repository.find_by_short_code(short_code).await? else {
            debug!("Short code {} not found", short_code);
            return Ok(None);
        };

        if mapping.is_expired() {
            debug!("Short code {} has expired", short_code);
            return Ok(None);
        }

        mapping.record_click();
        let mapping = self.repository.save(&mapping).await?;

        Ok(Some(mapping.original_url))
    }

    /// Returns the number of stored mappings, expired ones included.
    ///
    /// # Errors
    ///
    /// Storage errors are propagated unchanged.
    pub async fn mapping_count(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }

    /// Builds the public short URL by prefixing `base_url` to the code.
    pub fn short_url(&self, base_url: &str, short_code: &str) -> String {
        format!("{}{}", base_url, short_code)
    }

    /// Picks a code not currently in the store.
    ///
    /// Deterministic candidate first, then up to five random candidates, then
    /// the base62 encoding of `count() + 1`. The counter is offset by
    /// `retry` so a conflict retry does not pick the same fallback code.
    async fn select_code(&self, original_url: &str, retry: usize) -> Result<String, AppError> {
        let mut candidate = deterministic_candidate(original_url);

        let mut attempts = 0;
        while attempts < MAX_RANDOM_ATTEMPTS
            && self.repository.exists_by_short_code(&candidate).await?
        {
            debug!("Candidate {} is taken", candidate);
            candidate = random_candidate();
            attempts += 1;
        }

        if self.repository.exists_by_short_code(&candidate).await? {
            let count = self.repository.count().await?;
            candidate = counter_encode(count.max(0) as u64 + 1 + retry as u64);
            debug!("Random candidates exhausted, using counter code {}", candidate);
        }

        Ok(candidate)
    }
}

/// Computes `now + ttl_days`, or `None` when no positive TTL is given.
fn expiry_from(
    now: DateTime<Utc>,
    ttl_days: Option<i64>,
) -> Result<Option<DateTime<Utc>>, AppError> {
    let Some(days) = ttl_days.filter(|days| *days > 0) else {
        return Ok(None);
    };

    Duration::try_days(days)
        .and_then(|ttl| now.checked_add_signed(ttl))
        .map(Some)
        .ok_or_else(|| {
            AppError::bad_request(
                "Expiration is out of range",
                json!({ "expiration_days": days }),
            )
        })
}

/// Deliberately weak check: scheme prefix and minimum length only.
fn is_valid_url(url: &str) -> bool {
    (url.starts_with("http://") || url.starts_with("https://"))
        && url.chars().count() >= MIN_URL_LENGTH
}
