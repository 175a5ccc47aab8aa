//! URL mapping entity: a short code bound to an original URL.

use chrono::{DateTime, Utc};

/// A stored mapping between a short code and its original URL.
///
/// `created_at` is fixed at creation. `click_count` only grows, and only on
/// successful resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct UrlMapping {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub click_count: i64,
}

impl UrlMapping {
    /// Creates a new UrlMapping instance.
    pub fn new(
        id: i64,
        original_url: String,
        short_code: String,
        created_at: DateTime<Utc>,
        expires_at: Option<DateTime<Utc>>,
        click_count: i64,
    ) -> Self {
        Self {
            id,
            original_url,
            short_code,
            created_at,
            expires_at,
            click_count,
        }
    }

    /// Returns true if the mapping expired strictly before `now`.
    ///
    /// A mapping without `expires_at` never expires.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|e| e < now)
    }

    /// Returns true if the mapping has passed its expiry time.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn record_click(&mut self) {
        self.click_count += 1;
    }
}

/// Input data for persisting a new mapping. The store assigns `id` and
/// starts `click_count` at zero.
#[derive(Debug, Clone)]
pub struct NewUrlMapping {
    pub original_url: String,
    pub short_code: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl NewUrlMapping {
    /// Builds the stored record once the store has assigned an id.
    pub fn into_mapping(self, id: i64) -> UrlMapping {
        UrlMapping::new(
            id,
            self.original_url,
            self.short_code,
            self.created_at,
            self.expires_at,
            0,
        )
    }
}
