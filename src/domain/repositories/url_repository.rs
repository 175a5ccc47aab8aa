//! Repository trait for URL mapping data access.

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::error::AppError;
use async_trait::async_trait;

/// Persistence contract used by [`crate::application::services::UrlService`].
///
/// Implementations must enforce uniqueness of `short_code`: the service checks
/// for collisions before inserting, but the check and the insert are separate
/// calls, so the store is the final authority.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryUrlRepository`] - process-local store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Finds a mapping by its short code.
    ///
    /// Expired mappings are still returned; expiry is evaluated by the caller.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_short_code(&self, short_code: &str) -> Result<Option<UrlMapping>, AppError>;

    /// Returns true if any stored mapping uses `short_code`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn exists_by_short_code(&self, short_code: &str) -> Result<bool, AppError>;

    /// Inserts a new mapping with `click_count = 0`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the short code is already taken.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn create(&self, new_mapping: NewUrlMapping) -> Result<UrlMapping, AppError>;

    /// Updates an existing mapping, matched by `id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no mapping has this id.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn save(&self, mapping: &UrlMapping) -> Result<UrlMapping, AppError>;

    /// Counts all stored mappings, expired ones included.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn count(&self) -> Result<i64, AppError>;
}
