//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::UrlService;
use crate::domain::repositories::UrlRepository;

/// State shared by all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub url_service: Arc<UrlService<dyn UrlRepository>>,
    /// Prefix joined to short codes in API responses, ending in `/`.
    pub base_url: Arc<str>,
}

impl AppState {
    /// Builds the state around a repository implementation.
    pub fn new(repository: Arc<dyn UrlRepository>, base_url: impl Into<Arc<str>>) -> Self {
        Self {
            url_service: Arc::new(UrlService::new(repository)),
            base_url: base_url.into(),
        }
    }
}
