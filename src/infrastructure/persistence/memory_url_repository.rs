//! Process-local implementation of the URL repository.

use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

#[derive(Default)]
struct Store {
    next_id: i64,
    by_code: HashMap<String, UrlMapping>,
    code_by_id: HashMap<i64, String>,
}

/// In-memory repository keyed by short code.
///
/// Used when no database is configured and in tests. Enforces the same
/// `short_code` uniqueness as the PostgreSQL table. Contents are lost when
/// the process exits.
#[derive(Default)]
pub struct InMemoryUrlRepository {
    store: RwLock<Store>,
}

impl InMemoryUrlRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        debug!("Using in-memory URL repository");
        Self::default()
    }

    /// Stores a fully-formed mapping as-is, keeping its id and counters.
    ///
    /// Intended for seeding fixtures such as already-expired mappings.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the short code is already taken.
    pub async fn insert_mapping(&self, mapping: UrlMapping) -> Result<(), AppError> {
        let mut store = self.store.write().await;

        if store.by_code.contains_key(&mapping.short_code) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "short_code": mapping.short_code }),
            ));
        }

        store.next_id = store.next_id.max(mapping.id);
        store
            .code_by_id
            .insert(mapping.id, mapping.short_code.clone());
        store.by_code.insert(mapping.short_code.clone(), mapping);
        Ok(())
    }
}

#[async_trait]
impl UrlRepository for InMemoryUrlRepository {
    async fn find_by_short_code(&self, short_code: &str) -> Result<Option<UrlMapping>, AppError> {
        let store = self.store.read().await;
        Ok(store.by_code.get(short_code).cloned())
    }

    async fn exists_by_short_code(&self, short_code: &str) -> Result<bool, AppError> {
        let store = self.store.read().await;
        Ok(store.by_code.contains_key(short_code))
    }

    async fn create(&self, new_mapping: NewUrlMapping) -> Result<UrlMapping, AppError> {
        let mut store = self.store.write().await;

        if store.by_code.contains_key(&new_mapping.short_code) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "short_code": new_mapping.short_code }),
            ));
        }

        store.next_id += 1;
        let mapping = new_mapping.into_mapping(store.next_id);
        store
            .code_by_id
            .insert(mapping.id, mapping.short_code.clone());
        store
            .by_code
            .insert(mapping.short_code.clone(), mapping.clone());

        Ok(mapping)
    }

    async fn save(&self, mapping: &UrlMapping) -> Result<UrlMapping, AppError> {
        let mut store = self.store.write().await;

        let Some(existing_code) = store.code_by_id.get(&mapping.id).cloned() else {
            return Err(AppError::not_found(
                "URL mapping not found",
                json!({ "id": mapping.id }),
            ));
        };

        if existing_code != mapping.short_code {
            if store.by_code.contains_key(&mapping.short_code) {
                return Err(AppError::conflict(
                    "Unique constraint violation",
                    json!({ "short_code": mapping.short_code }),
                ));
            }
            store.by_code.remove(&existing_code);
            store
                .code_by_id
                .insert(mapping.id, mapping.short_code.clone());
        }

        store
            .by_code
            .insert(mapping.short_code.clone(), mapping.clone());

        Ok(mapping.clone())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let store = self.store.read().await;
        Ok(store.by_code.len() as i64)
    }
}
