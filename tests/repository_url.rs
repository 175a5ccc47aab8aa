//! PostgreSQL repository tests. Require a database reachable via
//! `DATABASE_URL`; run with `cargo test -- --ignored`.

use chrono::{Duration, Utc};
use shortlink::domain::entities::NewUrlMapping;
use shortlink::domain::repositories::UrlRepository;
use shortlink::error::AppError;
use shortlink::infrastructure::persistence::PgUrlRepository;
use sqlx::PgPool;
use std::sync::Arc;

fn new_mapping(code: &str, url: &str) -> NewUrlMapping {
    NewUrlMapping {
        original_url: url.to_string(),
        short_code: code.to_string(),
        created_at: Utc::now(),
        expires_at: None,
    }
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_create_and_find(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool));

    let created = repo
        .create(new_mapping("abc123", "https://example.com"))
        .await
        .unwrap();
    assert_eq!(created.short_code, "abc123");
    assert_eq!(created.click_count, 0);

    let found = repo.find_by_short_code("abc123").await.unwrap().unwrap();
    assert_eq!(found.id, created.id);
    assert_eq!(found.original_url, "https://example.com");
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_find_not_found(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool));

    assert!(repo.find_by_short_code("nothere").await.unwrap().is_none());
    assert!(!repo.exists_by_short_code("nothere").await.unwrap());
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_duplicate_code_conflict(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool));

    repo.create(new_mapping("dup123", "https://one.example.com"))
        .await
        .unwrap();
    let result = repo
        .create(new_mapping("dup123", "https://two.example.com"))
        .await;

    assert!(matches!(result, Err(AppError::Conflict { .. })));
    assert_eq!(repo.count().await.unwrap(), 1);
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_save_updates_click_count(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool));

    let mut mapping = repo
        .create(new_mapping("clk123", "https://example.com"))
        .await
        .unwrap();
    mapping.record_click();
    mapping.record_click();

    let saved = repo.save(&mapping).await.unwrap();
    assert_eq!(saved.click_count, 2);

    let found = repo.find_by_short_code("clk123").await.unwrap().unwrap();
    assert_eq!(found.click_count, 2);
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_expired_mapping_is_still_stored(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool));

    let mut expired = new_mapping("old123", "https://example.com/old");
    expired.expires_at = Some(Utc::now() - Duration::hours(1));
    repo.create(expired).await.unwrap();

    let found = repo.find_by_short_code("old123").await.unwrap().unwrap();
    assert!(found.is_expired());
    assert_eq!(repo.count().await.unwrap(), 1);
}
