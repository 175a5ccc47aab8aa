#![allow(dead_code)]

use chrono::{DateTime, Utc};
use shortlink::domain::entities::UrlMapping;
use shortlink::domain::repositories::UrlRepository;
use shortlink::infrastructure::persistence::InMemoryUrlRepository;
use shortlink::state::AppState;
use std::sync::Arc;

pub const BASE_URL: &str = "http://localhost:8080/";

pub fn create_test_state() -> (AppState, Arc<InMemoryUrlRepository>) {
    let repo = Arc::new(InMemoryUrlRepository::new());
    let dyn_repo: Arc<dyn UrlRepository> = repo.clone();

    (AppState::new(dyn_repo, BASE_URL), repo)
}

pub async fn create_test_mapping(
    repo: &InMemoryUrlRepository,
    id: i64,
    code: &str,
    url: &str,
    expires_at: Option<DateTime<Utc>>,
) {
    repo.insert_mapping(UrlMapping::new(
        id,
        url.to_string(),
        code.to_string(),
        Utc::now(),
        expires_at,
        0,
    ))
    .await
    .unwrap();
}

pub async fn click_count(repo: &InMemoryUrlRepository, code: &str) -> i64 {
    repo.find_by_short_code(code)
        .await
        .unwrap()
        .expect("mapping should exist")
        .click_count
}

pub fn code_from_short_url(short_url: &str) -> &str {
    short_url
        .strip_prefix(BASE_URL)
        .expect("short URL should start with base URL")
}
