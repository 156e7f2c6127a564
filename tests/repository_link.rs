mod common;

use link_shortener::domain::entities::NewLink;
use link_shortener::domain::pagination::{Filters, LINK_SORT_ALLOW_LIST};
use link_shortener::domain::repositories::LinkRepository;
use link_shortener::error::AppError;
use link_shortener::infrastructure::persistence::PgLinkRepository;
use sqlx::PgPool;
use std::sync::Arc;

fn new_link(name: &str, token: &str) -> NewLink {
    NewLink {
        name: name.to_string(),
        destination: "https://example.com".to_string(),
        token: token.to_string(),
    }
}

#[sqlx::test]
async fn test_create_link(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    let link = repo.create(new_link("HeroIcons", "abc12")).await.unwrap();

    assert!(link.id > 0);
    assert_eq!(link.name, "HeroIcons");
    assert_eq!(link.token, "abc12");
    assert_eq!(link.version, 1);
    assert_eq!(link.created_at, link.updated_at);
}

#[sqlx::test]
async fn test_create_duplicate_token_is_conflict(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    repo.create(new_link("First", "dup01")).await.unwrap();
    let result = repo.create(new_link("Second", "dup01")).await;

    assert!(matches!(result, Err(AppError::Conflict { .. })));
}

#[sqlx::test]
async fn test_find_by_id_and_token(pool: PgPool) {
    let id = common::create_test_link(&pool, "Docs", "https://docs.rs/", "docs1").await;
    let repo = PgLinkRepository::new(Arc::new(pool));

    let by_id = repo.find_by_id(id).await.unwrap().unwrap();
    let by_token = repo.find_by_token("docs1").await.unwrap().unwrap();

    assert_eq!(by_id, by_token);
    assert!(repo.find_by_id(id + 1000).await.unwrap().is_none());
    assert!(repo.find_by_token("nope1").await.unwrap().is_none());
}

#[sqlx::test]
async fn test_update_bumps_version_and_timestamp(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    let mut link = repo.create(new_link("Before", "upd01")).await.unwrap();

    link.name = "After".to_string();
    let updated = repo.update(&link).await.unwrap();

    assert_eq!(updated.name, "After");
    assert_eq!(updated.version, 2);
    assert!(updated.updated_at > link.updated_at);
    assert_eq!(updated.created_at, link.created_at);
}

#[sqlx::test]
async fn test_stale_update_is_edit_conflict(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    let link = repo.create(new_link("Race", "race1")).await.unwrap();

    let mut first = link.clone();
    first.name = "First writer".to_string();
    let mut second = link.clone();
    second.name = "Second writer".to_string();

    assert!(repo.update(&first).await.is_ok());
    let result = repo.update(&second).await;

    assert!(matches!(result, Err(AppError::EditConflict { .. })));

    let stored = repo.find_by_id(link.id).await.unwrap().unwrap();
    assert_eq!(stored.name, "First writer");
    assert_eq!(stored.version, 2);
}

#[sqlx::test]
async fn test_update_missing_link_is_edit_conflict(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    let mut link = repo.create(new_link("Gone", "gone1")).await.unwrap();
    assert!(repo.delete(link.id).await.unwrap());

    link.name = "Ghost".to_string();
    let result = repo.update(&link).await;

    assert!(matches!(result, Err(AppError::EditConflict { .. })));
}

#[sqlx::test]
async fn test_update_onto_taken_token_is_conflict(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    repo.create(new_link("Owner", "own01")).await.unwrap();
    let mut other = repo.create(new_link("Other", "oth01")).await.unwrap();

    other.token = "own01".to_string();
    let result = repo.update(&other).await;

    assert!(matches!(result, Err(AppError::Conflict { .. })));
}

#[sqlx::test]
async fn test_delete_link(pool: PgPool) {
    let id = common::create_test_link(&pool, "Bye", "https://example.com", "bye01").await;
    let repo = PgLinkRepository::new(Arc::new(pool));

    assert!(repo.delete(id).await.unwrap());
    assert!(!repo.delete(id).await.unwrap());
    assert!(repo.find_by_id(id).await.unwrap().is_none());
}

#[sqlx::test]
async fn test_list_filters_by_name_and_counts_total(pool: PgPool) {
    for (name, token) in [
        ("Rust docs", "rst01"),
        ("Rust blog", "rst02"),
        ("Go blog", "go001"),
    ] {
        common::create_test_link(&pool, name, "https://example.com", token).await;
    }
    let repo = PgLinkRepository::new(Arc::new(pool));

    let page = Filters::new(1, 20, "id", LINK_SORT_ALLOW_LIST)
        .validate()
        .unwrap();

    let (links, total) = repo.list("rust", &page).await.unwrap();
    assert_eq!(total, 2);
    assert_eq!(links.len(), 2);

    let (links, total) = repo.list("", &page).await.unwrap();
    assert_eq!(total, 3);
    assert_eq!(links.len(), 3);
}

#[sqlx::test]
async fn test_list_sorts_and_pages(pool: PgPool) {
    for (name, token) in [("b", "tok01"), ("a", "tok02"), ("c", "tok03")] {
        common::create_test_link(&pool, name, "https://example.com", token).await;
    }
    let repo = PgLinkRepository::new(Arc::new(pool));

    let page = Filters::new(1, 2, "-name", LINK_SORT_ALLOW_LIST)
        .validate()
        .unwrap();
    let (links, total) = repo.list("", &page).await.unwrap();

    assert_eq!(total, 3);
    let names: Vec<&str> = links.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, ["c", "b"]);

    let page = Filters::new(2, 2, "-name", LINK_SORT_ALLOW_LIST)
        .validate()
        .unwrap();
    let (links, _) = repo.list("", &page).await.unwrap();

    assert_eq!(links.len(), 1);
    assert_eq!(links[0].name, "a");
}

#[sqlx::test]
async fn test_list_past_last_page_is_empty(pool: PgPool) {
    for (name, token) in [("a", "pst01"), ("b", "pst02")] {
        common::create_test_link(&pool, name, "https://example.com", token).await;
    }
    let repo = PgLinkRepository::new(Arc::new(pool));

    let page = Filters::new(5, 2, "id", LINK_SORT_ALLOW_LIST)
        .validate()
        .unwrap();
    let (links, total) = repo.list("", &page).await.unwrap();

    assert!(links.is_empty());
    assert_eq!(total, 0);
}
