use shrinkify::domain::entities::UrlRecord;
use shrinkify::domain::error::StorageError;
use shrinkify::domain::repositories::UrlStore;
use shrinkify::infrastructure::persistence::PgUrlStore;
use sqlx::PgPool;
use std::sync::Arc;

async fn insert_raw(pool: &PgPool, hash: &str, target: &str) {
    sqlx::query("INSERT INTO url_details (hash_value, target_url) VALUES ($1, $2)")
        .bind(hash)
        .bind(target)
        .execute(pool)
        .await
        .unwrap();
}

#[sqlx::test]
async fn test_insert_and_find_by_hash(pool: PgPool) {
    let store = PgUrlStore::new(Arc::new(pool));

    store
        .insert(UrlRecord::new("cd69b81ea0", "https://example.com/a"))
        .await
        .unwrap();

    let found = store.find_by_hash("cd69b81ea0").await.unwrap();
    assert_eq!(
        found,
        Some(UrlRecord::new("cd69b81ea0", "https://example.com/a"))
    );
}

#[sqlx::test]
async fn test_find_by_hash_missing(pool: PgPool) {
    let store = PgUrlStore::new(Arc::new(pool));

    let found = store.find_by_hash("deadbeef00").await.unwrap();

    assert!(found.is_none());
}

#[sqlx::test]
async fn test_find_by_target(pool: PgPool) {
    insert_raw(&pool, "abc1234567", "https://example.com/t").await;
    let store = PgUrlStore::new(Arc::new(pool));

    let found = store.find_by_target("https://example.com/t").await.unwrap();
    assert_eq!(found.map(|r| r.hash_value), Some("abc1234567".to_string()));

    let missing = store.find_by_target("https://example.com/other").await.unwrap();
    assert!(missing.is_none());
}

#[sqlx::test]
async fn test_insert_existing_hash_is_collision(pool: PgPool) {
    insert_raw(&pool, "abc1234567", "https://example.com/one").await;
    let store = PgUrlStore::new(Arc::new(pool));

    let result = store
        .insert(UrlRecord::new("abc1234567", "https://example.com/two"))
        .await;

    assert_eq!(
        result,
        Err(StorageError::HashCollision("abc1234567".to_string()))
    );

    let kept = store.find_by_hash("abc1234567").await.unwrap().unwrap();
    assert_eq!(kept.target_url, "https://example.com/one");
}

#[sqlx::test]
async fn test_insert_existing_target_is_duplicate(pool: PgPool) {
    insert_raw(&pool, "abc1234567", "https://example.com/one").await;
    let store = PgUrlStore::new(Arc::new(pool));

    let result = store
        .insert(UrlRecord::new("fff1234567", "https://example.com/one"))
        .await;

    assert_eq!(result, Err(StorageError::DuplicateTarget));
}

#[sqlx::test]
async fn test_delete_reports_rows_affected(pool: PgPool) {
    insert_raw(&pool, "abc1234567", "https://example.com/d").await;
    let store = PgUrlStore::new(Arc::new(pool));

    assert_eq!(store.delete("abc1234567").await.unwrap(), 1);
    assert_eq!(store.delete("abc1234567").await.unwrap(), 0);
    assert!(store.find_by_hash("abc1234567").await.unwrap().is_none());
}

#[sqlx::test]
async fn test_connection_probe(pool: PgPool) {
    let store = PgUrlStore::new(Arc::new(pool));

    assert!(store.test_connection().await.is_ok());
}
