mod common;

use shrinkify::application::services::{CollisionPolicy, UrlService};
use shrinkify::domain::error::{ServiceFailure, StorageError};
use shrinkify::domain::outcome::{CreateOutcome, DeleteOutcome, ResolveOutcome};
use std::sync::Arc;

use common::{CollidingGenerator, InMemoryUrlStore};

fn colliding_service(store: Arc<InMemoryUrlStore>, policy: CollisionPolicy) -> UrlService {
    UrlService::new(
        store,
        Arc::new(CollidingGenerator {
            fixed: "aaaaaaaaaa".to_string(),
        }),
        policy,
    )
}

#[tokio::test]
async fn test_create_then_resolve_round_trip() {
    let service = common::create_test_service(Arc::new(InMemoryUrlStore::new()));

    let targets = [
        "https://example.com/a",
        "https://example.com/b?q=1",
        "http://localhost:3000/path#frag",
    ];

    for target in targets {
        let hash = match service.create(target).await {
            CreateOutcome::Created(hash) => hash,
            other => panic!("expected Created, got {:?}", other),
        };
        assert_eq!(hash.len(), 10);
        assert_eq!(service.resolve(&hash).await, ResolveOutcome::Found(target.to_string()));
    }
}

#[tokio::test]
async fn test_concrete_example() {
    let service = common::create_test_service(Arc::new(InMemoryUrlStore::new()));

    assert_eq!(
        service.create("https://example.com/a").await,
        CreateOutcome::Created("cd69b81ea0".to_string())
    );
    assert_eq!(
        service.resolve("cd69b81ea0").await,
        ResolveOutcome::Found("https://example.com/a".to_string())
    );
    assert_eq!(
        service.delete("cd69b81ea0").await,
        DeleteOutcome::Deleted("https://example.com/a".to_string())
    );
    assert_eq!(service.resolve("cd69b81ea0").await, ResolveOutcome::NotFound);
    assert_eq!(service.delete("cd69b81ea0").await, DeleteOutcome::NotFound);
}

#[tokio::test]
async fn test_create_is_idempotent_per_target() {
    let store = Arc::new(InMemoryUrlStore::new());
    let service = common::create_test_service(store.clone());

    let first = service.create("https://example.com/x").await;
    let second = service.create("https://example.com/x").await;

    assert_eq!(first, CreateOutcome::Created(common::md5_hash("https://example.com/x")));
    assert_eq!(
        second,
        CreateOutcome::AlreadyExists(common::md5_hash("https://example.com/x"))
    );
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_collision_never_overwrites_existing_mapping() {
    let store = Arc::new(InMemoryUrlStore::new());
    let service = colliding_service(store.clone(), CollisionPolicy::default());

    let one = service.create("https://example.com/one").await;
    let two = service.create("https://example.com/two").await;

    assert_eq!(one, CreateOutcome::Created("aaaaaaaaaa".to_string()));
    let two_hash = two.hash().unwrap().to_string();
    assert_ne!(two_hash, "aaaaaaaaaa");

    assert_eq!(
        service.resolve("aaaaaaaaaa").await,
        ResolveOutcome::Found("https://example.com/one".to_string())
    );
    assert_eq!(
        service.resolve(&two_hash).await,
        ResolveOutcome::Found("https://example.com/two".to_string())
    );
    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn test_strict_policy_leaves_store_untouched() {
    let store = Arc::new(InMemoryUrlStore::new());
    store.seed("aaaaaaaaaa", "https://example.com/one");
    let service = colliding_service(store.clone(), CollisionPolicy::Strict);

    let outcome = service.create("https://example.com/two").await;

    assert_eq!(
        outcome,
        CreateOutcome::Failed(ServiceFailure::HashCollisionExhausted { attempts: 1 })
    );
    assert_eq!(store.len(), 1);
    assert_eq!(
        service.resolve("aaaaaaaaaa").await,
        ResolveOutcome::Found("https://example.com/one".to_string())
    );
}

#[tokio::test]
async fn test_storage_failures_surface_as_failed() {
    let store = Arc::new(InMemoryUrlStore::new());
    store.fail_with(StorageError::Timeout("statement timeout".to_string()));
    let service = common::create_test_service(store);

    let expected = ServiceFailure::Storage(StorageError::Timeout("statement timeout".to_string()));

    assert_eq!(
        service.resolve("abc").await,
        ResolveOutcome::Failed(expected.clone())
    );
    assert_eq!(
        service.create("https://example.com").await,
        CreateOutcome::Failed(expected.clone())
    );
    assert_eq!(service.delete("abc").await, DeleteOutcome::Failed(expected));
    assert!(service.test_connection().await.is_err());
}

#[tokio::test]
async fn test_concurrent_creates_of_same_target_agree() {
    let store = Arc::new(InMemoryUrlStore::new());
    let service = Arc::new(common::create_test_service(store.clone()));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            service.create("https://example.com/race").await
        }));
    }

    let expected = common::md5_hash("https://example.com/race");
    let mut created = 0;
    for handle in handles {
        match handle.await.unwrap() {
            CreateOutcome::Created(hash) => {
                assert_eq!(hash, expected);
                created += 1;
            }
            CreateOutcome::AlreadyExists(hash) => assert_eq!(hash, expected),
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(store.len(), 1);
}
