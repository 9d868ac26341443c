//! Tests for the in-memory store backend.

use remote_files::{File, MemoryStore, StorageErrorKind, Store, StoreSettings};

#[tokio::test]
async fn test_store_rejects_empty_identifier() {
    let store = MemoryStore::new(StoreSettings::primary_store("s3"));

    let err = store
        .store(&File::new("").with_content(b"orphan".to_vec()))
        .await
        .unwrap_err();
    assert_eq!(
        err.storage_kind(),
        Some(&StorageErrorKind::InvalidIdentifier(String::new()))
    );
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_url_round_trip() {
    let store = MemoryStore::new(StoreSettings::primary_store("s3"));
    store
        .store(&File::new("avatars/42.png").with_content(vec![1, 2, 3]))
        .await
        .unwrap();

    let url = store.url("avatars/42.png");
    assert_eq!(url, "memory://s3/avatars/42.png");

    let identifier = store.identifier_from_url(&url).unwrap();
    assert_eq!(store.url(&identifier), url);

    let file = store.file_from_url(&url).await.unwrap().unwrap();
    assert_eq!(file.identifier(), "avatars/42.png");
}

#[test]
fn test_slashed_store_identifiers_do_not_collide() {
    let outer = MemoryStore::new(StoreSettings::primary_store("a"));
    let nested = MemoryStore::new(StoreSettings::secondary("a/b"));

    let nested_url = nested.url("x");
    assert_eq!(nested_url, "memory://a%2Fb/x");
    assert!(nested.matches_url(&nested_url));
    assert!(!outer.matches_url(&nested_url));

    let outer_url = outer.url("b/x");
    assert!(outer.matches_url(&outer_url));
    assert!(!nested.matches_url(&outer_url));
    assert_eq!(nested.identifier_from_url(&nested_url).as_deref(), Some("x"));
}

#[test]
fn test_escaped_percent_does_not_collide() {
    let plain = MemoryStore::new(StoreSettings::primary_store("a%2Fb"));
    let slashed = MemoryStore::new(StoreSettings::secondary("a/b"));

    assert_ne!(plain.url("x"), slashed.url("x"));
    assert!(!plain.matches_url(&slashed.url("x")));
    assert!(!slashed.matches_url(&plain.url("x")));
}
