//! Tests for the filesystem store backend.

use remote_files::{File, FileStore, StorageErrorKind, Store, StoreSettings};
use std::collections::HashMap;
use tempfile::TempDir;

fn store_in(dir: &TempDir) -> FileStore {
    FileStore::new(StoreSettings::primary_store("local"), dir.path()).unwrap()
}

#[tokio::test]
async fn test_store_and_retrieve() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);

    let file = File::new("hello.txt").with_content(b"Hello, world!".to_vec());
    store.store(&file).await.unwrap();

    let retrieved = store.retrieve("hello.txt").await.unwrap();
    assert_eq!(retrieved.identifier(), "hello.txt");
    assert_eq!(retrieved.content().as_deref(), Some(&b"Hello, world!"[..]));
    assert_eq!(retrieved.stored_in().len(), 1);
    assert!(retrieved.is_stored_in("local"));
    assert!(retrieved.last_update_ts().is_some());

    // Store never touches the caller's bookkeeping
    assert!(!file.is_stored());
}

#[tokio::test]
async fn test_store_overwrites() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);

    store
        .store(&File::new("doc").with_content(b"first".to_vec()))
        .await
        .unwrap();
    store
        .store(&File::new("doc").with_content(b"second".to_vec()))
        .await
        .unwrap();

    let retrieved = store.retrieve("doc").await.unwrap();
    assert_eq!(retrieved.content().as_deref(), Some(&b"second"[..]));

    // No temp files left behind
    let entries = std::fs::read_dir(temp_dir.path()).unwrap().count();
    assert_eq!(entries, 1);
}

#[tokio::test]
async fn test_store_nested_identifier() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);

    store
        .store(&File::new("avatars/42.png").with_content(vec![1, 2, 3]))
        .await
        .unwrap();

    assert!(temp_dir.path().join("avatars").join("42.png").is_file());
    let retrieved = store.retrieve("avatars/42.png").await.unwrap();
    assert_eq!(retrieved.content().as_deref(), Some(&[1u8, 2, 3][..]));
}

#[tokio::test]
async fn test_store_without_content() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);

    let err = store.store(&File::new("empty")).await.unwrap_err();
    assert_eq!(
        err.storage_kind(),
        Some(&StorageErrorKind::MissingContent("empty".to_string()))
    );
}

#[tokio::test]
async fn test_retrieve_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);

    let err = store.retrieve("never-stored").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(
        err.storage_kind(),
        Some(&StorageErrorKind::NotFound("never-stored".to_string()))
    );
}

#[tokio::test]
async fn test_retrieve_blocked_path_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);

    store
        .store(&File::new("avatars/42.png").with_content(vec![1, 2, 3]))
        .await
        .unwrap();

    // A directory holds no object
    let err = store.retrieve("avatars").await.unwrap_err();
    assert_eq!(
        err.storage_kind(),
        Some(&StorageErrorKind::NotFound("avatars".to_string()))
    );

    // A regular file cannot be a parent
    let err = store.retrieve("avatars/42.png/x").await.unwrap_err();
    assert_eq!(
        err.storage_kind(),
        Some(&StorageErrorKind::NotFound("avatars/42.png/x".to_string()))
    );
}

#[tokio::test]
async fn test_delete() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);

    store
        .store(&File::new("doomed").with_content(b"Delete me".to_vec()))
        .await
        .unwrap();
    store.delete("doomed").await.unwrap();

    assert!(store.retrieve("doomed").await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);

    store.delete("never-stored").await.unwrap();
    store.delete("never-stored").await.unwrap();
}

#[tokio::test]
async fn test_delete_blocked_path_is_noop() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);

    store
        .store(&File::new("avatars/42.png").with_content(vec![1, 2, 3]))
        .await
        .unwrap();

    store.delete("avatars").await.unwrap();
    store.delete("avatars/42.png/x").await.unwrap();

    // The stored object is untouched
    let retrieved = store.retrieve("avatars/42.png").await.unwrap();
    assert_eq!(retrieved.content().as_deref(), Some(&[1u8, 2, 3][..]));
}

#[tokio::test]
async fn test_invalid_identifiers_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);

    for identifier in ["", "../escape", "/etc/passwd", "a/../../b"] {
        let err = store.retrieve(identifier).await.unwrap_err();
        assert_eq!(
            err.storage_kind(),
            Some(&StorageErrorKind::InvalidIdentifier(identifier.to_string())),
            "identifier {:?}",
            identifier
        );
    }
}

#[tokio::test]
async fn test_directory_created_lazily() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("media");
    let store = FileStore::new(StoreSettings::primary_store("local"), &root).unwrap();

    assert!(!root.exists());
    store
        .store(&File::new("a").with_content(b"a".to_vec()))
        .await
        .unwrap();
    assert!(root.is_dir());
}

#[tokio::test]
async fn test_directory_path_is_a_file() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("occupied");
    std::fs::write(&root, b"not a directory").unwrap();

    let store = FileStore::new(StoreSettings::primary_store("local"), &root).unwrap();
    let err = store.retrieve("a").await.unwrap_err();
    assert!(matches!(
        err.storage_kind(),
        Some(StorageErrorKind::NotADirectory(_))
    ));
}

#[tokio::test]
async fn test_url_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);

    let url = store.url("avatars/42.png");
    assert!(url.starts_with("file://localhost/"));
    assert!(url.ends_with("/avatars/42.png"));
    assert!(store.matches_url(&url));

    let identifier = store.identifier_from_url(&url).unwrap();
    assert_eq!(identifier, "avatars/42.png");
    assert_eq!(store.url(&identifier), url);
}

#[tokio::test]
async fn test_url_matching_is_anchored() {
    let temp_dir = TempDir::new().unwrap();
    let short =
        FileStore::new(StoreSettings::primary_store("a"), temp_dir.path().join("a")).unwrap();
    let long =
        FileStore::new(StoreSettings::secondary("ab"), temp_dir.path().join("ab")).unwrap();

    let long_url = long.url("x");
    assert!(long.matches_url(&long_url));
    assert!(!short.matches_url(&long_url));

    let embedded = format!("https://cdn.example.com/?u={}", short.url("x"));
    assert!(!short.matches_url(&embedded));
    assert!(!short.matches_url(&short.url("")));
}

#[tokio::test]
async fn test_file_from_url() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);

    store
        .store(&File::new("doc").with_content(b"body".to_vec()))
        .await
        .unwrap();

    let file = store.file_from_url(&store.url("doc")).await.unwrap().unwrap();
    assert_eq!(file.identifier(), "doc");

    assert!(store
        .file_from_url("memory://local/doc")
        .await
        .unwrap()
        .is_none());
}

#[test]
fn test_from_options_requires_directory() {
    let err = FileStore::from_options(StoreSettings::primary_store("local"), &HashMap::new())
        .unwrap_err();
    assert!(err.to_string().contains("directory"));

    let temp_dir = TempDir::new().unwrap();
    let options = HashMap::from([(
        "directory".to_string(),
        temp_dir.path().display().to_string(),
    )]);
    let store = FileStore::from_options(StoreSettings::primary_store("local"), &options).unwrap();
    assert_eq!(store.directory(), temp_dir.path());
}
