//! Store contract definition.

use crate::{File, StoreId, StoreSettings};
use remote_files_error::RemoteFilesResult;

/// Trait for pluggable storage backends.
///
/// A store persists file content under the file's identifier and hands out
/// stable URLs for it. Every backend normalizes its native "missing object"
/// signal to [`StorageErrorKind::NotFound`](remote_files_error::StorageErrorKind::NotFound),
/// so callers never see raw I/O or network errors.
///
/// Stores never touch a file's `stored_in` set: recording which stores hold a
/// copy is the caller's job (see the replication helpers on
/// [`StoreRegistry`](crate::StoreRegistry)).
#[async_trait::async_trait]
pub trait Store: Send + Sync + std::fmt::Debug {
    /// Identifier and primary flag of this store.
    fn settings(&self) -> &StoreSettings;

    /// Identifier of this store within the registry.
    fn identifier(&self) -> &StoreId {
        self.settings().identifier()
    }

    /// Whether this store is flagged primary.
    fn is_primary(&self) -> bool {
        *self.settings().primary()
    }

    /// Persist `file.content` under `file.identifier`.
    ///
    /// Storing an identifier again replaces the previous content.
    async fn store(&self, file: &File) -> RemoteFilesResult<()>;

    /// Load the object stored under `identifier`.
    ///
    /// The returned file has its content populated and `stored_in` set to
    /// exactly this store's identifier.
    ///
    /// # Errors
    ///
    /// Returns a `NotFound` storage error when no object exists.
    async fn retrieve(&self, identifier: &str) -> RemoteFilesResult<File>;

    /// Remove the object stored under `identifier`.
    ///
    /// Deleting a missing object succeeds.
    async fn delete(&self, identifier: &str) -> RemoteFilesResult<()>;

    /// Deterministic locator for the object stored under `identifier`.
    fn url(&self, identifier: &str) -> String;

    /// Recover the identifier from a URL this store produced.
    ///
    /// Returns `None` for URLs from any other store.
    fn identifier_from_url(&self, url: &str) -> Option<String>;

    /// Whether `url` was produced by this store.
    fn matches_url(&self, url: &str) -> bool {
        self.identifier_from_url(url).is_some()
    }

    /// Retrieve the file addressed by `url`.
    ///
    /// Returns `Ok(None)` when the URL does not belong to this store.
    async fn file_from_url(&self, url: &str) -> RemoteFilesResult<Option<File>> {
        match self.identifier_from_url(url) {
            Some(identifier) => self.retrieve(&identifier).await.map(Some),
            None => Ok(None),
        }
    }
}
