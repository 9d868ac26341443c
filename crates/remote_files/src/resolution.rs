//! URL production and URL-to-file resolution.

use crate::{File, Store, StoreRegistry};
use remote_files_error::RemoteFilesResult;
use std::sync::Arc;

impl File {
    /// URL of this file on the named store, or on the primary store.
    ///
    /// `stored_in` is not consulted, so this also yields URLs for stores
    /// that do not hold the file yet.
    ///
    /// # Errors
    ///
    /// Returns `UnknownStore` for an unregistered store, `NoPrimaryStore`
    /// when `store` is `None` and no primary is configured.
    pub fn url(&self, registry: &StoreRegistry, store: Option<&str>) -> RemoteFilesResult<String> {
        let store = match store {
            Some(identifier) => registry.lookup(identifier)?,
            None => registry.primary()?,
        };
        Ok(store.url(self.identifier()))
    }

    /// URL from the earliest registered store that holds this file.
    ///
    /// Registration order decides, not the primary flag and not the order
    /// of `stored_in`. Returns `None` when no registered store holds it.
    pub fn current_url(&self, registry: &StoreRegistry) -> Option<String> {
        self.holders(registry)
            .next()
            .map(|store| store.url(self.identifier()))
    }

    /// Resolve a URL produced by any registered store back to a file.
    ///
    /// See [`StoreRegistry::file_from_url`].
    pub async fn from_url(registry: &StoreRegistry, url: &str) -> RemoteFilesResult<Option<File>> {
        registry.file_from_url(url).await
    }
}

impl StoreRegistry {
    /// The first store, in registration order, that recognizes `url`.
    pub fn store_for_url(&self, url: &str) -> Option<&Arc<dyn Store>> {
        self.all().iter().find(|store| store.matches_url(url))
    }

    /// Resolve `url` to a file through the first store that recognizes it.
    ///
    /// Returns `Ok(None)` when no store recognizes the URL.
    ///
    /// # Errors
    ///
    /// Propagates the owning store's retrieval error, including `NotFound`
    /// when the URL is well formed but the object is gone.
    #[tracing::instrument(skip(self))]
    pub async fn file_from_url(&self, url: &str) -> RemoteFilesResult<Option<File>> {
        let Some(store) = self.store_for_url(url) else {
            tracing::debug!("No registered store recognizes URL");
            return Ok(None);
        };

        tracing::debug!(store = %store.identifier(), "Resolved URL to store");
        store.file_from_url(url).await
    }
}
