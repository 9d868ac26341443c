//! Caller-driven replication across registered stores.
//!
//! These helpers run store operations and record the outcome in the file's
//! `stored_in` set. They do not retry, and a failure part way through leaves
//! earlier successes recorded: multi-store writes are not atomic.

use crate::{File, StoreId, StoreRegistry};
use remote_files_error::{RegistryError, RegistryErrorKind, RemoteFilesError, RemoteFilesResult};

impl StoreRegistry {
    /// Store `file` in the named store and record it in `stored_in`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownStore` for an unregistered store, or the backend's
    /// storage error; `stored_in` is untouched on failure.
    #[tracing::instrument(skip(self, file), fields(file = %file.identifier()))]
    pub async fn store_in(&self, store: &str, file: &mut File) -> RemoteFilesResult<()> {
        let backend = self.lookup(store)?;
        backend.store(file).await?;
        file.stored_in_mut().insert(backend.identifier().clone());
        Ok(())
    }

    /// Delete `file` from the named store and drop it from `stored_in`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownStore` for an unregistered store, or the backend's
    /// storage error; `stored_in` is untouched on failure.
    #[tracing::instrument(skip(self, file), fields(file = %file.identifier()))]
    pub async fn delete_from(&self, store: &str, file: &mut File) -> RemoteFilesResult<()> {
        let backend = self.lookup(store)?;
        backend.delete(file.identifier()).await?;
        file.mark_deleted(store);
        Ok(())
    }

    /// Make sure at least one store holds `file`.
    ///
    /// If the file is already stored, returns the earliest registered holder
    /// without touching any backend. Otherwise tries each store in
    /// registration order and stops at the first success.
    ///
    /// # Errors
    ///
    /// Returns the last backend error when every store failed, or
    /// `NoPrimaryStore` when the registry is empty.
    #[tracing::instrument(skip(self, file), fields(file = %file.identifier()))]
    pub async fn store_once(&self, file: &mut File) -> RemoteFilesResult<StoreId> {
        if let Some(holder) = file.holders(self).next() {
            return Ok(holder.identifier().clone());
        }

        let mut last_error: Option<RemoteFilesError> = None;
        for store in self.all() {
            match store.store(file).await {
                Ok(()) => {
                    file.stored_in_mut().insert(store.identifier().clone());
                    tracing::info!(store = %store.identifier(), "Stored file once");
                    return Ok(store.identifier().clone());
                }
                Err(e) => {
                    tracing::warn!(
                        store = %store.identifier(),
                        error = %e,
                        "Store failed, trying next"
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| RegistryError::new(RegistryErrorKind::NoPrimaryStore).into()))
    }

    /// Store `file` in every registered store that does not hold it yet.
    ///
    /// Stores are visited in registration order.
    ///
    /// # Errors
    ///
    /// Stops at and returns the first backend error. Stores written before
    /// the failure stay recorded in `stored_in`.
    #[tracing::instrument(skip(self, file), fields(file = %file.identifier()))]
    pub async fn store_everywhere(&self, file: &mut File) -> RemoteFilesResult<()> {
        for identifier in file.missing_stores(self) {
            self.store_in(identifier.as_str(), file).await?;
        }
        tracing::info!(stores = self.len(), "File stored everywhere");
        Ok(())
    }

    /// Delete `file` from every registered store recorded in `stored_in`.
    ///
    /// # Errors
    ///
    /// Stops at and returns the first backend error. Stores deleted before
    /// the failure stay removed from `stored_in`.
    #[tracing::instrument(skip(self, file), fields(file = %file.identifier()))]
    pub async fn delete_everywhere(&self, file: &mut File) -> RemoteFilesResult<()> {
        let holders: Vec<StoreId> = file
            .holders(self)
            .map(|store| store.identifier().clone())
            .collect();

        for identifier in holders {
            self.delete_from(identifier.as_str(), file).await?;
        }
        tracing::info!("File deleted everywhere");
        Ok(())
    }
}
