//! Ordered registry of named stores.

use crate::{Store, StoreId};
use remote_files_error::{RegistryError, RegistryErrorKind, RemoteFilesResult};
use std::sync::Arc;

/// Ordered collection of the configured stores.
///
/// Registration order is significant: it is the order used by
/// [`File::missing_stores`](crate::File::missing_stores),
/// [`File::current_url`](crate::File::current_url) and URL resolution.
/// Exactly one store should be flagged primary; if several are, the
/// first registered one wins.
///
/// The registry is built once at startup and passed by reference to
/// whatever needs it.
///
/// # Example
///
/// ```
/// use remote_files::{MemoryStore, StoreRegistry, StoreSettings};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut registry = StoreRegistry::new();
/// registry.register(MemoryStore::new(StoreSettings::primary_store("s3")))?;
/// registry.register(MemoryStore::new(StoreSettings::secondary("cf")))?;
///
/// assert_eq!(registry.primary()?.identifier(), "s3");
/// assert_eq!(registry.len(), 2);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct StoreRegistry {
    stores: Vec<Arc<dyn Store>>,
}

impl StoreRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a store under its own identifier.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateStore` if the identifier is already registered.
    #[tracing::instrument(
        skip(self, store),
        fields(store = %store.identifier(), primary = store.is_primary())
    )]
    pub fn register(&mut self, store: impl Store + 'static) -> RemoteFilesResult<()> {
        self.register_shared(Arc::new(store))
    }

    /// Add an already shared store under its own identifier.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateStore` if the identifier is already registered.
    pub fn register_shared(&mut self, store: Arc<dyn Store>) -> RemoteFilesResult<()> {
        let identifier = store.identifier().clone();
        if self.contains(identifier.as_str()) {
            return Err(
                RegistryError::new(RegistryErrorKind::DuplicateStore(identifier.to_string()))
                    .into(),
            );
        }

        if store.is_primary() {
            if let Some(existing) = self.stores.iter().find(|s| s.is_primary()) {
                tracing::warn!(
                    store = %identifier,
                    primary = %existing.identifier(),
                    "Multiple primary stores configured; the first registered stays primary"
                );
            }
        }

        tracing::debug!(store = %identifier, position = self.stores.len(), "Registered store");
        self.stores.push(store);
        Ok(())
    }

    /// Look up a store by identifier.
    ///
    /// # Errors
    ///
    /// Returns `UnknownStore` if nothing is registered under `identifier`.
    pub fn lookup(&self, identifier: &str) -> RemoteFilesResult<&Arc<dyn Store>> {
        self.get(identifier).ok_or_else(|| {
            RegistryError::new(RegistryErrorKind::UnknownStore(identifier.to_string())).into()
        })
    }

    /// Look up a store by identifier, if registered.
    pub fn get(&self, identifier: &str) -> Option<&Arc<dyn Store>> {
        self.stores
            .iter()
            .find(|store| store.identifier().as_str() == identifier)
    }

    /// Whether a store is registered under `identifier`.
    pub fn contains(&self, identifier: &str) -> bool {
        self.get(identifier).is_some()
    }

    /// The primary store: the first registered store flagged primary.
    ///
    /// # Errors
    ///
    /// Returns `NoPrimaryStore` if no store is flagged primary.
    pub fn primary(&self) -> RemoteFilesResult<&Arc<dyn Store>> {
        self.stores
            .iter()
            .find(|store| store.is_primary())
            .ok_or_else(|| RegistryError::new(RegistryErrorKind::NoPrimaryStore).into())
    }

    /// Every registered store, in registration order.
    pub fn all(&self) -> &[Arc<dyn Store>] {
        &self.stores
    }

    /// Identifiers of every registered store, in registration order.
    pub fn identifiers(&self) -> impl Iterator<Item = &StoreId> {
        self.stores.iter().map(|store| store.identifier())
    }

    /// Number of registered stores.
    pub fn len(&self) -> usize {
        self.stores.len()
    }

    /// Whether no store is registered.
    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }

    /// Check the registry is usable: a primary store must exist.
    ///
    /// # Errors
    ///
    /// Returns `NoPrimaryStore` if no store is flagged primary.
    pub fn validate(&self) -> RemoteFilesResult<()> {
        self.primary().map(|_| ())
    }
}
