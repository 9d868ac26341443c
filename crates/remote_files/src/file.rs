//! File entity and its replication bookkeeping.

use crate::{Store, StoreId, StoreRegistry};
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use derive_setters::Setters;
use remote_files_error::{RegistryError, RegistryErrorKind, RemoteFilesResult};
use std::collections::BTreeSet;
use std::sync::Arc;

/// A unit of content whose identity is independent of any store.
///
/// `stored_in` records which registered stores are known to hold a copy.
/// The entity is a passive data holder: store operations do not update it,
/// callers do (directly via [`File::mark_stored`] / [`File::mark_deleted`],
/// or through the replication helpers on [`StoreRegistry`]).
///
/// # Example
///
/// ```
/// use remote_files::File;
///
/// let file = File::new("avatars/42.png")
///     .with_content(b"\x89PNG".to_vec())
///     .with_content_type("image/png".to_string());
///
/// assert_eq!(file.identifier(), "avatars/42.png");
/// assert!(!file.is_stored());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters)]
#[setters(prefix = "with_", strip_option)]
pub struct File {
    /// Stable key across every store
    #[setters(skip)]
    identifier: String,
    /// Object bytes, absent when only metadata is known
    content: Option<Vec<u8>>,
    /// MIME type, when known
    content_type: Option<String>,
    /// When the copy this entity was loaded from was last written
    last_update_ts: Option<DateTime<Utc>>,
    /// Stores known to hold a copy
    #[setters(skip)]
    stored_in: BTreeSet<StoreId>,
}

impl File {
    /// Create a file with no content and no known copies.
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            content: None,
            content_type: None,
            last_update_ts: None,
            stored_in: BTreeSet::new(),
        }
    }

    /// Replace the set of stores known to hold this file.
    ///
    /// No registry validation happens here; see [`File::retain_registered`].
    pub fn with_stored_in<I, S>(mut self, stores: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<StoreId>,
    {
        self.stored_in = stores.into_iter().map(Into::into).collect();
        self
    }

    /// Mutable access to the `stored_in` set.
    pub fn stored_in_mut(&mut self) -> &mut BTreeSet<StoreId> {
        &mut self.stored_in
    }

    /// True if any store holds this file.
    pub fn is_stored(&self) -> bool {
        !self.stored_in.is_empty()
    }

    /// True if `stored_in` equals the set of every registered store.
    pub fn is_stored_everywhere(&self, registry: &StoreRegistry) -> bool {
        self.stored_in.len() == registry.len()
            && registry
                .identifiers()
                .all(|id| self.stored_in.contains(id.as_str()))
    }

    /// True if the named store is known to hold this file.
    pub fn is_stored_in(&self, store: &str) -> bool {
        self.stored_in.contains(store)
    }

    /// Registered stores that do not hold this file, in registration order.
    pub fn missing_stores(&self, registry: &StoreRegistry) -> Vec<StoreId> {
        registry
            .identifiers()
            .filter(|id| !self.stored_in.contains(id.as_str()))
            .cloned()
            .collect()
    }

    /// Registered stores that hold this file, in registration order.
    ///
    /// Identifiers in `stored_in` that the registry does not know are skipped.
    pub fn holders<'a>(
        &'a self,
        registry: &'a StoreRegistry,
    ) -> impl Iterator<Item = &'a Arc<dyn Store>> + 'a {
        registry
            .all()
            .iter()
            .filter(|store| self.stored_in.contains(store.identifier().as_str()))
    }

    /// Record that the named registered store holds this file.
    ///
    /// # Errors
    ///
    /// Returns `UnknownStore` if the registry has no such store.
    pub fn mark_stored(&mut self, registry: &StoreRegistry, store: &str) -> RemoteFilesResult<()> {
        if !registry.contains(store) {
            return Err(
                RegistryError::new(RegistryErrorKind::UnknownStore(store.to_string())).into(),
            );
        }
        self.stored_in.insert(StoreId::from(store));
        Ok(())
    }

    /// Record that the named store no longer holds this file.
    ///
    /// Returns whether the store was recorded before.
    pub fn mark_deleted(&mut self, store: &str) -> bool {
        self.stored_in.remove(store)
    }

    /// Drop every `stored_in` entry the registry does not know.
    pub fn retain_registered(&mut self, registry: &StoreRegistry) {
        self.stored_in.retain(|id| {
            let known = registry.contains(id.as_str());
            if !known {
                tracing::warn!(
                    file = %self.identifier,
                    store = %id,
                    "Dropping unregistered store from stored_in"
                );
            }
            known
        });
    }
}
