//! Store identity types.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;

/// Identifier of a store within a [`StoreRegistry`](crate::StoreRegistry).
///
/// Borrows as `str`, so sets and maps keyed by `StoreId` can be queried
/// with plain string slices.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct StoreId(String);

impl StoreId {
    /// Create a store identifier.
    pub fn new(identifier: impl Into<String>) -> Self {
        Self(identifier.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StoreId {
    fn from(identifier: &str) -> Self {
        Self(identifier.to_string())
    }
}

impl AsRef<str> for StoreId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for StoreId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for StoreId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for StoreId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Settings shared by every backend: its registry identifier and primary flag.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct StoreSettings {
    /// Unique key within the registry
    identifier: StoreId,
    /// Whether this store is the default target
    primary: bool,
}

impl StoreSettings {
    /// Create settings for a store.
    pub fn new(identifier: impl Into<StoreId>, primary: bool) -> Self {
        Self {
            identifier: identifier.into(),
            primary,
        }
    }

    /// Settings for a non-primary store.
    pub fn secondary(identifier: impl Into<StoreId>) -> Self {
        Self::new(identifier, false)
    }

    /// Settings for the primary store.
    pub fn primary_store(identifier: impl Into<StoreId>) -> Self {
        Self::new(identifier, true)
    }
}
