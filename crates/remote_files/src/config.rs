//! Store configuration loaded from TOML.
//!
//! Each `[[stores]]` table registers one store; declaration order is
//! registration order.
//!
//! ```toml
//! [[stores]]
//! identifier = "local"
//! class = "file"
//! primary = true
//!
//! [stores.options]
//! directory = "/var/lib/remote_files"
//!
//! [[stores]]
//! identifier = "scratch"
//! class = "memory"
//! ```

use crate::{FileStore, MemoryStore, Store, StoreId, StoreRegistry, StoreSettings};
use config::{Config, File, FileFormat};
use remote_files_error::{ConfigError, RemoteFilesError, RemoteFilesResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Backend types this crate can build from configuration.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::EnumString,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StoreClass {
    /// [`FileStore`]: one file per identifier under a directory
    #[display("file")]
    File,
    /// [`MemoryStore`]: process-local map
    #[display("memory")]
    Memory,
}

/// Configuration of one store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Unique key within the registry
    pub identifier: StoreId,

    /// Backend type
    pub class: StoreClass,

    /// Whether this is the default store
    #[serde(default)]
    pub primary: bool,

    /// Backend-specific options
    #[serde(default)]
    pub options: HashMap<String, String>,
}

impl StoreConfig {
    /// Build the configured backend.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if required options are missing.
    pub fn build(&self) -> RemoteFilesResult<Arc<dyn Store>> {
        let settings = StoreSettings::new(self.identifier.clone(), self.primary);
        let store: Arc<dyn Store> = match self.class {
            StoreClass::File => Arc::new(FileStore::from_options(settings, &self.options)?),
            StoreClass::Memory => Arc::new(MemoryStore::new(settings)),
        };
        Ok(store)
    }
}

/// Top-level configuration: the ordered list of stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RemoteFilesConfig {
    /// Stores in registration order
    #[serde(default)]
    pub stores: Vec<StoreConfig>,
}

impl RemoteFilesConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> RemoteFilesResult<Self> {
        debug!("Loading configuration from file");

        Self::deserialize_from(
            Config::builder().add_source(File::from(path.as_ref())),
            &path.as_ref().display().to_string(),
        )
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not valid configuration.
    pub fn from_toml_str(toml: &str) -> RemoteFilesResult<Self> {
        Self::deserialize_from(
            Config::builder().add_source(File::from_str(toml, FileFormat::Toml)),
            "inline TOML",
        )
    }

    fn deserialize_from(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
        source: &str,
    ) -> RemoteFilesResult<Self> {
        builder
            .build()
            .map_err(|e| {
                RemoteFilesError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    source, e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                RemoteFilesError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }
}

impl StoreRegistry {
    /// Build and register every configured store, in declaration order.
    ///
    /// # Errors
    ///
    /// Fails on the first store that cannot be built, on a duplicate
    /// identifier, or when no store is flagged primary.
    #[instrument(skip(config), fields(stores = config.stores.len()))]
    pub fn from_config(config: &RemoteFilesConfig) -> RemoteFilesResult<Self> {
        let mut registry = Self::new();
        for store in &config.stores {
            debug!(store = %store.identifier, class = %store.class, "Building store");
            registry.register_shared(store.build()?)?;
        }
        registry.validate()?;
        Ok(registry)
    }
}
