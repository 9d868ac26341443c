//! Track files replicated across pluggable storage backends.
//!
//! A logical [`File`] may be copied into several independent stores (local
//! disk, object stores, CDNs). This crate provides:
//!
//! - **A uniform store contract**: the [`Store`] trait (store, retrieve,
//!   delete, URL production and URL matching) every backend implements
//! - **A store registry**: [`StoreRegistry`], the ordered set of configured
//!   stores with exactly one primary
//! - **Replication bookkeeping**: each file's `stored_in` set, with
//!   [`File::missing_stores`], [`File::is_stored_everywhere`] and friends
//! - **URL resolution**: [`File::current_url`] and [`File::from_url`] map
//!   between files and the URLs stores hand out
//!
//! # Example
//!
//! ```rust
//! use remote_files::{File, MemoryStore, StoreId, StoreRegistry, StoreSettings};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut registry = StoreRegistry::new();
//! registry.register(MemoryStore::new(StoreSettings::primary_store("s3")))?;
//! registry.register(MemoryStore::new(StoreSettings::secondary("cf")))?;
//!
//! let mut file = File::new("report.pdf").with_content(b"%PDF".to_vec());
//! registry.store_in("s3", &mut file).await?;
//! assert_eq!(file.missing_stores(&registry), vec![StoreId::from("cf")]);
//!
//! let url = file.current_url(&registry).unwrap();
//! let resolved = File::from_url(&registry, &url).await?.unwrap();
//! assert_eq!(resolved.identifier(), "report.pdf");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod backends;
mod config;
mod file;
mod registry;
mod replication;
mod resolution;
mod store;
mod store_id;

pub use backends::{FileStore, MemoryStore};
pub use config::{RemoteFilesConfig, StoreClass, StoreConfig};
pub use file::File;
pub use registry::StoreRegistry;
pub use remote_files_error::{
    ConfigError, RegistryError, RegistryErrorKind, RemoteFilesError, RemoteFilesErrorKind,
    RemoteFilesResult, StorageError, StorageErrorKind,
};
pub use store::Store;
pub use store_id::{StoreId, StoreSettings};
