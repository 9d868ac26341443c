//! Error types for the remote_files store layer.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! Backend-native failures (I/O errors, parser errors) are translated into
//! these types at the store boundary and never leak upward.
//!
//! # Examples
//!
//! ```
//! use remote_files_error::{RemoteFilesResult, StorageError, StorageErrorKind};
//!
//! fn read_object(identifier: &str) -> RemoteFilesResult<Vec<u8>> {
//!     Err(StorageError::new(StorageErrorKind::NotFound(identifier.to_string())))?
//! }
//!
//! let err = read_object("avatar.png").unwrap_err();
//! assert!(err.is_not_found());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod registry;
mod storage;

pub use config::ConfigError;
pub use error::{RemoteFilesError, RemoteFilesErrorKind, RemoteFilesResult};
pub use registry::{RegistryError, RegistryErrorKind};
pub use storage::{StorageError, StorageErrorKind};
