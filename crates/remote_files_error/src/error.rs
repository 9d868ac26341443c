//! Top-level error wrapper types.

use crate::{ConfigError, RegistryError, RegistryErrorKind, StorageError, StorageErrorKind};

/// Every failure the store layer can surface.
///
/// # Examples
///
/// ```
/// use remote_files_error::{RemoteFilesError, ConfigError};
///
/// let err: RemoteFilesError = ConfigError::new("missing stores").into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum RemoteFilesErrorKind {
    /// Backend storage error
    #[from(StorageError)]
    Storage(StorageError),
    /// Store registry misconfiguration
    #[from(RegistryError)]
    Registry(RegistryError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
}

/// remote_files error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Remote Files Error: {}", _0)]
pub struct RemoteFilesError(Box<RemoteFilesErrorKind>);

impl RemoteFilesError {
    /// Create a new error from a kind.
    pub fn new(kind: RemoteFilesErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &RemoteFilesErrorKind {
        &self.0
    }

    /// True when a store reported that the object does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self.kind(),
            RemoteFilesErrorKind::Storage(StorageError {
                kind: StorageErrorKind::NotFound(_),
                ..
            })
        )
    }

    /// The registry error kind, if this is a registry misconfiguration.
    pub fn registry_kind(&self) -> Option<&RegistryErrorKind> {
        match self.kind() {
            RemoteFilesErrorKind::Registry(err) => Some(&err.kind),
            _ => None,
        }
    }

    /// The storage error kind, if a backend failed.
    pub fn storage_kind(&self) -> Option<&StorageErrorKind> {
        match self.kind() {
            RemoteFilesErrorKind::Storage(err) => Some(&err.kind),
            _ => None,
        }
    }
}

// Generic From implementation for any type that converts to RemoteFilesErrorKind
impl<T> From<T> for RemoteFilesError
where
    T: Into<RemoteFilesErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for remote_files operations.
pub type RemoteFilesResult<T> = std::result::Result<T, RemoteFilesError>;
