//! Storage error types.

/// Kinds of storage errors raised at the store contract boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StorageErrorKind {
    /// No object exists under the identifier
    #[display("Object not found: {}", _0)]
    NotFound(String),
    /// Failed to create the store's root directory
    #[display("Failed to create storage directory: {}", _0)]
    DirectoryCreation(String),
    /// The configured root exists but is not a directory
    #[display("Not a directory: {}", _0)]
    NotADirectory(String),
    /// Failed to read an object
    #[display("Failed to read file: {}", _0)]
    FileRead(String),
    /// Failed to write an object
    #[display("Failed to write file: {}", _0)]
    FileWrite(String),
    /// Failed to remove an object
    #[display("Failed to delete file: {}", _0)]
    FileDelete(String),
    /// Identifier cannot be mapped onto this backend
    #[display("Invalid identifier: {}", _0)]
    InvalidIdentifier(String),
    /// The file has no content to store
    #[display("File has no content: {}", _0)]
    MissingContent(String),
}

/// Storage error with location tracking.
///
/// # Examples
///
/// ```
/// use remote_files_error::{StorageError, StorageErrorKind};
///
/// let err = StorageError::new(StorageErrorKind::NotFound("avatar.png".to_string()));
/// assert!(format!("{}", err).contains("not found"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Storage Error: {} at line {} in {}", kind, line, file)]
pub struct StorageError {
    /// The kind of error that occurred
    pub kind: StorageErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StorageError {
    /// Create a new storage error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StorageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Whether an I/O error means no object can exist at the path.
    ///
    /// Besides a missing path this covers a directory sitting where the
    /// object would be and a regular file in place of a parent directory.
    pub fn is_absent(err: &std::io::Error) -> bool {
        matches!(
            err.kind(),
            std::io::ErrorKind::NotFound
                | std::io::ErrorKind::IsADirectory
                | std::io::ErrorKind::NotADirectory
        )
    }

    /// Translate an I/O error, normalizing an absent object to `NotFound`.
    ///
    /// `other` builds the kind used for every other I/O failure.
    #[track_caller]
    pub fn from_io(
        err: &std::io::Error,
        identifier: &str,
        other: impl FnOnce(String) -> StorageErrorKind,
    ) -> Self {
        let kind = if Self::is_absent(err) {
            StorageErrorKind::NotFound(identifier.to_string())
        } else {
            other(format!("{}: {}", identifier, err))
        };
        Self::new(kind)
    }
}
