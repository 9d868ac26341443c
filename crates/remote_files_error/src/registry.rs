//! Store registry error types.

/// Kinds of registry misconfiguration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum RegistryErrorKind {
    /// A store is already registered under this identifier
    #[display("Store already registered: {}", _0)]
    DuplicateStore(String),
    /// No store is registered under this identifier
    #[display("Unknown store: {}", _0)]
    UnknownStore(String),
    /// No registered store is flagged primary
    #[display("No primary store configured")]
    NoPrimaryStore,
}

/// Registry error with location tracking.
///
/// # Examples
///
/// ```
/// use remote_files_error::{RegistryError, RegistryErrorKind};
///
/// let err = RegistryError::new(RegistryErrorKind::UnknownStore("s3".to_string()));
/// assert!(format!("{}", err).contains("Unknown store: s3"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Registry Error: {} at line {} in {}", kind, line, file)]
pub struct RegistryError {
    /// The kind of error that occurred
    pub kind: RegistryErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl RegistryError {
    /// Create a new registry error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: RegistryErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
