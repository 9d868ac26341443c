//! Store configuration error types.

/// Invalid or unreadable store configuration.
///
/// Raised while loading the TOML store list or while building a backend
/// from its options; `store` names the offending `[[stores]]` entry when
/// one is known.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Store Configuration Error: {} at line {} in {}", message, line, file)]
pub struct ConfigError {
    /// Error message
    pub message: String,
    /// Identifier of the store being configured, if any
    pub store: Option<String>,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Create a configuration error not tied to a single store.
    ///
    /// # Examples
    ///
    /// ```
    /// use remote_files_error::ConfigError;
    ///
    /// let err = ConfigError::new("Failed to parse configuration: missing field `class`");
    /// assert!(err.store.is_none());
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            store: None,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Create a configuration error for the named store.
    ///
    /// # Examples
    ///
    /// ```
    /// use remote_files_error::ConfigError;
    ///
    /// let err = ConfigError::for_store("local", "requires a 'directory' option");
    /// assert_eq!(err.store.as_deref(), Some("local"));
    /// assert!(err.to_string().contains("store 'local': requires a 'directory' option"));
    /// ```
    #[track_caller]
    pub fn for_store(store: impl Into<String>, message: impl std::fmt::Display) -> Self {
        let store = store.into();
        let mut err = Self::new(format!("store '{}': {}", store, message));
        err.store = Some(store);
        err
    }
}
