//! Filesystem-based store implementation.
//!
//! Objects live directly under the configured directory, one file per
//! identifier, and are addressed by `file://localhost` URLs. Mostly useful in
//! development and tests.

use crate::{File, Store, StoreSettings};
use chrono::{DateTime, Utc};
use remote_files_error::{ConfigError, RemoteFilesResult, StorageError, StorageErrorKind};
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use tokio::sync::OnceCell;
use uuid::Uuid;

/// Option naming the root directory.
const DIRECTORY_OPTION: &str = "directory";

/// Filesystem store backend.
///
/// Layout: `{directory}/{identifier}`. Identifiers may contain `/` to nest
/// objects; parent directories are created on store.
///
/// The root directory is created lazily on first use. If the path exists
/// but is not a directory, every operation fails with `NotADirectory`.
#[derive(Debug)]
pub struct FileStore {
    settings: StoreSettings,
    directory: PathBuf,
    url_root: String,
    prepared: OnceCell<()>,
}

impl FileStore {
    /// Create a filesystem store rooted at `directory`.
    ///
    /// Relative paths are resolved against the current directory so URLs
    /// stay stable. Nothing is touched on disk until the first operation.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the path cannot be made absolute.
    pub fn new(settings: StoreSettings, directory: impl AsRef<Path>) -> RemoteFilesResult<Self> {
        let directory = std::path::absolute(directory.as_ref()).map_err(|e| {
            ConfigError::for_store(
                settings.identifier().as_str(),
                format!("invalid directory {}: {}", directory.as_ref().display(), e),
            )
        })?;

        let url_root = format!(
            "file://localhost{}",
            directory.display().to_string().trim_end_matches('/')
        );

        tracing::debug!(
            store = %settings.identifier(),
            path = %directory.display(),
            "Created filesystem store"
        );
        Ok(Self {
            settings,
            directory,
            url_root,
            prepared: OnceCell::new(),
        })
    }

    /// Create a filesystem store from backend options.
    ///
    /// Requires a `directory` option.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `directory` is missing.
    pub fn from_options(
        settings: StoreSettings,
        options: &HashMap<String, String>,
    ) -> RemoteFilesResult<Self> {
        let directory = options.get(DIRECTORY_OPTION).ok_or_else(|| {
            ConfigError::for_store(
                settings.identifier().as_str(),
                format!("requires a '{}' option", DIRECTORY_OPTION),
            )
        })?;
        Self::new(settings, directory)
    }

    /// Root directory of this store.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Make sure the root directory exists, creating it on first use.
    async fn ensure_directory(&self) -> RemoteFilesResult<&Path> {
        self.prepared
            .get_or_try_init(|| prepare_directory(&self.directory))
            .await?;
        Ok(&self.directory)
    }

    /// Map an identifier to its path, rejecting anything that escapes the root.
    fn object_path(&self, identifier: &str) -> RemoteFilesResult<PathBuf> {
        let relative = Path::new(identifier);
        let valid = !identifier.is_empty()
            && relative
                .components()
                .all(|component| matches!(component, Component::Normal(_)));

        if !valid {
            return Err(
                StorageError::new(StorageErrorKind::InvalidIdentifier(identifier.to_string()))
                    .into(),
            );
        }
        Ok(self.directory.join(relative))
    }
}

/// Create `directory` if absent; fail if the path is something else.
async fn prepare_directory(directory: &Path) -> Result<(), StorageError> {
    match tokio::fs::metadata(directory).await {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(StorageError::new(StorageErrorKind::NotADirectory(
            directory.display().to_string(),
        ))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tokio::fs::create_dir_all(directory).await.map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    directory.display(),
                    e
                )))
            })?;
            tracing::info!(path = %directory.display(), "Created store directory");
            Ok(())
        }
        Err(e) => Err(StorageError::new(StorageErrorKind::DirectoryCreation(
            format!("{}: {}", directory.display(), e),
        ))),
    }
}

#[async_trait::async_trait]
impl Store for FileStore {
    fn settings(&self) -> &StoreSettings {
        &self.settings
    }

    #[tracing::instrument(
        skip(self, file),
        fields(store = %self.identifier(), file = %file.identifier())
    )]
    async fn store(&self, file: &File) -> RemoteFilesResult<()> {
        let identifier = file.identifier();
        let content = file.content().as_deref().ok_or_else(|| {
            StorageError::new(StorageErrorKind::MissingContent(identifier.clone()))
        })?;

        let directory = self.ensure_directory().await?;
        let path = self.object_path(identifier)?;

        if let Some(parent) = path.parent().filter(|parent| *parent != directory) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }

        // Write to a temp file first, then rename over the target
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let temp_path = path.with_file_name(format!(".{}.{}.tmp", file_name, Uuid::new_v4()));

        tokio::fs::write(&temp_path, content).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        if let Err(e) = tokio::fs::rename(&temp_path, &path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(StorageError::new(StorageErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )))
            .into());
        }

        tracing::info!(path = %path.display(), size = content.len(), "Stored file");
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(store = %self.identifier()))]
    async fn retrieve(&self, identifier: &str) -> RemoteFilesResult<File> {
        self.ensure_directory().await?;
        let path = self.object_path(identifier)?;

        let content = tokio::fs::read(&path)
            .await
            .map_err(|e| StorageError::from_io(&e, identifier, StorageErrorKind::FileRead))?;

        let modified = tokio::fs::metadata(&path)
            .await
            .ok()
            .and_then(|meta| meta.modified().ok())
            .map(DateTime::<Utc>::from);

        tracing::debug!(path = %path.display(), size = content.len(), "Retrieved file");

        let mut file = File::new(identifier)
            .with_content(content)
            .with_stored_in([self.identifier().clone()]);
        if let Some(modified) = modified {
            file = file.with_last_update_ts(modified);
        }
        Ok(file)
    }

    #[tracing::instrument(skip(self), fields(store = %self.identifier()))]
    async fn delete(&self, identifier: &str) -> RemoteFilesResult<()> {
        self.ensure_directory().await?;
        let path = self.object_path(identifier)?;

        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::info!(path = %path.display(), "Deleted file");
                Ok(())
            }
            Err(e) if StorageError::is_absent(&e) => {
                tracing::debug!(path = %path.display(), error = %e, "Nothing to delete");
                Ok(())
            }
            Err(e) => {
                Err(StorageError::from_io(&e, identifier, StorageErrorKind::FileDelete).into())
            }
        }
    }

    fn url(&self, identifier: &str) -> String {
        format!("{}/{}", self.url_root, identifier)
    }

    fn identifier_from_url(&self, url: &str) -> Option<String> {
        url.strip_prefix(self.url_root.as_str())?
            .strip_prefix('/')
            .filter(|identifier| !identifier.is_empty())
            .map(str::to_string)
    }
}
