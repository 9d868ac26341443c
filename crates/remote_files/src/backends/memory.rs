//! In-memory store implementation.

use crate::{File, Store, StoreSettings};
use chrono::{DateTime, Utc};
use remote_files_error::{RemoteFilesResult, StorageError, StorageErrorKind};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone)]
struct StoredObject {
    content: Vec<u8>,
    content_type: Option<String>,
    stored_at: DateTime<Utc>,
}

/// Process-local store backed by a map.
///
/// URLs look like `memory://{store identifier}/{identifier}`, with `%` and
/// `/` in the store identifier escaped as `%25` and `%2F` so no store can
/// claim another's URLs. Content is lost when the store is dropped; intended
/// for tests and development setups.
#[derive(Debug)]
pub struct MemoryStore {
    settings: StoreSettings,
    url_root: String,
    objects: Mutex<HashMap<String, StoredObject>>,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    pub fn new(settings: StoreSettings) -> Self {
        let url_root = format!(
            "memory://{}",
            escape_store_identifier(settings.identifier().as_str())
        );
        Self {
            settings,
            url_root,
            objects: Mutex::new(HashMap::new()),
        }
    }

    /// Whether an object is stored under `identifier`.
    pub fn contains(&self, identifier: &str) -> bool {
        self.objects().contains_key(identifier)
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.objects().len()
    }

    /// Whether the store holds no objects.
    pub fn is_empty(&self) -> bool {
        self.objects().is_empty()
    }

    fn objects(&self) -> MutexGuard<'_, HashMap<String, StoredObject>> {
        // Map updates are never left half-applied, so poisoning is ignored
        self.objects.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn escape_store_identifier(identifier: &str) -> String {
    identifier.replace('%', "%25").replace('/', "%2F")
}

#[async_trait::async_trait]
impl Store for MemoryStore {
    fn settings(&self) -> &StoreSettings {
        &self.settings
    }

    #[tracing::instrument(
        skip(self, file),
        fields(store = %self.identifier(), file = %file.identifier())
    )]
    async fn store(&self, file: &File) -> RemoteFilesResult<()> {
        if file.identifier().is_empty() {
            return Err(
                StorageError::new(StorageErrorKind::InvalidIdentifier(String::new())).into(),
            );
        }

        let content = file.content().clone().ok_or_else(|| {
            StorageError::new(StorageErrorKind::MissingContent(file.identifier().clone()))
        })?;

        let size = content.len();
        self.objects().insert(
            file.identifier().clone(),
            StoredObject {
                content,
                content_type: file.content_type().clone(),
                stored_at: Utc::now(),
            },
        );

        tracing::info!(size, "Stored file");
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(store = %self.identifier()))]
    async fn retrieve(&self, identifier: &str) -> RemoteFilesResult<File> {
        let object = self
            .objects()
            .get(identifier)
            .cloned()
            .ok_or_else(|| StorageError::new(StorageErrorKind::NotFound(identifier.to_string())))?;

        tracing::debug!(size = object.content.len(), "Retrieved file");

        let mut file = File::new(identifier)
            .with_content(object.content)
            .with_last_update_ts(object.stored_at)
            .with_stored_in([self.identifier().clone()]);
        if let Some(content_type) = object.content_type {
            file = file.with_content_type(content_type);
        }
        Ok(file)
    }

    #[tracing::instrument(skip(self), fields(store = %self.identifier()))]
    async fn delete(&self, identifier: &str) -> RemoteFilesResult<()> {
        if self.objects().remove(identifier).is_some() {
            tracing::info!("Deleted file");
        } else {
            tracing::debug!("Nothing to delete");
        }
        Ok(())
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
