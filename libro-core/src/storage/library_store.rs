//! Persistence of the whole library as a single JSON document

use super::{LocalStorage, StorageProvider};
use crate::library::Library;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

/// Key holding the library array
pub const LIBRARY_KEY: &str = "libro_magico_data.json";

/// Key used by releases that stored a single book
pub const LEGACY_LIBRARY_KEY: &str = "libromagico_data.json";

/// Outcome of the most recent save
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SaveStatus {
    #[default]
    Idle,
    Saving,
    Saved,
    Error,
}

/// Loads and saves the library through a storage provider
#[derive(Clone)]
pub struct LibraryStore {
    provider: Arc<dyn StorageProvider>,
}

impl LibraryStore {
    pub fn new(provider: Arc<dyn StorageProvider>) -> Self {
        Self { provider }
    }

    /// Store rooted at a directory on disk
    pub fn local(root: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(LocalStorage::new(root)))
    }

    /// Load the library
    ///
    /// Falls back to the legacy key, then to the default library when
    /// nothing has been stored yet.
    pub async fn load(&self) -> Result<Library> {
        if let Some(data) = self.read_optional(LIBRARY_KEY).await? {
            return Ok(Library::from_stored(&data));
        }
        if let Some(data) = self.read_optional(LEGACY_LIBRARY_KEY).await? {
            tracing::info!("Loading library from legacy key {}", LEGACY_LIBRARY_KEY);
            return Ok(Library::from_stored(&data));
        }
        tracing::debug!("No stored library, starting with the default book");
        Ok(Library::with_default_book())
    }

    /// Persist the whole library, empty or not
    pub async fn save(&self, library: &Library) -> Result<()> {
        let data = serde_json::to_vec(library)?;
        self.provider.write(LIBRARY_KEY, data).await?;
        tracing::debug!(books = library.len(), "Library saved");
        Ok(())
    }

    async fn read_optional(&self, key: &str) -> Result<Option<Vec<u8>>> {
        match self.provider.read(key).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
