//! CLI command implementations

mod books;
mod pages;
mod read;
mod transfer;

pub use books::{delete, info, list, meta, new_book};
pub use pages::{page_add, page_delete, page_edit, page_format};
pub use read::read;
pub use transfer::{export, import};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use libro_core::{Library, LibraryStore};
use std::path::{Path, PathBuf};

/// Pick the library directory: explicit flag or env, then the platform data dir
pub fn resolve_data_dir(explicit: Option<PathBuf>) -> PathBuf {
    explicit
        .or_else(|| ProjectDirs::from("org", "libro", "libro").map(|d| d.data_dir().to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("./libro_data"))
}

/// A loaded library bound to the store it came from
pub struct Workspace {
    store: LibraryStore,
    pub library: Library,
}

impl Workspace {
    pub async fn open(data_dir: &Path) -> Result<Self> {
        let store = LibraryStore::local(data_dir);
        let library = store
            .load()
            .await
            .with_context(|| format!("Failed to load library from {}", data_dir.display()))?;
        Ok(Self { store, library })
    }

    pub async fn save(&self) -> Result<()> {
        self.store
            .save(&self.library)
            .await
            .context("Failed to save library")
    }
}
