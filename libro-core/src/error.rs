//! Error types for Libro Core

use thiserror::Error;

/// Result type alias using LibroError
pub type Result<T> = std::result::Result<T, LibroError>;

/// Top-level error type for all Libro operations
#[derive(Debug, Error)]
pub enum LibroError {
    #[error("Library error: {0}")]
    Library(#[from] LibraryError),

    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by edits to the library and its books
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LibraryError {
    #[error("Book not found: {0}")]
    NotFound(String),

    #[error("Page not found: {0}")]
    PageNotFound(String),

    #[error("Page index out of range: {0}")]
    PageOutOfRange(usize),

    #[error("A book must keep at least one page")]
    LastPage,

    #[error("Book title cannot be empty")]
    EmptyTitle,
}

/// Errors that occur while importing a book document
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid book document: {0}")]
    Invalid(String),
}

/// Errors that occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Backend error: {0}")]
    BackendError(String),
}

impl StorageError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound(_))
    }
}
