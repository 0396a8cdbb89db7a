//! The library: every book available to the user
//!
//! All edits are plain vector operations. Persistence lives in
//! [`crate::storage::LibraryStore`]; this module only knows how to turn stored
//! bytes into a library, including documents written by older releases.

use crate::error::{ImportError, LibraryError};
use crate::types::{new_id, now_millis, Book, CoverColor, MetaField, Page};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Ordered collection of books
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Library {
    books: Vec<Book>,
}

impl Library {
    /// An empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// A library holding only the starter book
    pub fn with_default_book() -> Self {
        Self {
            books: vec![Book::starter()],
        }
    }

    /// Build a library from a list of books
    pub fn from_books(books: Vec<Book>) -> Self {
        Self { books }
    }

    /// Interpret a stored document
    ///
    /// Accepts the current format (an array of books) and the legacy
    /// single-book object. Anything unreadable yields the default library.
    pub fn from_stored(data: &[u8]) -> Self {
        let value: serde_json::Value = match serde_json::from_slice(data) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Stored library is not valid JSON, starting fresh: {}", e);
                return Self::with_default_book();
            }
        };

        if let serde_json::Value::Array(items) = value {
            let books = items
                .into_iter()
                .enumerate()
                .filter_map(|(index, item)| match serde_json::from_value::<Book>(item) {
                    Ok(book) => Some(book),
                    Err(e) => {
                        tracing::warn!("Skipping unreadable book at position {}: {}", index, e);
                        None
                    }
                })
                .collect();
            let mut library = Self { books };
            library.repair();
            return library;
        }

        if value.get("title").is_some() {
            match migrate_legacy_book(value) {
                Ok(book) => {
                    tracing::info!("Migrating legacy single-book data to library format");
                    return Self { books: vec![book] };
                }
                Err(e) => {
                    tracing::warn!("Legacy book could not be migrated: {}", e);
                }
            }
        }

        Self::with_default_book()
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.books.iter().any(|b| b.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Book> {
        self.books.iter_mut().find(|b| b.id == id)
    }

    /// Look up a book, failing with `NotFound`
    pub fn book(&self, id: &str) -> Result<&Book, LibraryError> {
        self.get(id)
            .ok_or_else(|| LibraryError::NotFound(id.to_string()))
    }

    /// Look up a book for editing, failing with `NotFound`
    pub fn book_mut(&mut self, id: &str) -> Result<&mut Book, LibraryError> {
        self.get_mut(id)
            .ok_or_else(|| LibraryError::NotFound(id.to_string()))
    }

    /// Books whose title, subtitle or author contains the query (case-insensitive)
    pub fn search(&self, query: &str) -> Vec<&Book> {
        let needle = query.trim().to_lowercase();
        self.books
            .iter()
            .filter(|book| {
                needle.is_empty()
                    || book.title.to_lowercase().contains(&needle)
                    || book.author.to_lowercase().contains(&needle)
                    || book
                        .subtitle
                        .as_deref()
                        .is_some_and(|s| s.to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// Bind a new book and append it, returning its id
    pub fn create_book(&mut self, title: &str, color: CoverColor) -> Result<String, LibraryError> {
        if title.trim().is_empty() {
            return Err(LibraryError::EmptyTitle);
        }
        let book = Book::new(title.trim(), color);
        let id = book.id.clone();
        self.books.push(book);
        tracing::debug!(%id, "Created book");
        Ok(id)
    }

    /// Append an existing book, assigning a fresh id when it lacks one or clashes
    pub fn add_book(&mut self, mut book: Book) -> String {
        if book.id.is_empty() || self.contains(&book.id) {
            book.id = new_id();
        }
        let id = book.id.clone();
        self.books.push(book);
        id
    }

    /// Remove a book permanently
    pub fn delete_book(&mut self, id: &str) -> Result<Book, LibraryError> {
        let index = self
            .books
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| LibraryError::NotFound(id.to_string()))?;
        Ok(self.books.remove(index))
    }

    /// Update a cover field of a book
    pub fn update_meta(
        &mut self,
        id: &str,
        field: MetaField,
        value: impl Into<String>,
    ) -> Result<(), LibraryError> {
        self.book_mut(id)?.set_meta(field, value);
        Ok(())
    }

    /// Save an edited page back into its book
    pub fn update_page(&mut self, id: &str, page: Page) -> Result<(), LibraryError> {
        self.book_mut(id)?.replace_page(page)
    }

    /// Import a book from an exported JSON document, returning its id
    pub fn import_book(&mut self, json: &str) -> Result<String, ImportError> {
        let book = parse_book_document(json)?;
        let id = self.add_book(book);
        tracing::debug!(%id, "Imported book");
        Ok(id)
    }

    /// Serialize one book as an indented JSON document
    pub fn export_book(&self, id: &str) -> crate::Result<String> {
        let book = self.book(id)?;
        Ok(serde_json::to_string_pretty(book)?)
    }

    /// Give every book without an id a fresh one and normalize its pages
    fn repair(&mut self) {
        for book in self.books.iter_mut() {
            if book.id.is_empty() {
                book.id = new_id();
            }
            book.normalize();
        }
    }
}

/// Validate and normalize a single book document
pub fn parse_book_document(json: &str) -> Result<Book, ImportError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let has_title = value.get("title").is_some_and(|t| t.is_string());
    let has_pages = value.get("pages").is_some_and(|p| p.is_array());
    if !has_title || !has_pages {
        return Err(ImportError::Invalid(
            "expected an object with a title and a pages array".to_string(),
        ));
    }
    let mut book: Book = serde_json::from_value(value)?;
    book.normalize();
    Ok(book)
}

/// File name used when exporting a book
pub fn export_file_name(title: &str) -> String {
    static UNSAFE: OnceLock<Regex> = OnceLock::new();
    let unsafe_chars = UNSAFE.get_or_init(|| Regex::new(r"(?i)[^a-z0-9]").expect("valid regex"));
    format!(
        "{}.json",
        unsafe_chars.replace_all(title, "_").to_lowercase()
    )
}

fn migrate_legacy_book(value: serde_json::Value) -> Result<Book, serde_json::Error> {
    let mut book: Book = serde_json::from_value(value)?;
    if book.id.is_empty() {
        book.id = now_millis().to_string();
    }
    book.cover_color = CoverColor::Brown;
    book.created_at = now_millis();
    book.normalize();
    Ok(book)
}
