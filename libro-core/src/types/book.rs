//! The Book type - a titled collection of pages with cover metadata

use super::{new_id, CoverColor, Page};
use crate::error::LibraryError;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Milliseconds since the Unix epoch
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

const WELCOME_TEXT: &str = "# Welcome\n\nThis is the beginning of your story. Switch to **Edit** mode to change this text.";

/// A book as stored in the library
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Library identifier; empty when a document arrives without one
    #[serde(default)]
    pub id: String,

    /// Cover title
    pub title: String,

    /// Optional line shown under the title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,

    #[serde(default)]
    pub author: String,

    #[serde(default)]
    pub cover_color: CoverColor,

    /// Creation time in milliseconds since the Unix epoch
    #[serde(default = "now_millis")]
    pub created_at: i64,

    /// Ordered pages
    #[serde(default)]
    pub pages: Vec<Page>,
}

impl Book {
    /// Bind a new book with a single empty chapter
    pub fn new(title: impl Into<String>, color: CoverColor) -> Self {
        Self {
            id: new_id(),
            title: title.into(),
            subtitle: None,
            author: "New Author".to_string(),
            cover_color: color,
            created_at: now_millis(),
            pages: vec![Page::new(new_id(), 1, "Chapter 1")],
        }
    }

    /// The book a fresh library starts with
    pub fn starter() -> Self {
        Self {
            id: "default-1".to_string(),
            title: "My First Book".to_string(),
            subtitle: Some("Click to start writing".to_string()),
            author: "You".to_string(),
            cover_color: CoverColor::Brown,
            created_at: now_millis(),
            pages: vec![Page::new("1", 1, "Opening").with_content(WELCOME_TEXT)],
        }
    }

    /// Creation time as a timestamp
    pub fn created(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.created_at).single()
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Find a page by id
    pub fn page(&self, page_id: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.id == page_id)
    }

    /// Find a page by id for editing
    pub fn page_mut(&mut self, page_id: &str) -> Option<&mut Page> {
        self.pages.iter_mut().find(|p| p.id == page_id)
    }

    /// Page at a 0-based position
    pub fn page_at(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    /// Page by its 1-based number
    pub fn page_by_number(&self, number: u32) -> Option<&Page> {
        (number as usize)
            .checked_sub(1)
            .and_then(|index| self.pages.get(index))
    }

    /// Append an empty page titled after its number, returning that number
    pub fn add_page(&mut self) -> u32 {
        let number = self.pages.len() as u32 + 1;
        self.pages
            .push(Page::new(new_id(), number, format!("New Page {}", number)));
        number
    }

    /// Insert an empty page at a 0-based position
    pub fn insert_page(
        &mut self,
        index: usize,
        title: impl Into<String>,
    ) -> Result<&Page, LibraryError> {
        if index > self.pages.len() {
            return Err(LibraryError::PageOutOfRange(index));
        }
        self.pages.insert(index, Page::new(new_id(), 0, title));
        self.renumber();
        Ok(&self.pages[index])
    }

    /// Remove the page at a 0-based position
    pub fn remove_page(&mut self, index: usize) -> Result<Page, LibraryError> {
        if index >= self.pages.len() {
            return Err(LibraryError::PageOutOfRange(index));
        }
        if self.pages.len() <= 1 {
            return Err(LibraryError::LastPage);
        }
        let removed = self.pages.remove(index);
        self.renumber();
        Ok(removed)
    }

    /// Remove the final page; a book never drops below one page
    pub fn remove_last_page(&mut self) -> Result<Page, LibraryError> {
        match self.pages.len() {
            0 | 1 => Err(LibraryError::LastPage),
            n => self.remove_page(n - 1),
        }
    }

    /// Replace the page carrying the same id, keeping its position
    pub fn replace_page(&mut self, page: Page) -> Result<(), LibraryError> {
        let slot = self
            .page_mut(&page.id)
            .ok_or_else(|| LibraryError::PageNotFound(page.id.clone()))?;
        let number = slot.page_number;
        *slot = page;
        slot.page_number = number;
        Ok(())
    }

    /// Recompute positional page numbers
    pub fn renumber(&mut self) {
        for (index, page) in self.pages.iter_mut().enumerate() {
            page.page_number = index as u32 + 1;
        }
    }

    /// Repair a book read from outside: pages without an id get one, numbers
    /// follow position and a book with no pages gets a blank first one
    pub fn normalize(&mut self) {
        for page in self.pages.iter_mut().filter(|p| p.id.is_empty()) {
            page.id = new_id();
        }
        if self.pages.is_empty() {
            self.pages.push(Page::new(new_id(), 1, "Chapter 1"));
        }
        self.renumber();
    }

    /// Update one of the cover fields
    pub fn set_meta(&mut self, field: MetaField, value: impl Into<String>) {
        let value = value.into();
        match field {
            MetaField::Title => self.title = value,
            MetaField::Author => self.author = value,
            MetaField::Subtitle => {
                self.subtitle = if value.is_empty() { None } else { Some(value) };
            }
        }
    }
}

/// Cover fields editable in edit mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaField {
    Title,
    Subtitle,
    Author,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_book() {
        let book = Book::new("Notebook", CoverColor::Green);
        assert_eq!(book.title, "Notebook");
        assert_eq!(book.author, "New Author");
        assert_eq!(book.pages.len(), 1);
        assert_eq!(book.pages[0].title, "Chapter 1");
        assert_eq!(book.pages[0].page_number, 1);
        assert!(book.pages[0].content.is_empty());
        assert!(book.created().is_some());
    }

    #[test]
    fn test_add_page_numbers_and_titles() {
        let mut book = Book::new("Notebook", CoverColor::Brown);
        assert_eq!(book.add_page(), 2);
        assert_eq!(book.add_page(), 3);
        assert_eq!(book.pages[2].title, "New Page 3");
        assert_eq!(book.page_by_number(3).unwrap().id, book.pages[2].id);
        assert!(book.page_by_number(0).is_none());
    }

    #[test]
    fn test_last_page_cannot_be_removed() {
        let mut book = Book::new("Notebook", CoverColor::Brown);
        assert_eq!(book.remove_last_page(), Err(LibraryError::LastPage));
        book.add_page();
        let removed = book.remove_last_page().unwrap();
        assert_eq!(removed.page_number, 2);
        assert_eq!(book.page_count(), 1);
    }

    #[test]
    fn test_insert_and_remove_renumber() {
        let mut book = Book::new("Notebook", CoverColor::Brown);
        book.add_page();
        book.add_page();
        let inserted = book.insert_page(1, "Interlude").unwrap().id.clone();
        let numbers: Vec<u32> = book.pages.iter().map(|p| p.page_number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
        assert_eq!(book.page(&inserted).unwrap().page_number, 2);

        book.remove_page(0).unwrap();
        assert_eq!(book.page(&inserted).unwrap().page_number, 1);
        assert_eq!(
            book.insert_page(10, "Nowhere").unwrap_err(),
            LibraryError::PageOutOfRange(10)
        );
    }

    #[test]
    fn test_replace_page_keeps_position() {
        let mut book = Book::new("Notebook", CoverColor::Brown);
        let mut edited = book.pages[0].clone();
        edited.title = "Prologue".to_string();
        edited.content = "Once upon a time".to_string();
        edited.page_number = 42;
        book.replace_page(edited).unwrap();
        assert_eq!(book.pages[0].title, "Prologue");
        assert_eq!(book.pages[0].page_number, 1);

        let stranger = Page::new("missing", 1, "Ghost");
        assert_eq!(
            book.replace_page(stranger),
            Err(LibraryError::PageNotFound("missing".to_string()))
        );
    }

    #[test]
    fn test_empty_subtitle_clears_it() {
        let mut book = Book::starter();
        assert!(book.subtitle.is_some());
        book.set_meta(MetaField::Subtitle, "");
        assert!(book.subtitle.is_none());
        book.set_meta(MetaField::Author, "Anna");
        assert_eq!(book.author, "Anna");
    }

    #[test]
    fn test_book_serialization_uses_camel_case() {
        let book = Book::starter();
        let json = serde_json::to_value(&book).unwrap();
        assert_eq!(json["coverColor"], "brown");
        assert!(json["createdAt"].is_i64());
        assert_eq!(json["pages"][0]["pageNumber"], 1);

        let back: Book = serde_json::from_value(json).unwrap();
        assert_eq!(back, book);
    }

    #[test]
    fn test_minimal_document_fills_defaults() {
        let book: Book =
            serde_json::from_str(r#"{"title":"Bare","pages":[{"id":"a","title":"One"}]}"#)
                .unwrap();
        assert!(book.id.is_empty());
        assert_eq!(book.cover_color, CoverColor::Brown);
        assert!(book.author.is_empty());
        assert!(book.created_at > 0);
        assert!(book.subtitle.is_none());
    }

    #[test]
    fn test_normalize_repairs_pages() {
        let mut book: Book = serde_json::from_str(
            r#"{"title":"Loose","pages":[
                {"pageNumber":5,"title":"A"},
                {"id":"b","title":"B"}]}"#,
        )
        .unwrap();
        book.normalize();

        let numbers: Vec<u32> = book.pages.iter().map(|p| p.page_number).collect();
        assert_eq!(numbers, vec![1, 2]);
        assert!(!book.pages[0].id.is_empty());
        assert_eq!(book.pages[1].id, "b");
    }

    #[test]
    fn test_normalize_gives_empty_book_a_page() {
        let mut book: Book = serde_json::from_str(r#"{"title":"Blank"}"#).unwrap();
        assert!(book.pages.is_empty());
        book.normalize();

        assert_eq!(book.page_count(), 1);
        assert_eq!(book.pages[0].title, "Chapter 1");
        assert_eq!(book.pages[0].page_number, 1);
        assert_eq!(book.remove_last_page(), Err(LibraryError::LastPage));
    }
}
