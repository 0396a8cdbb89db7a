//! Core types for books, pages and cover styling

mod book;
mod color;
mod page;

pub use book::{now_millis, Book, MetaField};
pub use color::CoverColor;
pub use page::Page;

/// Generate a fresh identifier for a book or page
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
