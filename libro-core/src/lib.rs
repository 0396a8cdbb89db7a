//! Libro Core Library
//!
//! Books made of markdown pages, the library that holds them, the reading
//! session that flips through spreads, and persistence of it all. Front-ends
//! (the CLI and the HTTP server) are thin layers over this crate.

pub mod editor;
pub mod error;
pub mod library;
pub mod render;
pub mod session;
pub mod storage;
pub mod types;

pub use editor::{insert_syntax, Format, PageDraft};
pub use error::{ImportError, LibraryError, LibroError, Result, StorageError};
pub use library::{export_file_name, Library};
pub use render::{markdown_to_html, HtmlRenderer, RenderedSpread, Side};
pub use session::{Mode, Session, Spread};
pub use storage::{LibraryStore, SaveStatus};
pub use types::{Book, CoverColor, MetaField, Page};
