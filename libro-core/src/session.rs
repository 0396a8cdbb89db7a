//! Reading session: which book is open, how, and which spread is showing
//!
//! A spread shows two consecutive pages. `spread_index` is the 0-based index
//! of the left page and is always even.

use crate::types::{Book, Page};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether pages are being read or edited
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Mode {
    #[default]
    Reading,
    Editing,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Reading => f.write_str("reading"),
            Mode::Editing => f.write_str("editing"),
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reading" | "read" => Ok(Mode::Reading),
            "editing" | "edit" => Ok(Mode::Editing),
            other => Err(format!("unknown mode '{}'", other)),
        }
    }
}

/// The two pages visible at once
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spread<'a> {
    pub left: Option<&'a Page>,
    pub right: Option<&'a Page>,
}

/// Navigation state of the book frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    active_book: Option<String>,
    mode: Mode,
    showing_cover: bool,
    spread_index: usize,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            active_book: None,
            mode: Mode::Reading,
            showing_cover: true,
            spread_index: 0,
        }
    }
}

impl Session {
    /// A session sitting in the library view
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the open book; `None` means the library is showing
    pub fn active_book(&self) -> Option<&str> {
        self.active_book.as_deref()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn showing_cover(&self) -> bool {
        self.showing_cover
    }

    pub fn spread_index(&self) -> usize {
        self.spread_index
    }

    /// Open a book on its cover
    pub fn open(&mut self, book_id: impl Into<String>) {
        self.active_book = Some(book_id.into());
        self.showing_cover = true;
        self.spread_index = 0;
    }

    /// Open a freshly created book, ready for writing
    pub fn open_new(&mut self, book_id: impl Into<String>) {
        self.open(book_id);
        self.mode = Mode::Editing;
    }

    /// Return to the library
    pub fn close(&mut self) {
        self.active_book = None;
        self.mode = Mode::Reading;
        self.showing_cover = true;
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    pub fn show_cover(&mut self) {
        self.showing_cover = true;
    }

    /// Leave the cover for the current spread
    pub fn open_pages(&mut self) {
        self.showing_cover = false;
    }

    /// Jump to the spread containing a 0-based page index
    pub fn go_to_page(&mut self, page_index: usize) {
        self.showing_cover = false;
        self.spread_index = page_index - page_index % 2;
    }

    /// Whether moving forward is possible with `total` pages
    ///
    /// The spread just past the last page stays reachable so the editor can
    /// offer to append a page there.
    pub fn can_go_next(&self, total: usize) -> bool {
        self.showing_cover || self.spread_index + 2 <= total
    }

    /// Turn forward; returns whether anything changed
    pub fn next(&mut self, total: usize) -> bool {
        if self.showing_cover {
            self.showing_cover = false;
            self.spread_index = 0;
            return true;
        }
        if self.spread_index + 2 <= total {
            self.spread_index += 2;
            return true;
        }
        false
    }

    /// Turn back; from the first spread this closes the book onto its cover
    pub fn prev(&mut self) -> bool {
        if self.showing_cover {
            return false;
        }
        if self.spread_index == 0 {
            self.showing_cover = true;
        } else {
            self.spread_index -= 2;
        }
        true
    }

    /// Follow a newly appended page so it is visible
    pub fn after_page_added(&mut self, page_number: u32) {
        let n = page_number as usize;
        self.showing_cover = false;
        self.spread_index = if n % 2 != 0 {
            n.saturating_sub(1)
        } else {
            n.saturating_sub(2)
        };
    }

    /// Step back when the current spread no longer exists
    pub fn after_page_removed(&mut self, remaining: usize) {
        if self.spread_index >= remaining {
            self.spread_index = self.spread_index.saturating_sub(2);
        }
    }

    /// Return to the library if the deleted book was open
    pub fn on_book_deleted(&mut self, book_id: &str) {
        if self.active_book.as_deref() == Some(book_id) {
            self.close();
        }
    }

    /// Pages on the current spread of `book`
    pub fn spread<'a>(&self, book: &'a Book) -> Spread<'a> {
        Spread {
            left: book.page_at(self.spread_index),
            right: book.page_at(self.spread_index + 1),
        }
    }

    /// Position label such as `3 - 4 / 7`
    pub fn indicator(&self, total: usize) -> String {
        format!(
            "{} - {} / {}",
            self.spread_index + 1,
            (self.spread_index + 2).min(total),
            total
        )
    }
}
