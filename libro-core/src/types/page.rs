//! A single markdown-authored page of a book

use serde::{Deserialize, Serialize};

/// One page of a book
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Unique identifier within the book; empty when a document arrives without one
    #[serde(default)]
    pub id: String,

    /// 1-based position, recomputed whenever pages are inserted or removed
    #[serde(default)]
    pub page_number: u32,

    /// Page title shown above the content
    #[serde(default)]
    pub title: String,

    /// Markdown source
    #[serde(default)]
    pub content: String,
}

impl Page {
    /// Create an empty page
    pub fn new(id: impl Into<String>, page_number: u32, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            page_number,
            title: title.into(),
            content: String::new(),
        }
    }

    /// Set the markdown content
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Footer label shown under the page
    pub fn label(&self) -> String {
        format!("Page {}", self.page_number)
    }
}
