//! Page editing: draft buffers and markdown toolbar actions

use crate::types::Page;
use std::ops::Range;
use std::str::FromStr;

/// Editable copy of a page's title and content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageDraft {
    page_id: String,
    pub title: String,
    pub content: String,
}

impl PageDraft {
    /// Load a page into the editor
    pub fn from_page(page: &Page) -> Self {
        Self {
            page_id: page.id.clone(),
            title: page.title.clone(),
            content: page.content.clone(),
        }
    }

    pub fn page_id(&self) -> &str {
        &self.page_id
    }

    /// Whether the draft differs from the stored page
    pub fn is_dirty(&self, page: &Page) -> bool {
        self.title != page.title || self.content != page.content
    }

    /// Produce the saved page: same id and number, drafted title and content
    pub fn commit(&self, page: &Page) -> Page {
        Page {
            id: page.id.clone(),
            page_number: page.page_number,
            title: self.title.clone(),
            content: self.content.clone(),
        }
    }
}

/// Result of inserting markdown syntax around a selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
    pub text: String,
    /// Selection after the edit, still covering the originally selected text
    pub selection: Range<usize>,
}

/// Wrap `selection` (byte offsets) in `prefix` and `suffix`
///
/// Offsets past the end are clamped, and offsets inside a multi-byte
/// character snap back to its start.
pub fn insert_syntax(text: &str, selection: Range<usize>, prefix: &str, suffix: &str) -> Insertion {
    let mut start = floor_char_boundary(text, selection.start);
    let mut end = floor_char_boundary(text, selection.end);
    if start > end {
        std::mem::swap(&mut start, &mut end);
    }

    let mut out = String::with_capacity(text.len() + prefix.len() + suffix.len());
    out.push_str(&text[..start]);
    out.push_str(prefix);
    out.push_str(&text[start..end]);
    out.push_str(suffix);
    out.push_str(&text[end..]);

    Insertion {
        text: out,
        selection: start + prefix.len()..end + prefix.len(),
    }
}

fn floor_char_boundary(text: &str, index: usize) -> usize {
    let mut index = index.min(text.len());
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// Toolbar formatting actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Bold,
    Italic,
    Heading1,
    Heading2,
    List,
}

impl Format {
    /// Markdown inserted before and after the selection
    pub fn syntax(&self) -> (&'static str, &'static str) {
        match self {
            Format::Bold => ("**", "**"),
            Format::Italic => ("*", "*"),
            Format::Heading1 => ("# ", ""),
            Format::Heading2 => ("## ", ""),
            Format::List => ("- ", ""),
        }
    }

    /// Apply to the draft content, returning the new selection
    pub fn apply(&self, draft: &mut PageDraft, selection: Range<usize>) -> Range<usize> {
        let (prefix, suffix) = self.syntax();
        let insertion = insert_syntax(&draft.content, selection, prefix, suffix);
        draft.content = insertion.text;
        insertion.selection
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bold" | "b" => Ok(Format::Bold),
            "italic" | "i" => Ok(Format::Italic),
            "h1" | "heading1" => Ok(Format::Heading1),
            "h2" | "heading2" => Ok(Format::Heading2),
            "list" | "ul" => Ok(Format::List),
            other => Err(format!(
                "unknown format '{}' (expected bold, italic, h1, h2 or list)",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_wrap_selection_in_bold() {
        let result = insert_syntax("make this loud", 10..14, "**", "**");
        assert_eq!(result.text, "make this **loud**");
        assert_eq!(result.selection, 12..16);
        assert_eq!(&result.text[result.selection.clone()], "loud");
    }

    #[test]
    fn test_prefix_at_cursor() {
        let result = insert_syntax("Title", 0..0, "# ", "");
        assert_eq!(result.text, "# Title");
        assert_eq!(result.selection, 2..2);
    }

    #[test]
    fn test_out_of_range_selection_is_clamped() {
        let result = insert_syntax("abc", 2..99, "*", "*");
        assert_eq!(result.text, "ab*c*");
    }

    #[test]
    fn test_selection_inside_multibyte_char() {
        // 'è' spans bytes 1..3
        let result = insert_syntax("fè", 2..3, "*", "*");
        assert_eq!(result.text, "f*è*");
    }

    #[test]
    fn test_format_apply_updates_draft() {
        let page = Page::new("p1", 1, "Draft").with_content("item");
        let mut draft = PageDraft::from_page(&page);
        assert!(!draft.is_dirty(&page));

        let selection = Format::List.apply(&mut draft, 0..4);
        assert_eq!(draft.content, "- item");
        assert_eq!(selection, 2..6);
        assert!(draft.is_dirty(&page));

        draft.title = "Final".to_string();
        let saved = draft.commit(&page);
        assert_eq!(saved.id, "p1");
        assert_eq!(saved.page_number, 1);
        assert_eq!(saved.title, "Final");
        assert_eq!(saved.content, "- item");
    }

    #[test]
    fn test_parse_format() {
        assert_eq!("H2".parse::<Format>().unwrap(), Format::Heading2);
        assert_eq!("italic".parse::<Format>().unwrap(), Format::Italic);
        assert!("underline".parse::<Format>().is_err());
    }

    proptest! {
        #[test]
        fn insertion_preserves_surrounding_text(
            text in "\\PC{0,40}",
            a in 0usize..60,
            b in 0usize..60,
        ) {
            let result = insert_syntax(&text, a..b, "**", "__");
            prop_assert_eq!(result.text.len(), text.len() + 4);
            prop_assert_eq!(result.text.replacen("**", "", 1).replacen("__", "", 1).len(), text.len());
            prop_assert!(result.text.is_char_boundary(result.selection.start));
            prop_assert!(result.text.is_char_boundary(result.selection.end));
        }
    }
}
