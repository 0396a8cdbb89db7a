//! HTML and plain-text rendering of covers, pages and spreads

use crate::session::Session;
use crate::types::{Book, Page};
use pulldown_cmark::{html, Options, Parser};
use serde::Serialize;

/// Which half of a spread a page sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    fn class(&self) -> &'static str {
        match self {
            Side::Left => "page-left",
            Side::Right => "page-right",
        }
    }
}

/// A spread rendered for a front-end
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RenderedSpread {
    pub spread_index: usize,
    pub left: String,
    pub right: String,
    pub indicator: String,
    pub has_next: bool,
}

/// Markdown to HTML renderer
pub struct HtmlRenderer {
    enable_tables: bool,
    enable_strikethrough: bool,
    enable_footnotes: bool,
    enable_tasklists: bool,
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlRenderer {
    pub fn new() -> Self {
        Self {
            enable_tables: true,
            enable_strikethrough: true,
            enable_footnotes: true,
            enable_tasklists: true,
        }
    }

    /// Enable or disable GFM tables
    pub fn with_tables(mut self, enable: bool) -> Self {
        self.enable_tables = enable;
        self
    }

    /// Enable or disable `~~strikethrough~~`
    pub fn with_strikethrough(mut self, enable: bool) -> Self {
        self.enable_strikethrough = enable;
        self
    }

    /// Enable or disable footnotes
    pub fn with_footnotes(mut self, enable: bool) -> Self {
        self.enable_footnotes = enable;
        self
    }

    /// Enable or disable `- [ ]` task lists
    pub fn with_tasklists(mut self, enable: bool) -> Self {
        self.enable_tasklists = enable;
        self
    }

    fn parser_options(&self) -> Options {
        let mut options = Options::empty();
        if self.enable_tables {
            options.insert(Options::ENABLE_TABLES);
        }
        if self.enable_strikethrough {
            options.insert(Options::ENABLE_STRIKETHROUGH);
        }
        if self.enable_footnotes {
            options.insert(Options::ENABLE_FOOTNOTES);
        }
        if self.enable_tasklists {
            options.insert(Options::ENABLE_TASKLISTS);
        }
        options
    }

    /// Convert markdown source to an HTML fragment
    pub fn markdown_to_html(&self, markdown: &str) -> String {
        if markdown.is_empty() {
            return String::new();
        }
        let parser = Parser::new_ext(markdown, self.parser_options());
        let mut out = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut out, parser);
        out
    }

    /// Render one page, or the closing placeholder when there is none
    pub fn page(&self, page: Option<&Page>, side: Side) -> String {
        let Some(page) = page else {
            return format!(
                "<article class=\"page {} page-end\"><span>End</span></article>\n",
                side.class()
            );
        };
        format!(
            "<article class=\"page {}\">\n<h2 class=\"page-title\">{}</h2>\n<div class=\"page-body\">\n{}</div>\n<footer class=\"page-number\">{}</footer>\n</article>\n",
            side.class(),
            escape_html(&page.title),
            self.markdown_to_html(&page.content),
            page.page_number
        )
    }

    /// Render the cover of a book
    pub fn cover(&self, book: &Book) -> String {
        let subtitle = book
            .subtitle
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|s| format!("<h2 class=\"cover-subtitle\">{}</h2>\n", escape_html(s)))
            .unwrap_or_default();
        format!(
            "<section class=\"cover cover-{}\">\n<h1 class=\"cover-title\">{}</h1>\n{}<p class=\"cover-author\">{}</p>\n</section>\n",
            book.cover_color,
            escape_html(&book.title),
            subtitle,
            escape_html(&book.author)
        )
    }

    /// Render the spread the session is looking at
    pub fn spread(&self, book: &Book, session: &Session) -> RenderedSpread {
        let pages = session.spread(book);
        RenderedSpread {
            spread_index: session.spread_index(),
            left: self.page(pages.left, Side::Left),
            right: self.page(pages.right, Side::Right),
            indicator: session.indicator(book.page_count()),
            has_next: session.can_go_next(book.page_count()),
        }
    }

    /// Render a standalone HTML document of the current view
    pub fn document(&self, book: &Book, session: &Session) -> String {
        let body = if session.showing_cover() {
            self.cover(book)
        } else {
            let spread = self.spread(book, session);
            format!(
                "<main class=\"spread\">\n{}{}</main>\n<nav class=\"indicator\">{}</nav>\n",
                spread.left, spread.right, spread.indicator
            )
        };
        format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>\n{}</style>\n</head>\n<body>\n{}</body>\n</html>\n",
            escape_html(&book.title),
            stylesheet(book.cover_color.hex()),
            body
        )
    }
}

/// Convert markdown to HTML with the default extensions
pub fn markdown_to_html(markdown: &str) -> String {
    HtmlRenderer::new().markdown_to_html(markdown)
}

/// Plain-text rendering of a page for terminals
pub fn page_text(page: &Page) -> String {
    let rule = "=".repeat(page.title.chars().count().max(3));
    let body = page.content.trim_end();
    if body.is_empty() {
        format!("{}\n{}\n\n{}\n", page.title, rule, page.label())
    } else {
        format!("{}\n{}\n\n{}\n\n{}\n", page.title, rule, body, page.label())
    }
}

fn stylesheet(accent: &str) -> String {
    format!(
        "body {{ margin: 0; background: #e7e5e4; font-family: Georgia, serif; }}\n\
         .cover {{ background: {accent}; color: #fef3c7; min-height: 100vh; text-align: center; padding: 4rem 1.5rem; }}\n\
         .spread {{ display: flex; background: #fdfbf7; }}\n\
         .page {{ flex: 1; padding: 3rem; }}\n\
         .page-left {{ border-right: 1px solid #e7e5e4; }}\n\
         .page-title {{ color: {accent}; border-bottom: 1px solid #d6d3d1; }}\n\
         .page-number, .indicator {{ text-align: center; color: {accent}; }}\n\
         .page-end {{ display: flex; align-items: center; justify-content: center; opacity: 0.3; font-style: italic; }}\n"
    )
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
