//! Read command implementation

use super::Workspace;
use anyhow::{bail, Context, Result};
use libro_core::render::page_text;
use libro_core::{Book, HtmlRenderer, Session};
use std::path::{Path, PathBuf};

/// Show the cover or the spread holding `page`
pub async fn read(
    data_dir: &Path,
    id: &str,
    page: Option<u32>,
    html: bool,
    output: Option<PathBuf>,
) -> Result<()> {
    let workspace = Workspace::open(data_dir).await?;
    let book = workspace.library.book(id)?;

    let mut session = Session::new();
    session.open(book.id.clone());
    if let Some(number) = page {
        if number == 0 || number as usize > book.page_count() {
            bail!(
                "Page {} is out of range (the book has {} pages)",
                number,
                book.page_count()
            );
        }
        session.go_to_page(number as usize - 1);
    }

    let rendered = if html {
        HtmlRenderer::new().document(book, &session)
    } else {
        render_text(book, &session)
    };

    match output {
        Some(path) => {
            tokio::fs::write(&path, rendered)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Wrote {}", path.display());
        }
        None => print!("{}", rendered),
    }
    Ok(())
}

fn render_text(book: &Book, session: &Session) -> String {
    if session.showing_cover() {
        let mut out = format!("{}\n", book.title);
        if let Some(subtitle) = book.subtitle.as_deref().filter(|s| !s.is_empty()) {
            out.push_str(&format!("{}\n", subtitle));
        }
        out.push_str(&format!("\nby {}\n", book.author));
        return out;
    }

    let spread = session.spread(book);
    let mut out = String::new();
    for page in [spread.left, spread.right].into_iter().flatten() {
        out.push_str(&page_text(page));
        out.push('\n');
    }
    if spread.right.is_none() {
        out.push_str("End\n\n");
    }
    out.push_str(&format!("[{}]\n", session.indicator(book.page_count())));
    out
}
