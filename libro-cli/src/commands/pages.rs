//! Page commands: add, delete, edit, format

use super::Workspace;
use anyhow::{bail, Context, Result};
use libro_core::{Format, Page, PageDraft};
use std::ops::Range;
use std::path::{Path, PathBuf};

/// Append a blank page
pub async fn page_add(data_dir: &Path, id: &str) -> Result<()> {
    let mut workspace = Workspace::open(data_dir).await?;
    let number = workspace.library.book_mut(id)?.add_page();
    workspace.save().await?;

    println!("Added page {}", number);
    Ok(())
}

/// Delete the last page of a book
pub async fn page_delete(data_dir: &Path, id: &str, yes: bool) -> Result<()> {
    let mut workspace = Workspace::open(data_dir).await?;
    let book = workspace.library.book_mut(id)?;

    if book.page_count() <= 1 {
        bail!("'{}' has a single page, which cannot be removed", book.title);
    }
    if !yes {
        bail!("Refusing to delete the last page without confirmation; pass --yes");
    }

    let removed = book.remove_last_page()?;
    let remaining = book.page_count();
    workspace.save().await?;

    println!(
        "Removed page {} '{}' ({} left)",
        removed.page_number, removed.title, remaining
    );
    Ok(())
}

fn page_by_number(workspace: &Workspace, id: &str, number: u32) -> Result<Page> {
    let book = workspace.library.book(id)?;
    book.page_by_number(number)
        .cloned()
        .with_context(|| format!("'{}' has no page {}", book.title, number))
}

/// Replace the title and/or content of a page
pub async fn page_edit(
    data_dir: &Path,
    id: &str,
    number: u32,
    title: Option<String>,
    content: Option<String>,
    file: Option<PathBuf>,
) -> Result<()> {
    let content = match (content, file) {
        (Some(content), _) => Some(content),
        (None, Some(path)) => Some(
            tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?,
        ),
        (None, None) => None,
    };
    if title.is_none() && content.is_none() {
        bail!("Nothing to change; pass --title, --content or --file");
    }

    let mut workspace = Workspace::open(data_dir).await?;
    let page = page_by_number(&workspace, id, number)?;

    let mut draft = PageDraft::from_page(&page);
    if let Some(title) = title {
        draft.title = title;
    }
    if let Some(content) = content {
        draft.content = content;
    }

    if !draft.is_dirty(&page) {
        println!("Page {} unchanged", number);
        return Ok(());
    }

    workspace.library.update_page(id, draft.commit(&page))?;
    workspace.save().await?;
    println!("Saved page {}", number);
    Ok(())
}

/// Apply a toolbar format to a selection of a page
pub async fn page_format(
    data_dir: &Path,
    id: &str,
    number: u32,
    format: Format,
    selection: Range<usize>,
) -> Result<()> {
    let mut workspace = Workspace::open(data_dir).await?;
    let page = page_by_number(&workspace, id, number)?;

    let mut draft = PageDraft::from_page(&page);
    let selection = format.apply(&mut draft, selection);
    workspace.library.update_page(id, draft.commit(&page))?;
    workspace.save().await?;

    tracing::debug!(?selection, "Formatted page {}", number);
    println!("{}", draft.content);
    Ok(())
}
