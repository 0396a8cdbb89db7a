//! Library-level commands: list, new, delete, info, meta

use super::Workspace;
use anyhow::{bail, Result};
use libro_core::{Book, CoverColor, MetaField};
use serde::Serialize;
use std::path::Path;

/// Book summary output
#[derive(Serialize)]
struct BookSummary {
    id: String,
    title: String,
    subtitle: Option<String>,
    author: String,
    color: CoverColor,
    pages: usize,
    created: Option<String>,
}

impl From<&Book> for BookSummary {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.clone(),
            title: book.title.clone(),
            subtitle: book.subtitle.clone(),
            author: book.author.clone(),
            color: book.cover_color,
            pages: book.page_count(),
            created: book.created().map(|d| d.to_rfc3339()),
        }
    }
}

/// List the books on the shelf
pub async fn list(data_dir: &Path, search: Option<&str>, json: bool) -> Result<()> {
    let workspace = Workspace::open(data_dir).await?;
    let books: Vec<BookSummary> = workspace
        .library
        .search(search.unwrap_or_default())
        .into_iter()
        .map(BookSummary::from)
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&books)?);
        return Ok(());
    }

    if books.is_empty() {
        println!("The library is empty...");
        return Ok(());
    }

    for book in &books {
        println!(
            "{:<38} {:<6} {:>3}p  {} - {}",
            book.id, book.color, book.pages, book.title, book.author
        );
    }
    Ok(())
}

/// Bind a new book
pub async fn new_book(data_dir: &Path, title: &str, color: CoverColor) -> Result<()> {
    let mut workspace = Workspace::open(data_dir).await?;
    let id = workspace.library.create_book(title, color)?;
    workspace.save().await?;

    tracing::info!("Created '{}' ({})", title.trim(), id);
    println!("{}", id);
    Ok(())
}

/// Delete a book; refuses unless confirmed
pub async fn delete(data_dir: &Path, id: &str, yes: bool) -> Result<()> {
    let mut workspace = Workspace::open(data_dir).await?;
    let title = workspace.library.book(id)?.title.clone();

    if !yes {
        bail!(
            "Refusing to delete '{}' permanently without confirmation; pass --yes",
            title
        );
    }

    workspace.library.delete_book(id)?;
    workspace.save().await?;
    println!("Deleted '{}'", title);
    Ok(())
}

/// Detailed book output
#[derive(Serialize)]
struct BookInfo {
    #[serde(flatten)]
    summary: BookSummary,
    page_titles: Vec<String>,
}

/// Display information about a book
pub async fn info(data_dir: &Path, id: &str, json: bool) -> Result<()> {
    let workspace = Workspace::open(data_dir).await?;
    let book = workspace.library.book(id)?;

    let info = BookInfo {
        summary: BookSummary::from(book),
        page_titles: book.pages.iter().map(|p| p.title.clone()).collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("Title:    {}", info.summary.title);
    if let Some(subtitle) = &info.summary.subtitle {
        println!("Subtitle: {}", subtitle);
    }
    println!("Author:   {}", info.summary.author);
    println!(
        "Cover:    {} ({})",
        book.cover_color.display_name(),
        book.cover_color.hex()
    );
    if let Some(created) = &info.summary.created {
        println!("Created:  {}", created);
    }
    println!("Pages:    {}", info.summary.pages);
    for (i, title) in info.page_titles.iter().enumerate() {
        println!("  {:>3}. {}", i + 1, title);
    }
    Ok(())
}

/// Edit cover fields
pub async fn meta(
    data_dir: &Path,
    id: &str,
    title: Option<String>,
    subtitle: Option<String>,
    author: Option<String>,
) -> Result<()> {
    let updates: Vec<(MetaField, String)> = [
        (MetaField::Title, title),
        (MetaField::Subtitle, subtitle),
        (MetaField::Author, author),
    ]
    .into_iter()
    .filter_map(|(field, value)| value.map(|v| (field, v)))
    .collect();

    if updates.is_empty() {
        bail!("Nothing to change; pass --title, --subtitle or --author");
    }

    let mut workspace = Workspace::open(data_dir).await?;
    for (field, value) in updates {
        workspace.library.update_meta(id, field, value)?;
    }
    workspace.save().await?;

    let book = workspace.library.book(id)?;
    println!("Updated '{}'", book.title);
    Ok(())
}
