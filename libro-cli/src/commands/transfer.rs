//! Import and export of book backups

use super::Workspace;
use anyhow::{bail, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use libro_core::library::parse_book_document;
use libro_core::{export_file_name, Book};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Import books from JSON files
///
/// Files are read and validated in parallel; the valid ones are then added
/// to the library in the order given.
pub async fn import(data_dir: &Path, files: &[PathBuf]) -> Result<()> {
    let progress = ProgressBar::new(files.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} {msg}")?
            .progress_chars("##-"),
    );

    let parsed: Vec<(&PathBuf, Result<Book>)> = files
        .par_iter()
        .map(|path| {
            let result = read_book(path);
            progress.inc(1);
            (path, result)
        })
        .collect();
    progress.finish_and_clear();

    let mut workspace = Workspace::open(data_dir).await?;
    let mut errors = 0;
    for (path, result) in parsed {
        match result {
            Ok(book) => {
                let title = book.title.clone();
                let id = workspace.library.add_book(book);
                println!("Imported '{}' ({})", title, id);
            }
            Err(e) => {
                errors += 1;
                tracing::error!("Failed to import {}: {:#}", path.display(), e);
                eprintln!("Invalid book file {}: {:#}", path.display(), e);
            }
        }
    }

    if errors < files.len() {
        workspace.save().await?;
    }

    if errors > 0 {
        bail!("Import completed with {} errors", errors);
    }
    Ok(())
}

fn read_book(path: &Path) -> Result<Book> {
    let json =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(parse_book_document(&json)?)
}

/// Write a book to a JSON backup file
pub async fn export(data_dir: &Path, id: &str, output: Option<PathBuf>) -> Result<()> {
    let workspace = Workspace::open(data_dir).await?;
    let json = workspace.library.export_book(id)?;
    let title = &workspace.library.book(id)?.title;

    let output = output.unwrap_or_else(|| PathBuf::from(export_file_name(title)));
    tokio::fs::write(&output, json)
        .await
        .with_context(|| format!("Failed to create output file: {}", output.display()))?;

    println!("Exported '{}' -> {}", title, output.display());
    Ok(())
}
