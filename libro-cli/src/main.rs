//! Libro CLI - write and read markdown books from the terminal

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use libro_core::{CoverColor, Format};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "libro")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Directory holding the library (defaults to the platform data directory)
    #[arg(long, global = true, env = "LIBRO_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the books in the library
    List {
        /// Only show books whose title, subtitle or author match
        #[arg(short, long)]
        search: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Bind a new book
    New {
        /// Book title
        title: String,

        /// Cover color (brown, red, blue, green, black)
        #[arg(short, long, default_value = "brown")]
        color: CoverColor,
    },

    /// Delete a book permanently
    Delete {
        /// Book id
        id: String,

        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },

    /// Import books from exported JSON files
    Import {
        /// Files to import
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Export a book as a JSON backup
    Export {
        /// Book id
        id: String,

        /// Output file path (defaults to a name derived from the title)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Display information about a book
    Info {
        /// Book id
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Read a book: its cover or the spread holding a page
    Read {
        /// Book id
        id: String,

        /// Page number to open at; the cover is shown when omitted
        #[arg(short, long)]
        page: Option<u32>,

        /// Render a standalone HTML document instead of text
        #[arg(long)]
        html: bool,

        /// Write the output to a file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Edit the cover of a book
    Meta {
        /// Book id
        id: String,

        #[arg(long)]
        title: Option<String>,

        /// New subtitle; an empty value removes it
        #[arg(long)]
        subtitle: Option<String>,

        #[arg(long)]
        author: Option<String>,
    },

    /// Add, delete, edit or format pages
    Page {
        #[command(subcommand)]
        command: PageCommands,
    },
}

#[derive(Subcommand)]
enum PageCommands {
    /// Append a blank page
    Add {
        /// Book id
        id: String,
    },

    /// Delete the last page (a book keeps at least one)
    Delete {
        /// Book id
        id: String,

        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },

    /// Change the title or content of a page
    Edit {
        /// Book id
        id: String,

        /// Page number
        number: u32,

        #[arg(long)]
        title: Option<String>,

        /// New markdown content
        #[arg(long, conflicts_with = "file")]
        content: Option<String>,

        /// Read the new markdown content from a file
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Wrap part of a page in markdown formatting
    Format {
        /// Book id
        id: String,

        /// Page number
        number: u32,

        /// Formatting to apply (bold, italic, h1, h2, list)
        format: Format,

        /// Selection start (byte offset)
        #[arg(long, default_value = "0")]
        start: usize,

        /// Selection end (byte offset, defaults to the start)
        #[arg(long)]
        end: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        "libro_cli=debug,libro_core=debug"
    } else {
        "libro_cli=info,libro_core=warn"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let data_dir = commands::resolve_data_dir(cli.data_dir);
    tracing::debug!("Using library at {}", data_dir.display());

    match cli.command {
        Commands::List { search, json } => commands::list(&data_dir, search.as_deref(), json).await,

        Commands::New { title, color } => commands::new_book(&data_dir, &title, color).await,

        Commands::Delete { id, yes } => commands::delete(&data_dir, &id, yes).await,

        Commands::Import { files } => commands::import(&data_dir, &files).await,

        Commands::Export { id, output } => commands::export(&data_dir, &id, output).await,

        Commands::Info { id, json } => commands::info(&data_dir, &id, json).await,

        Commands::Read {
            id,
            page,
            html,
            output,
        } => commands::read(&data_dir, &id, page, html, output).await,

        Commands::Meta {
            id,
            title,
            subtitle,
            author,
        } => commands::meta(&data_dir, &id, title, subtitle, author).await,

        Commands::Page { command } => match command {
            PageCommands::Add { id } => commands::page_add(&data_dir, &id).await,
            PageCommands::Delete { id, yes } => commands::page_delete(&data_dir, &id, yes).await,
            PageCommands::Edit {
                id,
                number,
                title,
                content,
                file,
            } => commands::page_edit(&data_dir, &id, number, title, content, file).await,
            PageCommands::Format {
                id,
                number,
                format,
                start,
                end,
            } => {
                let end = end.unwrap_or(start);
                commands::page_format(&data_dir, &id, number, format, start..end).await
            }
        },
    }
}
