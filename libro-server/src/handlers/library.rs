//! Library management handlers

use crate::state::{reject, ApiError, AppState, ServerEvent};
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use libro_core::library::parse_book_document;
use libro_core::{export_file_name, Book, CoverColor, MetaField};
use serde::{Deserialize, Serialize};

/// Query parameters for listing books
#[derive(Debug, Deserialize)]
pub struct ListBooksQuery {
    /// Page number (1-indexed, 0 treated as 1)
    #[serde(default = "default_page")]
    pub page: u32,

    /// Items per page
    #[serde(default = "default_per_page")]
    pub per_page: u32,

    /// Search query
    pub search: Option<String>,
}

fn default_page() -> u32 {
    1
}
fn default_per_page() -> u32 {
    20
}

/// Book summary for list response
#[derive(Debug, Serialize)]
pub struct BookSummary {
    pub id: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub author: String,
    pub color: CoverColor,
    pub pages: usize,
    pub created_at: i64,
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
            created_at: book.created_at,
        }
    }
}

/// List response with pagination
#[derive(Debug, Serialize)]
pub struct ListBooksResponse {
    pub books: Vec<BookSummary>,
    pub total: u32,
    pub page: u32,
    pub per_page: u32,
}

/// List books in shelf order
pub async fn list_books(
    State(state): State<AppState>,
    Query(query): Query<ListBooksQuery>,
) -> Json<ListBooksResponse> {
    let library = state.library.read().await;
    let books = library.search(query.search.as_deref().unwrap_or_default());
    let total = books.len() as u32;

    let page = query.page.max(1);
    let start = (page - 1) as usize * query.per_page as usize;
    let books = books
        .into_iter()
        .skip(start)
        .take(query.per_page as usize)
        .map(BookSummary::from)
        .collect();

    Json(ListBooksResponse {
        books,
        total,
        page,
        per_page: query.per_page,
    })
}

/// Body of a create request
#[derive(Debug, Deserialize)]
pub struct CreateBookRequest {
    pub title: String,
    #[serde(default)]
    pub color: CoverColor,
}

/// Bind a new book
pub async fn create_book(
    State(state): State<AppState>,
    Json(request): Json<CreateBookRequest>,
) -> Result<(StatusCode, Json<Book>), ApiError> {
    let book = state
        .mutate(|library| {
            let id = library
                .create_book(&request.title, request.color)
                .map_err(reject)?;
            library.book(&id).cloned().map_err(reject)
        })
        .await?;

    tracing::info!("Created '{}' ({})", book.title, book.id);
    state.broadcast(ServerEvent::BookCreated {
        id: book.id.clone(),
        title: book.title.clone(),
    });
    Ok((StatusCode::CREATED, Json(book)))
}

/// Get a whole book, pages included
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Book>, ApiError> {
    let library = state.library.read().await;
    let book = library.book(&id).map_err(reject)?;
    Ok(Json(book.clone()))
}

/// Cover fields to change; absent fields are left alone
#[derive(Debug, Default, Deserialize)]
pub struct UpdateBookRequest {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub author: Option<String>,
}

/// Edit the cover of a book
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateBookRequest>,
) -> Result<Json<Book>, ApiError> {
    let updates: Vec<(MetaField, String)> = [
        (MetaField::Title, request.title),
        (MetaField::Subtitle, request.subtitle),
        (MetaField::Author, request.author),
    ]
    .into_iter()
    .filter_map(|(field, value)| value.map(|v| (field, v)))
    .collect();

    let book = state
        .mutate(|library| {
            let book = library.book_mut(&id).map_err(reject)?;
            for (field, value) in updates {
                book.set_meta(field, value);
            }
            Ok(book.clone())
        })
        .await?;

    state.broadcast(ServerEvent::BookUpdated { id });
    Ok(Json(book))
}

/// Delete a book
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let removed = state
        .mutate(|library| library.delete_book(&id).map_err(reject))
        .await?;

    tracing::info!("Deleted '{}' ({})", removed.title, id);
    state.broadcast(ServerEvent::BookDeleted { id });
    Ok(StatusCode::NO_CONTENT)
}

/// Import response
#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub id: String,
    pub title: String,
    pub message: String,
}

/// Import a book from an uploaded JSON backup
pub async fn import_book(
    State(state): State<AppState>,
    mut multipart: axum_extra::extract::Multipart,
) -> Result<(StatusCode, Json<ImportResponse>), ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
        let json = std::str::from_utf8(&data)
            .map_err(|_| (StatusCode::BAD_REQUEST, "File is not UTF-8 text".to_string()))?;
        let book = parse_book_document(json).map_err(|e| {
            tracing::warn!("Rejected import: {}", e);
            (StatusCode::BAD_REQUEST, e.to_string())
        })?;

        let title = book.title.clone();
        let id = state.mutate(|library| Ok(library.add_book(book))).await?;

        state.broadcast(ServerEvent::BookImported {
            id: id.clone(),
            title: title.clone(),
        });
        return Ok((
            StatusCode::CREATED,
            Json(ImportResponse {
                id,
                title,
                message: "Book imported successfully".to_string(),
            }),
        ));
    }

    Err((StatusCode::BAD_REQUEST, "No file provided".to_string()))
}

/// Download a book as a JSON backup
pub async fn export_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let library = state.library.read().await;
    let book = library.book(&id).map_err(reject)?;
    let json = serde_json::to_string_pretty(book)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", export_file_name(&book.title)),
            ),
        ],
        json,
    )
        .into_response())
}
