//! Page editing and rendering handlers

use crate::state::{reject, ApiError, AppState, ServerEvent};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    Json,
};
use libro_core::{HtmlRenderer, LibraryError, Page, PageDraft, RenderedSpread, Session, Side};
use serde::{Deserialize, Serialize};

/// A page that was added or removed, with the spread that should be shown next
#[derive(Debug, Serialize)]
pub struct PageChange {
    pub page: Page,
    pub pages: usize,
    pub spread_index: usize,
}

/// Append a blank page
pub async fn add_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<PageChange>), ApiError> {
    let change = state
        .mutate(|library| {
            let book = library.book_mut(&id).map_err(reject)?;
            let number = book.add_page();

            let mut session = Session::new();
            session.after_page_added(number);
            Ok(PageChange {
                page: book.pages[number as usize - 1].clone(),
                pages: book.page_count(),
                spread_index: session.spread_index(),
            })
        })
        .await?;

    state.broadcast(ServerEvent::BookUpdated { id });
    Ok((StatusCode::CREATED, Json(change)))
}

/// Remove the final page; a book keeps at least one
pub async fn delete_last_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PageChange>, ApiError> {
    let change = state
        .mutate(|library| {
            let book = library.book_mut(&id).map_err(reject)?;
            let removed = book.remove_last_page().map_err(reject)?;
            let remaining = book.page_count();

            // Viewing the spread the removed page was on; its index is `remaining`
            let mut session = Session::new();
            session.go_to_page(remaining);
            session.after_page_removed(remaining);
            Ok(PageChange {
                page: removed,
                pages: remaining,
                spread_index: session.spread_index(),
            })
        })
        .await?;

    state.broadcast(ServerEvent::BookUpdated { id });
    Ok(Json(change))
}

/// New title and body of a page
#[derive(Debug, Deserialize)]
pub struct UpdatePageRequest {
    pub title: String,
    pub content: String,
}

/// Save an edited page
pub async fn update_page(
    State(state): State<AppState>,
    Path((id, page_id)): Path<(String, String)>,
    Json(request): Json<UpdatePageRequest>,
) -> Result<Json<Page>, ApiError> {
    let page = state
        .mutate(|library| {
            let book = library.book_mut(&id).map_err(reject)?;
            let current = book
                .page(&page_id)
                .ok_or_else(|| reject(LibraryError::PageNotFound(page_id.clone())))?;
            let mut draft = PageDraft::from_page(current);
            draft.title = request.title;
            draft.content = request.content;
            let page = draft.commit(current);
            book.replace_page(page.clone()).map_err(reject)?;
            Ok(page)
        })
        .await?;

    state.broadcast(ServerEvent::BookUpdated { id });
    Ok(Json(page))
}

/// Render the spread starting at (or containing) page `index`
pub async fn get_spread(
    State(state): State<AppState>,
    Path((id, index)): Path<(String, usize)>,
) -> Result<Json<RenderedSpread>, ApiError> {
    let library = state.library.read().await;
    let book = library.book(&id).map_err(reject)?;

    let mut session = Session::new();
    session.open(book.id.clone());
    session.go_to_page(index);
    if session.spread_index() > book.page_count() {
        return Err((
            StatusCode::NOT_FOUND,
            format!("Spread {} is out of range", index),
        ));
    }

    Ok(Json(HtmlRenderer::new().spread(book, &session)))
}

/// Render a single page
pub async fn page_html(
    State(state): State<AppState>,
    Path((id, page_id)): Path<(String, String)>,
) -> Result<Html<String>, ApiError> {
    let library = state.library.read().await;
    let book = library.book(&id).map_err(reject)?;
    let page = book
        .page(&page_id)
        .ok_or_else(|| reject(LibraryError::PageNotFound(page_id.clone())))?;

    let side = if page.page_number % 2 == 0 {
        Side::Right
    } else {
        Side::Left
    };
    Ok(Html(HtmlRenderer::new().page(Some(page), side)))
}

/// Render the cover of a book
pub async fn cover_html(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, ApiError> {
    let library = state.library.read().await;
    let book = library.book(&id).map_err(reject)?;
    Ok(Html(HtmlRenderer::new().cover(book)))
}
