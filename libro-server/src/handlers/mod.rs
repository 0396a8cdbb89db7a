//! Request handlers

mod library;
mod pages;
mod sync;

pub use library::*;
pub use pages::*;
pub use sync::*;

use crate::state::AppState;
use axum::{extract::State, Json};
use libro_core::SaveStatus;
use serde::Serialize;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Save indicator response
#[derive(Serialize)]
pub struct StatusResponse {
    pub status: SaveStatus,
    pub books: usize,
}

/// Report the outcome of the latest save
pub async fn save_status(State(state): State<AppState>) -> Json<StatusResponse> {
    let books = state.library.read().await.len();
    Json(StatusResponse {
        status: state.save_status(),
        books,
    })
}
