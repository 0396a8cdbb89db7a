//! Server-Sent Events handler for real-time updates

use crate::state::{AppState, ServerEvent};
use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::Stream;
use serde_json::json;
use std::convert::Infallible;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

impl ServerEvent {
    /// SSE event name and JSON payload
    pub fn to_sse(&self) -> (&'static str, String) {
        let (name, data) = match self {
            Self::BookCreated { id, title } => ("book_created", json!({ "id": id, "title": title })),
            Self::BookImported { id, title } => {
                ("book_imported", json!({ "id": id, "title": title }))
            }
            Self::BookUpdated { id } => ("book_updated", json!({ "id": id })),
            Self::BookDeleted { id } => ("book_deleted", json!({ "id": id })),
            Self::Error { message } => ("error", json!({ "message": message })),
        };
        (name, data.to_string())
    }
}

/// SSE endpoint for library changes
pub async fn sync_events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let stream = BroadcastStream::new(state.subscribe()).filter_map(|result| match result {
        Ok(event) => {
            let (name, data) = event.to_sse();
            Some(Ok(Event::default().event(name).data(data)))
        }
        Err(e) => {
            tracing::debug!("SSE subscriber lagged: {}", e);
            None
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
