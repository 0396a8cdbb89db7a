//! Application state

use anyhow::{Context, Result};
use axum::http::StatusCode;
use libro_core::{Library, LibraryError, LibraryStore, SaveStatus};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, watch, RwLock};

/// How long `saved` is reported before the status drops back to `idle`
const SAVED_DISPLAY: Duration = Duration::from_secs(2);

/// Error returned by handlers
pub type ApiError = (StatusCode, String);

/// Origins allowed to call the API from a browser
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CorsOrigins {
    /// Local development front-ends
    #[default]
    Localhost,
    Any,
    List(Vec<String>),
}

impl CorsOrigins {
    /// Parse `*` or a comma separated list of origins
    pub fn parse(value: &str) -> Self {
        if value.trim() == "*" {
            return Self::Any;
        }
        Self::List(
            value
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }
}

/// Server configuration read from the environment
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub data_dir: PathBuf,
    pub addr: SocketAddr,
    pub cors: CorsOrigins,
}

impl ServerConfig {
    /// Read `LIBRO_DATA_DIR`, `LIBRO_ADDR` and `LIBRO_CORS_ORIGINS`
    pub fn from_env() -> Result<Self> {
        let data_dir = std::env::var("LIBRO_DATA_DIR").unwrap_or_else(|_| "./libro_data".into());
        let addr = match std::env::var("LIBRO_ADDR") {
            Ok(addr) => addr
                .parse()
                .with_context(|| format!("Invalid LIBRO_ADDR: {}", addr))?,
            Err(_) => SocketAddr::from(([127, 0, 0, 1], 3000)),
        };
        let cors = std::env::var("LIBRO_CORS_ORIGINS")
            .map(|v| CorsOrigins::parse(&v))
            .unwrap_or_default();

        Ok(Self {
            data_dir: PathBuf::from(data_dir),
            addr,
            cors,
        })
    }
}

/// Server-sent events
#[derive(Debug, Clone, PartialEq)]
pub enum ServerEvent {
    BookCreated { id: String, title: String },
    BookImported { id: String, title: String },
    BookUpdated { id: String },
    BookDeleted { id: String },
    Error { message: String },
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: LibraryStore,

    /// The library held in memory; every change is written back through `store`
    pub library: Arc<RwLock<Library>>,

    save_status: Arc<watch::Sender<SaveStatus>>,

    /// Channel for SSE events
    pub event_tx: broadcast::Sender<ServerEvent>,
}

impl AppState {
    pub fn new(store: LibraryStore, library: Library) -> Self {
        let (event_tx, _) = broadcast::channel(100);
        let (save_status, _) = watch::channel(SaveStatus::Idle);
        Self {
            store,
            library: Arc::new(RwLock::new(library)),
            save_status: Arc::new(save_status),
            event_tx,
        }
    }

    /// Open the library stored under the configured data directory
    pub async fn load(config: &ServerConfig) -> Result<Self> {
        tokio::fs::create_dir_all(&config.data_dir)
            .await
            .with_context(|| format!("Failed to create {}", config.data_dir.display()))?;

        let store = LibraryStore::local(&config.data_dir);
        let library = store.load().await.context("Failed to load the library")?;
        tracing::info!(
            "Loaded {} books from {}",
            library.len(),
            config.data_dir.display()
        );
        Ok(Self::new(store, library))
    }

    /// Apply a change to the library and persist it
    ///
    /// The write lock is held until the save finishes, so saves land in the
    /// order the changes were made. A failed save rolls the change back.
    pub async fn mutate<T>(
        &self,
        change: impl FnOnce(&mut Library) -> Result<T, ApiError>,
    ) -> Result<T, ApiError> {
        let mut library = self.library.write().await;
        let backup = library.clone();
        let out = change(&mut *library)?;

        self.save_status.send_replace(SaveStatus::Saving);
        if let Err(e) = self.store.save(&library).await {
            *library = backup;
            self.save_status.send_replace(SaveStatus::Error);
            tracing::error!("Failed to save library: {}", e);
            self.broadcast(ServerEvent::Error {
                message: format!("Failed to save library: {}", e),
            });
            return Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()));
        }

        self.save_status.send_replace(SaveStatus::Saved);
        let status = Arc::clone(&self.save_status);
        tokio::spawn(async move {
            tokio::time::sleep(SAVED_DISPLAY).await;
            status.send_if_modified(|s| {
                let reset = *s == SaveStatus::Saved;
                if reset {
                    *s = SaveStatus::Idle;
                }
                reset
            });
        });

        Ok(out)
    }

    /// Outcome of the most recent save
    pub fn save_status(&self) -> SaveStatus {
        *self.save_status.borrow()
    }

    /// Subscribe to server events
    pub fn subscribe(&self) -> broadcast::Receiver<ServerEvent> {
        self.event_tx.subscribe()
    }

    /// Broadcast an event
    pub fn broadcast(&self, event: ServerEvent) {
        // No subscribers is fine
        let _ = self.event_tx.send(event);
    }
}

/// Map a library error to an HTTP status
pub fn reject(error: LibraryError) -> ApiError {
    let status = match error {
        LibraryError::NotFound(_) | LibraryError::PageNotFound(_) => StatusCode::NOT_FOUND,
        LibraryError::LastPage => StatusCode::CONFLICT,
        LibraryError::EmptyTitle | LibraryError::PageOutOfRange(_) => StatusCode::BAD_REQUEST,
    };
    (status, error.to_string())
}
