//! API routes

use crate::handlers;
use crate::state::{AppState, CorsOrigins};
use axum::{
    http::HeaderValue,
    routing::{get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

const DEV_ORIGINS: [&str; 4] = [
    "http://localhost:3000",
    "http://localhost:5173",
    "http://127.0.0.1:3000",
    "http://127.0.0.1:5173",
];

fn cors_layer(origins: &CorsOrigins) -> CorsLayer {
    let allow_origin = match origins {
        CorsOrigins::Any => AllowOrigin::any(),
        CorsOrigins::List(list) => AllowOrigin::list(list.iter().filter_map(|origin| {
            let parsed = origin.parse::<HeaderValue>().ok();
            if parsed.is_none() {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
            }
            parsed
        })),
        CorsOrigins::Localhost => {
            AllowOrigin::list(DEV_ORIGINS.into_iter().map(HeaderValue::from_static))
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Create the application router
pub fn create_router(state: AppState, cors: &CorsOrigins) -> Router {
    let api_routes = Router::new()
        // Library endpoints
        .route(
            "/library",
            get(handlers::list_books).post(handlers::create_book),
        )
        .route("/library/import", post(handlers::import_book))
        .route(
            "/library/:id",
            get(handlers::get_book)
                .patch(handlers::update_book)
                .delete(handlers::delete_book),
        )
        .route("/library/:id/export", get(handlers::export_book))
        .route("/library/:id/cover", get(handlers::cover_html))
        // Page endpoints
        .route("/library/:id/pages", post(handlers::add_page))
        .route(
            "/library/:id/pages/last",
            axum::routing::delete(handlers::delete_last_page),
        )
        .route("/library/:id/pages/:page_id", put(handlers::update_page))
        .route("/library/:id/pages/:page_id/html", get(handlers::page_html))
        .route("/library/:id/spreads/:index", get(handlers::get_spread))
        // Save indicator and SSE endpoint
        .route("/status", get(handlers::save_status))
        .route("/sync", get(handlers::sync_events));

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(handlers::health_check))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(cors)),
        )
        .with_state(state)
}
