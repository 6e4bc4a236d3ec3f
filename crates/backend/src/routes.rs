use axum::{routing::get, Router};
use tower_http::services::{ServeDir, ServeFile};

use crate::handlers;
use crate::shared::config::get_dist_dir;
use crate::shared::state::AppState;

/// Application routes: health, D100 API, then the built frontend.
pub fn configure_routes(state: AppState) -> Router {
    let dist = get_dist_dir(&state.config);
    tracing::info!("Serving frontend from {}", dist.display());
    let frontend = ServeDir::new(&dist).not_found_service(ServeFile::new(dist.join("index.html")));

    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // D100 ROOM STATUS BOARD
        // ========================================
        .route(
            "/api/d100/source",
            get(handlers::d100_room_status::get_source),
        )
        .route(
            "/api/d100/board",
            get(handlers::d100_room_status::get_board),
        )
        .fallback_service(frontend)
        .with_state(state)
}
