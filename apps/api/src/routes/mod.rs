pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::extraction::handlers::handle_extract_rfp;
use crate::factbooks::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/extract-rfp",
            // Size is enforced while streaming the file part.
            post(handle_extract_rfp).layer(DefaultBodyLimit::disable()),
        )
        .route(
            "/api/factbooks",
            post(handlers::handle_create_factbook).get(handlers::handle_list_factbooks),
        )
        .route(
            "/api/factbooks/:id",
            get(handlers::handle_get_factbook).delete(handlers::handle_delete_factbook),
        )
        .with_state(state)
}
