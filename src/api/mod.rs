mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::store::DocumentStore;

pub fn create_router(store: DocumentStore) -> Router {
    let api = Router::new()
        // Documents
        .route("/documents", get(handlers::list_documents))
        .route("/documents/read", post(handlers::read_documents))
        .route("/documents/append", post(handlers::append))
        .route("/documents/append-many", post(handlers::append_many))
        // Health
        .route("/health", get(handlers::health));

    Router::new()
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(store)
}
