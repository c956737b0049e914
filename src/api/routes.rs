//! API route definitions

use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::Any;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers::AppState;
use super::handlers::{
    self,
};

/// Create RESTful API router
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // Corpus browsing
        .route("/documents", get(handlers::list_documents))
        .route("/documents/:id", get(handlers::get_document))
        // Knowledge search
        .route("/search", post(handlers::search_documents))
        // Question answering
        .route("/ask", post(handlers::ask))
        .route("/ask/stream", get(handlers::ask_stream))
        // Conversation sessions
        .route("/sessions", post(handlers::create_session))
        .route(
            "/sessions/:id",
            get(handlers::get_session).delete(handlers::close_session),
        )
        .route("/sessions/:id/ask", post(handlers::session_ask))
        .with_state(state)
}

/// Full application router with `/api` prefix and middleware layers
pub fn app(state: AppState, enable_cors: bool) -> Router {
    let mut app = Router::new()
        .nest("/api", api_routes(state))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new());

    if enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    app
}
