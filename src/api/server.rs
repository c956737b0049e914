//! HTTP server implementation

use std::time::Duration;

use tracing::info;

use crate::api::handlers::AppState;
use crate::api::routes;
use crate::assistant::Assistant;
use crate::config::AppConfig;
use crate::Result;

/// Interval between sweeps for idle sessions
const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Start the API server
pub async fn serve_api(config: &AppConfig, host: String, port: u16, enable_cors: bool) -> Result<()> {
    info!("🚀 Starting AskDesk API server...");

    let assistant = Assistant::from_config(config)?;
    let state = AppState::new(assistant, config.clone());
    let _cleanup = state
        .session_manager
        .start_cleanup_task(SESSION_SWEEP_INTERVAL);

    if enable_cors {
        info!("✅ CORS enabled");
    }
    let app = routes::app(state, enable_cors);

    // Start server
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("🌐 API server listening on http://{}", addr);
    info!("📋 RESTful API available at http://{}/api", addr);
    info!("");
    info!("Available endpoints:");
    info!("  GET    /api/health              - Health check");
    info!("  GET    /api/documents           - List documents");
    info!("  GET    /api/documents/:id       - Get document by id");
    info!("  POST   /api/search              - Ranked knowledge search");
    info!("  POST   /api/ask                 - Ask a question");
    info!("  GET    /api/ask/stream?question= - Ask with streamed stage events");
    info!("  POST   /api/sessions            - Open a conversation");
    info!("  GET    /api/sessions/:id        - Conversation history");
    info!("  DELETE /api/sessions/:id        - Close a conversation");
    info!("  POST   /api/sessions/:id/ask    - Ask within a conversation");

    axum::serve(listener, app).await?;

    Ok(())
}
