/// API request handlers
use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::api::types::ApiResponse;
use crate::api::types::HealthResponse;
use crate::assistant::Assistant;
use crate::config::AppConfig;
use crate::session::SessionManager;

// Re-export sub-modules
pub mod ask;
pub mod documents;
pub mod search;
pub mod sessions;

// Re-export handlers
pub use ask::*;
pub use documents::*;
pub use search::*;
pub use sessions::*;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub assistant: Assistant,
    pub session_manager: Arc<SessionManager>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(assistant: Assistant, config: AppConfig) -> Self {
        Self {
            assistant,
            session_manager: Arc::new(SessionManager::new(&config.sessions)),
            config: Arc::new(config),
        }
    }
}

/// Health check handler
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::success(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        documents: state.assistant.documents().len(),
        top_k: state.config.top_k(),
        default_role: state.config.default_role().to_string(),
    }))
}
