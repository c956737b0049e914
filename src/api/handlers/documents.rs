/// Document-related API handlers
use axum::extract::Path;
use axum::extract::State;
use axum::Json;
use tracing::info;

use super::AppState;
use crate::api::error::ApiResult;
use crate::api::types::*;
use crate::models::Document;

/// List documents (GET /api/documents)
pub async fn list_documents(State(state): State<AppState>) -> ApiResult<Vec<DocumentSummary>> {
    info!("GET /api/documents");

    let documents = state
        .assistant
        .documents()
        .iter()
        .map(DocumentSummary::from)
        .collect();
    Ok(Json(ApiResponse::success(documents)))
}

/// Get a document by id (GET /api/documents/:id)
pub async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Document> {
    info!("GET /api/documents/{}", id);

    let document = state.assistant.document(&id)?;
    Ok(Json(ApiResponse::success(document)))
}
