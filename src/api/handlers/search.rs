/// Knowledge search handler
use axum::extract::State;
use axum::Json;
use tracing::info;

use super::AppState;
use crate::api::error::ApiResult;
use crate::api::types::*;

/// Ranked documents without an answer (POST /api/search)
pub async fn search_documents(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> ApiResult<SearchResponse> {
    info!("POST /api/search: {}", req.query);

    let role = state.assistant.resolve_role(req.role.as_deref());
    let outcome = state.assistant.search(role, &req.query)?;

    Ok(Json(ApiResponse::success(SearchResponse {
        matched_keywords: outcome.matched_keywords,
        results: outcome.results,
    })))
}
