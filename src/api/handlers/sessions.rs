/// Conversation session handlers
use axum::extract::Path;
use axum::extract::State;
use axum::Json;
use tracing::info;

use super::AppState;
use crate::api::error::ApiResult;
use crate::api::types::*;
use crate::errors::AskDeskError;
use crate::permissions::FEATURE_AI_ASSISTANT;
use crate::rag::RunOutcome;
use crate::session::ChatSession;

fn session_response(state: &AppState, session: ChatSession) -> SessionResponse {
    SessionResponse {
        session_id: session.session_id.clone(),
        role: session.role.clone(),
        message_count: session.conversation_history.len(),
        busy: state.session_manager.is_busy(&session.session_id),
        session,
    }
}

/// Open a session (POST /api/sessions)
pub async fn create_session(
    State(state): State<AppState>,
    body: Option<Json<CreateSessionRequest>>,
) -> ApiResult<SessionResponse> {
    let req = body.map(|Json(req)| req).unwrap_or_default();
    let role = state.assistant.resolve_role(req.role.as_deref()).to_string();
    info!("POST /api/sessions as '{}'", role);

    // Refuse up front rather than on the first question
    if !state.assistant.can_use_feature(&role, FEATURE_AI_ASSISTANT) {
        return Err(AskDeskError::FeatureUnavailable {
            role,
            feature: FEATURE_AI_ASSISTANT.to_string(),
        }
        .into());
    }

    let session = state.session_manager.create_session(&role);
    Ok(Json(ApiResponse::success(session_response(&state, session))))
}

/// Session with its history (GET /api/sessions/:id)
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> ApiResult<SessionResponse> {
    info!("GET /api/sessions/{}", session_id);

    let session = state
        .session_manager
        .get_session(&session_id)
        .ok_or_else(|| AskDeskError::SessionNotFound(session_id.clone()))?;
    Ok(Json(ApiResponse::success(session_response(&state, session))))
}

/// Close a session, cancelling any in-flight run (DELETE /api/sessions/:id)
pub async fn close_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> ApiResult<String> {
    info!("DELETE /api/sessions/{}", session_id);

    state.session_manager.close_session(&session_id)?;
    Ok(Json(ApiResponse::success(session_id)))
}

/// Ask within a session (POST /api/sessions/:id/ask)
pub async fn session_ask(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(req): Json<SessionAskRequest>,
) -> ApiResult<SessionAskResponse> {
    info!("POST /api/sessions/{}/ask: {}", session_id, req.question);

    let outcome = state
        .session_manager
        .ask(&state.assistant, &session_id, &req.question)
        .await?;

    let (completed, answer) = match outcome {
        RunOutcome::Completed(answer) => (true, Some(answer)),
        RunOutcome::Cancelled => (false, None),
    };
    Ok(Json(ApiResponse::success(SessionAskResponse {
        session_id,
        completed,
        answer,
    })))
}
