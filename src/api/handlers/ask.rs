/// Question-answering API handlers
use axum::extract::Query;
use axum::extract::State;
use axum::response::sse::Event;
use axum::response::sse::KeepAlive;
use axum::response::sse::Sse;
use axum::Json;
use futures::stream;
use futures::Stream;
use tracing::info;

use super::AppState;
use crate::api::error::ApiError;
use crate::api::error::ApiResult;
use crate::api::types::*;
use crate::errors::AskDeskError;
use crate::rag::PipelineEvent;

/// Ask a question and wait for the answer (POST /api/ask)
pub async fn ask(State(state): State<AppState>, Json(req): Json<AskRequest>) -> ApiResult<AskResponse> {
    info!("POST /api/ask: {}", req.question);

    let role = state.assistant.resolve_role(req.role.as_deref());
    let mut handle = state.assistant.submit_query(role, &req.question)?;

    let mut stages = Vec::new();
    while let Some(event) = handle.next_event().await {
        match event {
            PipelineEvent::Stage(run) => stages.push(run),
            PipelineEvent::Completed(answer) => {
                return Ok(Json(ApiResponse::success(AskResponse { answer, stages })));
            }
            PipelineEvent::Cancelled => break,
        }
    }

    Err(AskDeskError::Custom("Run cancelled".to_string()).into())
}

/// Ask a question and stream stage progress as server-sent events (GET /api/ask/stream)
///
/// Emits one `stage` event per stage carrying the run snapshot, then one
/// `answer` event. Disconnecting cancels the run.
pub async fn ask_stream(
    State(state): State<AppState>,
    Query(query): Query<AskStreamQuery>,
) -> Result<Sse<impl Stream<Item = Result<Event, axum::Error>>>, ApiError> {
    info!("GET /api/ask/stream: {}", query.question);

    let role = state.assistant.resolve_role(query.role.as_deref());
    let handle = state.assistant.submit_query(role, &query.question)?;

    let events = stream::unfold(handle, |mut handle| async move {
        let event = handle.next_event().await?;
        Some((to_sse(&event), handle))
    });

    Ok(Sse::new(events).keep_alive(KeepAlive::default()))
}

fn to_sse(event: &PipelineEvent) -> Result<Event, axum::Error> {
    match event {
        PipelineEvent::Stage(run) => Event::default().event("stage").json_data(run),
        PipelineEvent::Completed(answer) => Event::default().event("answer").json_data(answer),
        PipelineEvent::Cancelled => Ok(Event::default().event("cancelled").data("cancelled")),
    }
}
