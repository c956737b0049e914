//! HTTP API tests driven through the router without binding a socket

use askdesk::api::types::{
    ApiResponse, AskResponse, DocumentSummary, HealthResponse, SearchResponse, SessionAskResponse,
    SessionResponse,
};
use askdesk::api::{app, AppState};
use askdesk::models::{Document, PipelineStatus};
use askdesk::{AppConfig, Assistant};
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde::de::DeserializeOwned;
use serde_json::json;
use tower::ServiceExt;

fn router() -> Router {
    let config = AppConfig::default();
    let assistant = Assistant::from_config(&config).unwrap();
    app(AppState::new(assistant, config), false)
}

async fn send<T: DeserializeOwned>(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, ApiResponse<T>) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            request = request.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = router
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

// ====== Corpus Endpoints ======

#[tokio::test]
async fn test_health() {
    let (status, body) = send::<HealthResponse>(&router(), Method::GET, "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    let health = body.data.unwrap();
    assert_eq!(health.status, "healthy");
    assert_eq!(health.documents, 5);
    assert_eq!(health.top_k, 5);
    assert_eq!(health.default_role, "user");
}

#[tokio::test]
async fn test_list_and_get_documents() {
    let router = router();
    let (status, body) =
        send::<Vec<DocumentSummary>>(&router, Method::GET, "/api/documents", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.data.unwrap().len(), 5);

    let (status, body) =
        send::<Document>(&router, Method::GET, "/api/documents/doc-005", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.data.unwrap().category, "财务管理");
}

#[tokio::test]
async fn test_missing_document_is_404() {
    let (status, body) =
        send::<Document>(&router(), Method::GET, "/api/documents/doc-404", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(!body.success);
    assert!(body.error.unwrap().contains("doc-404"));
}

// ====== Search and Ask ======

#[tokio::test]
async fn test_search() {
    let (status, body) = send::<SearchResponse>(
        &router(),
        Method::POST,
        "/api/search",
        Some(json!({ "query": "电脑网络故障", "role": "guest" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let data = body.data.unwrap();
    assert_eq!(data.results[0].document_id, "doc-004");
    assert!(data.matched_keywords.contains(&"网络".to_string()));
}

#[tokio::test]
async fn test_ask_returns_answer_and_stage_trace() {
    let (status, body) = send::<AskResponse>(
        &router(),
        Method::POST,
        "/api/ask",
        Some(json!({ "question": "如何申请年假？" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let data = body.data.unwrap();
    let statuses: Vec<_> = data.stages.iter().map(|run| run.status).collect();
    assert_eq!(statuses, PipelineStatus::PUBLISHED.to_vec());
    assert_eq!(data.answer.sources[0].category, "人力资源");
    assert_eq!(data.answer.related_questions.len(), 3);
}

#[tokio::test]
async fn test_ask_denied_for_guest() {
    let (status, body) = send::<AskResponse>(
        &router(),
        Method::POST,
        "/api/ask",
        Some(json!({ "question": "如何申请年假", "role": "guest" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body.data.is_none());
}

#[tokio::test]
async fn test_ask_empty_question_is_400() {
    let (status, body) = send::<AskResponse>(
        &router(),
        Method::POST,
        "/api/ask",
        Some(json!({ "question": "   " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!body.success);
}

#[tokio::test]
async fn test_ask_stream_emits_stage_and_answer_events() {
    let response = router()
        .oneshot(
            Request::builder()
                .uri("/api/ask/stream?question=%E5%B9%B4%E5%81%87")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert_eq!(text.matches("event: stage").count(), 5);
    assert_eq!(text.matches("event: answer").count(), 1);
    assert!(text.find("event: answer") > text.rfind("event: stage"));
}

// ====== Sessions ======

#[tokio::test]
async fn test_session_lifecycle() {
    let router = router();
    let (status, body) = send::<SessionResponse>(
        &router,
        Method::POST,
        "/api/sessions",
        Some(json!({ "role": "user" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let session_id = body.data.unwrap().session_id;

    let (status, body) = send::<SessionAskResponse>(
        &router,
        Method::POST,
        &format!("/api/sessions/{session_id}/ask"),
        Some(json!({ "question": "报销需要什么发票" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let asked = body.data.unwrap();
    assert!(asked.completed);
    assert_eq!(asked.answer.unwrap().sources[0].category, "财务管理");

    let (_, body) = send::<SessionResponse>(
        &router,
        Method::GET,
        &format!("/api/sessions/{session_id}"),
        None,
    )
    .await;
    let session = body.data.unwrap();
    assert_eq!(session.message_count, 2);
    assert!(!session.busy);

    let (status, _) = send::<String>(
        &router,
        Method::DELETE,
        &format!("/api/sessions/{session_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send::<SessionResponse>(
        &router,
        Method::GET,
        &format!("/api/sessions/{session_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_guest_cannot_open_session() {
    let (status, _) = send::<SessionResponse>(
        &router(),
        Method::POST,
        "/api/sessions",
        Some(json!({ "role": "guest" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
