//! API request and response types

use serde::Deserialize;
use serde::Serialize;

use crate::models::{AnswerTurn, Document, PipelineRun, ScoredDocument};
use crate::session::ChatSession;

/// Standard API response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub documents: usize,
    pub top_k: usize,
    pub default_role: String,
}

/// Document listing entry; the full body is served by the detail endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub id: String,
    pub title: String,
    pub category: String,
    pub last_updated: chrono::NaiveDate,
    pub snippet: String,
}

impl From<&Document> for DocumentSummary {
    fn from(document: &Document) -> Self {
        Self {
            id: document.id.clone(),
            title: document.title.clone(),
            category: document.category.clone(),
            last_updated: document.last_updated,
            snippet: document.snippet.clone(),
        }
    }
}

/// Knowledge search request
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default)]
    pub role: Option<String>,
}

/// Knowledge search response
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub matched_keywords: Vec<String>,
    pub results: Vec<ScoredDocument>,
}

/// One-shot question
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
    #[serde(default)]
    pub role: Option<String>,
}

/// Answer with the stage snapshots published while producing it
#[derive(Debug, Serialize, Deserialize)]
pub struct AskResponse {
    pub answer: AnswerTurn,
    pub stages: Vec<PipelineRun>,
}

/// Query string of the streaming ask endpoint
#[derive(Debug, Deserialize)]
pub struct AskStreamQuery {
    pub question: String,
    #[serde(default)]
    pub role: Option<String>,
}

/// Create session request
#[derive(Debug, Default, Deserialize)]
pub struct CreateSessionRequest {
    #[serde(default)]
    pub role: Option<String>,
}

/// Question asked within a session
#[derive(Debug, Deserialize)]
pub struct SessionAskRequest {
    pub question: String,
}

/// Result of a question asked within a session
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionAskResponse {
    pub session_id: String,
    /// False when the run was superseded or the session closed mid-run
    pub completed: bool,
    pub answer: Option<AnswerTurn>,
}

/// Session state
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub session_id: String,
    pub role: String,
    pub message_count: usize,
    pub busy: bool,
    pub session: ChatSession,
}
