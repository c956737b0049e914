//! Session management for multi-turn conversations

use std::sync::Arc;
use std::time::Duration;

use chrono::DateTime;
use chrono::Utc;
use dashmap::DashMap;
use serde::Deserialize;
use serde::Serialize;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use tracing::info;
use uuid::Uuid;

use crate::assistant::Assistant;
use crate::config::SessionsConfig;
use crate::errors::AskDeskError;
use crate::errors::Result;
use crate::models::AnswerTurn;
use crate::rag::RunOutcome;

/// Who wrote a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Assistant,
}

/// Chat message in conversation history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub speaker: Speaker,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    /// Present on assistant messages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<AnswerTurn>,
}

impl ChatMessage {
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            speaker: Speaker::User,
            content: content.into(),
            timestamp: Utc::now(),
            answer: None,
        }
    }

    #[must_use]
    pub fn assistant(answer: AnswerTurn) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            speaker: Speaker::Assistant,
            content: answer.content.clone(),
            timestamp: Utc::now(),
            answer: Some(answer),
        }
    }
}

/// Chat session data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    pub session_id: String,
    /// Role every question in this session is asked as
    pub role: String,
    pub conversation_history: Vec<ChatMessage>,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    pub max_history: usize,
}

impl ChatSession {
    #[must_use]
    pub fn new(role: impl Into<String>, max_history: usize) -> Self {
        let now = Utc::now();
        Self {
            session_id: Uuid::new_v4().to_string(),
            role: role.into(),
            conversation_history: Vec::new(),
            created_at: now,
            last_activity: now,
            max_history,
        }
    }

    pub fn add_message(&mut self, message: ChatMessage) {
        self.last_activity = message.timestamp;
        self.conversation_history.push(message);

        // Drop the oldest messages past the limit
        if self.conversation_history.len() > self.max_history {
            let excess = self.conversation_history.len() - self.max_history;
            self.conversation_history.drain(0..excess);
        }
    }

    #[must_use]
    pub fn is_expired(&self, timeout_secs: u64) -> bool {
        let idle = Utc::now().signed_duration_since(self.last_activity);
        idle.num_seconds() > i64::try_from(timeout_secs).unwrap_or(i64::MAX)
    }
}

struct InFlight {
    run_id: Uuid,
    cancel: CancellationToken,
}

/// Session manager with optional background cleanup.
///
/// At most one run is in flight per session: asking again cancels the
/// previous run, and closing the session cancels whatever is still running.
pub struct SessionManager {
    sessions: Arc<DashMap<String, ChatSession>>,
    in_flight: Arc<DashMap<String, InFlight>>,
    timeout_secs: u64,
    max_history: usize,
}

impl SessionManager {
    #[must_use]
    pub fn new(config: &SessionsConfig) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            in_flight: Arc::new(DashMap::new()),
            timeout_secs: config.timeout_secs,
            max_history: config.max_history,
        }
    }

    /// Periodically drop sessions idle for longer than the timeout
    pub fn start_cleanup_task(self: &Arc<Self>, interval: Duration) -> JoinHandle<()> {
        let manager = Arc::clone(self);
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(interval).await;
                manager.cleanup_expired();
            }
        })
    }

    pub fn create_session(&self, role: &str) -> ChatSession {
        let session = ChatSession::new(role, self.max_history);
        self.sessions
            .insert(session.session_id.clone(), session.clone());
        info!("Created session {} for role '{}'", session.session_id, role);
        session
    }

    #[must_use]
    pub fn get_session(&self, session_id: &str) -> Option<ChatSession> {
        self.sessions.get(session_id).map(|s| s.clone())
    }

    /// Remove a session, cancelling its in-flight run
    pub fn close_session(&self, session_id: &str) -> Result<()> {
        if let Some((_, run)) = self.in_flight.remove(session_id) {
            debug!("Cancelling run {} of closed session {}", run.run_id, session_id);
            run.cancel.cancel();
        }
        self.sessions
            .remove(session_id)
            .map(|_| ())
            .ok_or_else(|| AskDeskError::SessionNotFound(session_id.to_string()))
    }

    /// Ask `question` in a session and wait for the run to finish.
    ///
    /// The question is recorded immediately; the answer only if the run completes.
    pub async fn ask(
        &self,
        assistant: &Assistant,
        session_id: &str,
        question: &str,
    ) -> Result<RunOutcome> {
        let role = self
            .get_session(session_id)
            .ok_or_else(|| AskDeskError::SessionNotFound(session_id.to_string()))?
            .role;

        let handle = assistant.submit_query(&role, question)?;
        let run_id = handle.run_id();
        let previous = self.in_flight.insert(
            session_id.to_string(),
            InFlight {
                run_id,
                cancel: handle.canceller(),
            },
        );
        if let Some(previous) = previous {
            debug!("Run {} superseded by {}", previous.run_id, run_id);
            previous.cancel.cancel();
        }

        self.record(session_id, ChatMessage::user(question));

        let outcome = handle.wait().await;
        self.in_flight
            .remove_if(session_id, |_, entry| entry.run_id == run_id);

        if let RunOutcome::Completed(answer) = &outcome {
            self.record(session_id, ChatMessage::assistant(answer.clone()));
        }
        Ok(outcome)
    }

    fn record(&self, session_id: &str, message: ChatMessage) {
        if let Some(mut session) = self.sessions.get_mut(session_id) {
            session.add_message(message);
        }
    }

    /// Whether a run is currently in flight for the session
    #[must_use]
    pub fn is_busy(&self, session_id: &str) -> bool {
        self.in_flight.contains_key(session_id)
    }

    #[must_use]
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Drop expired sessions, returning how many were removed
    pub fn cleanup_expired(&self) -> usize {
        let expired: Vec<String> = self
            .sessions
            .iter()
            .filter(|entry| entry.value().is_expired(self.timeout_secs))
            .map(|entry| entry.key().clone())
            .collect();

        for session_id in &expired {
            if let Some((_, run)) = self.in_flight.remove(session_id) {
                run.cancel.cancel();
            }
            self.sessions.remove(session_id);
            info!("Cleaned up expired session: {}", session_id);
        }
        expired.len()
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new(&SessionsConfig::default())
    }
}
