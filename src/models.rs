use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of visible stages a run walks through (analyzing..generating)
pub const TOTAL_STEPS: usize = 4;

/// An internal knowledge-base document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub title: String,
    pub category: String,
    pub last_updated: NaiveDate,
    pub keywords: Vec<String>,
    pub content: String,
    pub snippet: String,
}

/// A document scored against one query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredDocument {
    pub document_id: String,
    pub title: String,
    pub category: String,
    /// Bounded relevance, 0..=100
    pub relevance_score: u32,
    pub snippet: String,
}

impl ScoredDocument {
    #[must_use]
    pub fn from_document(document: &Document, relevance_score: u32) -> Self {
        Self {
            document_id: document.id.clone(),
            title: document.title.clone(),
            category: document.category.clone(),
            relevance_score,
            snippet: document.snippet.clone(),
        }
    }
}

/// Ranked results for one query together with the keywords that produced them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub results: Vec<ScoredDocument>,
    pub matched_keywords: Vec<String>,
}

impl SearchOutcome {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Highest relevance score, 0 when nothing matched
    #[must_use]
    pub fn top_score(&self) -> u32 {
        self.results.first().map_or(0, |r| r.relevance_score)
    }
}

/// A cited source attached to an answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub title: String,
    pub category: String,
    pub last_updated: NaiveDate,
}

impl From<&Document> for Source {
    fn from(document: &Document) -> Self {
        Self {
            title: document.title.clone(),
            category: document.category.clone(),
            last_updated: document.last_updated,
        }
    }
}

/// How an answer was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerOutcome {
    /// Content is the top-ranked document
    Answered,
    /// Nothing scored above zero; content is the fallback message
    NoMatch,
    /// A ranked result could not be resolved back to the store
    CorpusInconsistency,
}

/// The assistant's reply for one completed run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerTurn {
    pub content: String,
    pub sources: Vec<Source>,
    pub related_questions: Vec<String>,
    pub confidence: u32,
    pub outcome: AnswerOutcome,
    /// Final snapshot of the run that produced this answer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process: Option<PipelineRun>,
}

impl AnswerTurn {
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.outcome != AnswerOutcome::Answered
    }
}

/// Pipeline stages in strict order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineStatus {
    Idle,
    Analyzing,
    Searching,
    Matching,
    Generating,
    Completed,
}

impl PipelineStatus {
    /// Stages a run publishes, in order
    pub const PUBLISHED: [Self; 5] = [
        Self::Analyzing,
        Self::Searching,
        Self::Matching,
        Self::Generating,
        Self::Completed,
    ];

    /// 1-based step shown to the caller; `Completed` stays on the last step
    #[must_use]
    pub const fn step(self) -> usize {
        match self {
            Self::Idle => 0,
            Self::Analyzing => 1,
            Self::Searching => 2,
            Self::Matching => 3,
            Self::Generating | Self::Completed => TOTAL_STEPS,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Analyzing => "analyzing",
            Self::Searching => "searching",
            Self::Matching => "matching",
            Self::Generating => "generating",
            Self::Completed => "completed",
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl std::fmt::Display for PipelineStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Progress snapshot of one query moving through the stage machine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineRun {
    pub run_id: Uuid,
    pub query: String,
    pub status: PipelineStatus,
    pub current_step: usize,
    pub total_steps: usize,
    pub matched_keywords: Vec<String>,
    pub documents_scanned: usize,
    pub documents_matched: usize,
    pub top_results: Vec<ScoredDocument>,
    pub elapsed_ms: u64,
}

impl PipelineRun {
    /// A fresh run with zeroed counters
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            query: query.into(),
            status: PipelineStatus::Idle,
            current_step: 0,
            total_steps: TOTAL_STEPS,
            matched_keywords: Vec::new(),
            documents_scanned: 0,
            documents_matched: 0,
            top_results: Vec::new(),
            elapsed_ms: 0,
        }
    }

    /// Move to `next`. Returns false and leaves the run untouched if that would go backwards
    /// or leave the terminal state.
    pub fn advance(&mut self, next: PipelineStatus) -> bool {
        if next <= self.status || self.status.is_terminal() {
            return false;
        }
        self.status = next;
        self.current_step = next.step();
        true
    }

    /// Publish retrieval results into the run
    pub fn record_search(&mut self, outcome: &SearchOutcome, documents_scanned: usize) {
        self.matched_keywords = outcome.matched_keywords.clone();
        self.documents_scanned = documents_scanned;
        self.documents_matched = outcome.results.len();
        self.top_results = outcome.results.clone();
    }
}
