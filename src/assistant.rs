//! Permission-aware entry point used by the CLI, HTTP API and sessions

use std::sync::Arc;

use tracing::info;

use crate::config::AppConfig;
use crate::errors::AskDeskError;
use crate::errors::Result;
use crate::models::{AnswerTurn, Document, SearchOutcome};
use crate::permissions::{ensure_feature, PermissionPolicy, StaticPermissions};
use crate::permissions::{FEATURE_AI_ASSISTANT, FEATURE_KNOWLEDGE_SEARCH};
use crate::rag::{PipelineRunHandle, RagPipeline, RunOutcome};
use crate::store::{sample_corpus, DocumentStore, InMemoryStore};

/// Ask-a-question assistant over one corpus
#[derive(Clone)]
pub struct Assistant {
    store: Arc<dyn DocumentStore>,
    permissions: Arc<dyn PermissionPolicy>,
    pipeline: RagPipeline,
    default_role: String,
}

impl Assistant {
    /// Create an assistant from explicit parts
    pub fn new(
        store: Arc<dyn DocumentStore>,
        permissions: Arc<dyn PermissionPolicy>,
        config: &AppConfig,
    ) -> Self {
        let pipeline = RagPipeline::new(store.clone(), config);
        Self {
            store,
            permissions,
            pipeline,
            default_role: config.default_role().to_string(),
        }
    }

    /// Create an assistant from configuration.
    ///
    /// Loads the corpus from `corpus.path` when set, otherwise uses the built-in corpus.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let store = match &config.corpus.path {
            Some(path) => {
                info!("Loading corpus from {}", path.display());
                InMemoryStore::from_json_file(path)?
            }
            None => InMemoryStore::new(sample_corpus())?,
        };
        info!("Corpus ready: {} documents", store.len());

        let permissions = StaticPermissions::from_config(&config.permissions);
        Ok(Self::new(Arc::new(store), Arc::new(permissions), config))
    }

    /// Start an answer run for `text` on behalf of `role`
    ///
    /// # Errors
    /// - `FeatureUnavailable` when the role may not use the assistant
    /// - `EmptyQuery` when the text is blank
    pub fn submit_query(&self, role: &str, text: &str) -> Result<PipelineRunHandle> {
        ensure_feature(self.permissions.as_ref(), role, FEATURE_AI_ASSISTANT)?;
        self.pipeline.submit(text)
    }

    /// Ask and wait for the answer
    pub async fn ask(&self, role: &str, text: &str) -> Result<AnswerTurn> {
        match self.submit_query(role, text)?.wait().await {
            RunOutcome::Completed(answer) => Ok(answer),
            RunOutcome::Cancelled => Err(AskDeskError::Custom("Run cancelled".to_string())),
        }
    }

    /// Ranked documents for `text` without composing an answer
    pub fn search(&self, role: &str, text: &str) -> Result<SearchOutcome> {
        ensure_feature(self.permissions.as_ref(), role, FEATURE_KNOWLEDGE_SEARCH)?;
        if text.trim().is_empty() {
            return Err(AskDeskError::EmptyQuery);
        }
        Ok(self.pipeline.retriever().search(text))
    }

    /// Whether `role` may use `feature`
    pub fn can_use_feature(&self, role: &str, feature: &str) -> bool {
        self.permissions.can_use_feature(role, feature)
    }

    pub fn document(&self, id: &str) -> Result<Document> {
        self.store
            .get_document(id)
            .cloned()
            .ok_or_else(|| AskDeskError::DocumentNotFound(id.to_string()))
    }

    pub fn documents(&self) -> &[Document] {
        self.store.list_documents()
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    pub fn pipeline(&self) -> &RagPipeline {
        &self.pipeline
    }

    /// Role assumed when a caller does not name one
    pub fn default_role(&self) -> &str {
        &self.default_role
    }

    /// `role` if given and non-blank, otherwise the default role
    pub fn resolve_role<'a>(&'a self, role: Option<&'a str>) -> &'a str {
        role.map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or(&self.default_role)
    }
}
