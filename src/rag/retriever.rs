//! Retrieval: keyword extraction, scoring and ranking over the document store

use std::sync::Arc;

use tracing::debug;

use crate::models::{Document, ScoredDocument, SearchOutcome};
use crate::rag::keywords::extract_keywords;
use crate::rag::scorer::RelevanceScorer;
use crate::store::DocumentStore;

/// Default number of ranked results kept per query
pub const DEFAULT_TOP_K: usize = 5;

/// Score every document and keep the best `k`.
///
/// Documents scoring zero are dropped. Ordering is by score, highest first;
/// ties keep corpus listing order (`sort_by` is a stable sort).
#[must_use]
pub fn rank(
    documents: &[Document],
    matched_keywords: &[String],
    scorer: &RelevanceScorer,
    k: usize,
) -> Vec<ScoredDocument> {
    let mut results: Vec<ScoredDocument> = documents
        .iter()
        .filter_map(|document| {
            let score = scorer.score(matched_keywords, document);
            (score > 0).then(|| ScoredDocument::from_document(document, score))
        })
        .collect();

    results.sort_by(|a, b| b.relevance_score.cmp(&a.relevance_score));
    results.truncate(k);
    results
}

/// Keyword retriever over a read-only store
#[derive(Clone)]
pub struct Retriever {
    store: Arc<dyn DocumentStore>,
    scorer: RelevanceScorer,
    top_k: usize,
}

impl Retriever {
    /// Create a new retriever
    pub fn new(store: Arc<dyn DocumentStore>, top_k: usize) -> Self {
        Self {
            store,
            scorer: RelevanceScorer::default(),
            top_k,
        }
    }

    #[must_use]
    pub fn with_scorer(mut self, scorer: RelevanceScorer) -> Self {
        self.scorer = scorer;
        self
    }

    /// Extract keywords, then rank the corpus against them
    pub fn search(&self, query: &str) -> SearchOutcome {
        let documents = self.store.list_documents();
        let matched_keywords = extract_keywords(query, documents);
        debug!(
            "Matched {} keywords for query: {:?}",
            matched_keywords.len(),
            matched_keywords
        );

        let results = rank(documents, &matched_keywords, &self.scorer, self.top_k);
        debug!("Ranked {} of {} documents", results.len(), documents.len());

        SearchOutcome {
            results,
            matched_keywords,
        }
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    #[must_use]
    pub const fn top_k(&self) -> usize {
        self.top_k
    }
}
