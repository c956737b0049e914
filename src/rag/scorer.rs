//! Bounded keyword relevance scoring

use serde::{Deserialize, Serialize};

use crate::models::Document;

/// Weights applied when scoring a document against matched query keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreWeights {
    /// Query keyword equals a document keyword
    pub exact: u32,
    /// One keyword contains the other but they differ
    pub partial: u32,
    /// Query keyword appears in the document body
    pub content: u32,
    /// Upper bound of the final score
    pub cap: u32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            exact: 20,
            partial: 10,
            content: 5,
            cap: 100,
        }
    }
}

/// Deterministic keyword scorer
#[derive(Debug, Clone, Copy, Default)]
pub struct RelevanceScorer {
    weights: ScoreWeights,
}

impl RelevanceScorer {
    #[must_use]
    pub const fn new(weights: ScoreWeights) -> Self {
        Self { weights }
    }

    #[must_use]
    pub const fn weights(&self) -> ScoreWeights {
        self.weights
    }

    /// Score `document` for the keywords extracted from a query, in `0..=cap`.
    ///
    /// Every (query keyword, document keyword) pair adds `exact` when equal or
    /// `partial` when one contains the other. Every query keyword found in the
    /// lowercased content adds `content`. The sum is clamped to `cap`.
    #[must_use]
    pub fn score(&self, matched_keywords: &[String], document: &Document) -> u32 {
        if matched_keywords.is_empty() {
            return 0;
        }

        let mut total: u32 = 0;

        for query_keyword in matched_keywords {
            for doc_keyword in &document.keywords {
                if query_keyword == doc_keyword {
                    total = total.saturating_add(self.weights.exact);
                } else if doc_keyword.contains(query_keyword.as_str())
                    || query_keyword.contains(doc_keyword.as_str())
                {
                    total = total.saturating_add(self.weights.partial);
                }
            }
        }

        let content = document.content.to_lowercase();
        for query_keyword in matched_keywords {
            if content.contains(query_keyword.as_str()) {
                total = total.saturating_add(self.weights.content);
            }
        }

        total.min(self.weights.cap)
    }
}
