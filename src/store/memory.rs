use std::collections::HashMap;
use std::collections::HashSet;
use std::path::Path;

use tracing::debug;

use crate::errors::AskDeskError;
use crate::models::Document;
use crate::store::DocumentStore;
use crate::Result;

/// Immutable in-memory corpus.
///
/// Keeps documents in the order they were supplied; that order is the
/// tie-break order used when ranking.
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    documents: Vec<Document>,
    index: HashMap<String, usize>,
}

impl InMemoryStore {
    /// Build a store, validating that ids are unique and every document has keywords.
    ///
    /// Keywords are lowercased and de-duplicated per document, keeping first occurrence.
    pub fn new(documents: Vec<Document>) -> Result<Self> {
        let mut index = HashMap::with_capacity(documents.len());
        let mut normalized = Vec::with_capacity(documents.len());

        for (position, mut document) in documents.into_iter().enumerate() {
            if index.contains_key(&document.id) {
                return Err(AskDeskError::DuplicateDocument(document.id));
            }

            document.keywords = normalize_keywords(&document.keywords);
            if document.keywords.is_empty() {
                return Err(AskDeskError::EmptyKeywords(document.id));
            }

            index.insert(document.id.clone(), position);
            normalized.push(document);
        }

        debug!("Loaded {} documents into memory store", normalized.len());

        Ok(Self {
            documents: normalized,
            index,
        })
    }

    /// Load a JSON array of documents from disk
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let documents: Vec<Document> = serde_json::from_str(&content)?;
        Self::new(documents)
    }
}

impl DocumentStore for InMemoryStore {
    fn list_documents(&self) -> &[Document] {
        &self.documents
    }

    fn get_document(&self, id: &str) -> Option<&Document> {
        self.index.get(id).map(|&position| &self.documents[position])
    }
}

fn normalize_keywords(keywords: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    keywords
        .iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .filter(|k| seen.insert(k.clone()))
        .collect()
}
