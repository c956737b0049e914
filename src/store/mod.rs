//! Document storage
//!
//! The corpus is supplied once at startup and is read-only afterwards. Every
//! component that needs documents receives an `Arc<dyn DocumentStore>`, so
//! tests can swap in fixture corpora freely.
//!
//! # Usage
//!
//! ```rust
//! use askdesk::store::{sample_corpus, DocumentStore, InMemoryStore};
//!
//! let store = InMemoryStore::new(sample_corpus()).unwrap();
//! assert_eq!(store.len(), 5);
//! assert!(store.get_document("doc-002").is_some());
//! ```

use crate::models::Document;

/// Read-only access to the corpus
pub trait DocumentStore: Send + Sync {
    /// All documents in corpus listing order
    fn list_documents(&self) -> &[Document];

    /// Look up a document by id
    fn get_document(&self, id: &str) -> Option<&Document>;

    /// Number of documents in the corpus
    fn len(&self) -> usize {
        self.list_documents().len()
    }

    /// Check if the corpus is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

mod corpus;
mod memory;

pub use corpus::sample_corpus;
pub use memory::InMemoryStore;
