//! Keyword extraction against the corpus vocabulary

use crate::models::Document;

/// Vocabulary keywords that occur as substrings of the lowercased query.
///
/// Keywords are collected in discovery order: first document first, and within
/// a document in its keyword order. Each keyword appears once.
#[must_use]
pub fn extract_keywords(query: &str, corpus: &[Document]) -> Vec<String> {
    let query = query.to_lowercase();
    let mut matched: Vec<String> = Vec::new();

    for document in corpus {
        for keyword in &document.keywords {
            if !keyword.is_empty() && query.contains(keyword.as_str()) && !matched.contains(keyword)
            {
                matched.push(keyword.clone());
            }
        }
    }

    matched
}
