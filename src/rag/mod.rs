//! Retrieval and answer pipeline
//!
//! This module turns a free-text question into a grounded answer:
//! - Keyword extraction against the corpus vocabulary
//! - Bounded relevance scoring and stable top-K ranking
//! - Answer composition with sources and follow-up questions
//! - A staged, cancellable pipeline that publishes progress per run
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use askdesk::config::AppConfig;
//! use askdesk::rag::RagPipeline;
//! use askdesk::store::{sample_corpus, InMemoryStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(InMemoryStore::new(sample_corpus())?);
//!     let pipeline = RagPipeline::new(store, &AppConfig::default());
//!
//!     let outcome = pipeline
//!         .submit("如何申请年假？")?
//!         .on_stage_change(|run| println!("{} ({}/{})", run.status, run.current_step, run.total_steps))
//!         .wait()
//!         .await;
//!
//!     if let Some(answer) = outcome.into_answer() {
//!         println!("Answer: {}", answer.content);
//!         println!("Sources: {}", answer.sources.len());
//!     }
//!     Ok(())
//! }
//! ```

pub mod composer;
pub mod keywords;
pub mod pipeline;
pub mod retriever;
pub mod scorer;

pub use composer::fallback_message;
pub use composer::FollowUpCatalog;
pub use composer::ResponseComposer;
pub use keywords::extract_keywords;
pub use pipeline::PipelineEvent;
pub use pipeline::PipelineRunHandle;
pub use pipeline::RagPipeline;
pub use pipeline::RunOutcome;
pub use retriever::rank;
pub use retriever::Retriever;
pub use scorer::RelevanceScorer;
pub use scorer::ScoreWeights;
