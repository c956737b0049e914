//! CLI command handlers module
//!
//! This module is organized by functional domains:
//! - ask: Question answering through the staged pipeline
//! - search: Ranked knowledge search
//! - docs: Corpus browsing
//! - serve: API server
//! - info: Information display (config)

pub mod ask;
pub mod docs;
pub mod info;
pub mod search;
pub mod serve;

// Re-export all public handlers
pub use ask::*;
pub use docs::*;
pub use info::*;
pub use search::*;
pub use serve::*;
