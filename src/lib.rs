//! AskDesk: an enterprise ask-a-question assistant.
//!
//! Questions are answered from an internal document corpus by keyword
//! retrieval. Each question runs through a staged, cancellable pipeline
//! (analyzing, searching, matching, generating, completed) whose progress is
//! published to the caller.

pub mod api;
pub mod assistant;
pub mod cli;
pub mod config;
pub mod errors;
pub mod logging;
pub mod models;
pub mod permissions;
pub mod rag;
pub mod session;
pub mod store;

#[cfg(test)]
mod errors_tests;

pub use assistant::Assistant;
pub use config::AppConfig;
pub use errors::*;
