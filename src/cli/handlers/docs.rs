//! Corpus browsing handlers

use crate::assistant::Assistant;
use crate::cli::output::*;
use crate::AppConfig;
use crate::Result;

pub async fn handle_docs_list(config: &AppConfig) -> Result<()> {
    let assistant = Assistant::from_config(config)?;
    print_document_list(assistant.documents());
    Ok(())
}

pub async fn handle_docs_show(config: &AppConfig, id: &str) -> Result<()> {
    let assistant = Assistant::from_config(config)?;
    let document = assistant.document(id)?;
    print_document(&document);
    Ok(())
}
