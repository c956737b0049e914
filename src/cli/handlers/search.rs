//! Knowledge search handler

use crate::assistant::Assistant;
use crate::cli::output::*;
use crate::AppConfig;
use crate::Result;

pub async fn handle_search(config: &AppConfig, query: &str, role: Option<&str>) -> Result<()> {
    let assistant = Assistant::from_config(config)?;
    let role = assistant.resolve_role(role);

    let outcome = assistant.search(role, query)?;
    print_search_results(query, &outcome);
    Ok(())
}
