use askdesk::cli::*;
use askdesk::AppConfig;
use askdesk::Result;
use clap::Parser;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::load()?,
    };

    // Initialize logging
    if cli.verbose {
        askdesk::logging::init_logging_with_level("debug")?;
    } else {
        askdesk::logging::init_logging_with_config(Some(&config))?;
    }
    info!("Configuration loaded successfully");

    // Execute the requested command
    match cli.command {
        Commands::Ask {
            question,
            role,
            details,
            animate,
        } => handle_ask(&config, &question, role.as_deref(), details, animate).await,
        Commands::Search { query, role } => handle_search(&config, &query, role.as_deref()).await,
        Commands::Docs(DocsCommands::List) => handle_docs_list(&config).await,
        Commands::Docs(DocsCommands::Show { id }) => handle_docs_show(&config, &id).await,
        Commands::Serve { host, port, cors } => handle_serve_api(&config, host, port, cors).await,
        Commands::Config => handle_config_command(&config).await,
    }
}
