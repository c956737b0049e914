//! CLI command definitions and argument parsing

use clap::Parser;
use clap::Subcommand;

#[derive(Parser)]
#[command(name = "askdesk")]
#[command(about = "AskDesk CLI: ask questions against the internal knowledge base")]
#[command(version)]
pub struct Cli {
    /// Enable verbose debug logging (default: info level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a TOML config file (default: config.toml, then config.example.toml)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ask a question and watch the answer pipeline run
    Ask {
        /// The question to ask
        question: String,
        /// Role to ask as (default: permissions.default_role)
        #[arg(short, long)]
        role: Option<String>,
        /// Print the per-stage snapshot details
        #[arg(long)]
        details: bool,
        /// Pace stages like the interactive assistant
        #[arg(long)]
        animate: bool,
    },
    /// Ranked knowledge search without composing an answer
    Search {
        /// Search text
        query: String,
        /// Role to search as (default: permissions.default_role)
        #[arg(short, long)]
        role: Option<String>,
    },
    /// Browse the document corpus
    #[command(subcommand)]
    Docs(DocsCommands),
    /// Start the HTTP API server
    Serve {
        /// Host to bind (default: server.host)
        #[arg(long)]
        host: Option<String>,
        /// Port to bind (default: server.port)
        #[arg(short, long)]
        port: Option<u16>,
        /// Enable permissive CORS
        #[arg(long)]
        cors: bool,
    },
    /// Show the effective configuration
    Config,
}

#[derive(Subcommand)]
pub enum DocsCommands {
    /// List all documents
    List,
    /// Show one document in full
    Show {
        /// Document id, e.g. doc-002
        id: String,
    },
}
