//! CLI output formatting utilities
//!
//! This module provides consistent output formatting for the `AskDesk` CLI

use crate::models::{AnswerTurn, Document, PipelineRun, PipelineStatus, SearchOutcome};
use crate::AppConfig;

/// Safely truncate a string at character boundary (not byte boundary)
///
/// This prevents panics when truncating strings with multi-byte UTF-8 characters (CJK, emojis, etc.)
///
/// # Arguments
/// * `s` - The string to truncate
/// * `max_chars` - Maximum number of characters (not bytes)
///
/// # Returns
/// Truncated string with "..." suffix if truncated, otherwise the original string
#[must_use]
pub fn truncate_str(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let truncated: String = s.chars().take(max_chars).collect();
        format!("{truncated}...")
    } else {
        s.to_string()
    }
}

fn stage_icon(status: PipelineStatus) -> &'static str {
    match status {
        PipelineStatus::Idle => "⏸️ ",
        PipelineStatus::Analyzing => "🧠",
        PipelineStatus::Searching => "🔍",
        PipelineStatus::Matching => "📄",
        PipelineStatus::Generating => "✍️ ",
        PipelineStatus::Completed => "✅",
    }
}

/// Print one stage transition
pub fn print_stage(run: &PipelineRun, details: bool) {
    println!(
        "{} [{}/{}] {}",
        stage_icon(run.status),
        run.current_step,
        run.total_steps,
        run.status
    );

    if details && run.status == PipelineStatus::Matching {
        println!("     Keywords: {}", format_keywords(&run.matched_keywords));
        println!(
            "     Matched {} of {} documents",
            run.documents_matched, run.documents_scanned
        );
        for result in &run.top_results {
            println!("       - {} ({}%)", result.title, result.relevance_score);
        }
    }
}

/// Print a composed answer with sources and follow-ups
pub fn print_answer(answer: &AnswerTurn) {
    println!();
    println!("{}", answer.content);
    println!();

    if !answer.sources.is_empty() {
        println!("📚 Sources:");
        for (i, source) in answer.sources.iter().enumerate() {
            println!(
                "  {}. {} [{}] updated {}",
                i + 1,
                source.title,
                source.category,
                source.last_updated
            );
        }
        println!();
    }

    if !answer.related_questions.is_empty() {
        println!("💡 Related questions:");
        for question in &answer.related_questions {
            println!("  • {question}");
        }
        println!();
    }

    println!("🎯 Confidence: {}%", answer.confidence);
    if let Some(process) = &answer.process {
        println!(
            "⏱️  Processed in {}ms ({} documents scanned)",
            process.elapsed_ms, process.documents_scanned
        );
    }
}

/// Print ranked search results
pub fn print_search_results(query: &str, outcome: &SearchOutcome) {
    println!("🔍 Searching for: \"{query}\"");
    println!("   Keywords: {}", format_keywords(&outcome.matched_keywords));
    println!();

    if outcome.is_empty() {
        print_warning("No matching documents");
        return;
    }

    println!("Found {} documents:", outcome.results.len());
    for (i, result) in outcome.results.iter().enumerate() {
        println!(
            "  {}. [{}] {} ({}) - {}%",
            i + 1,
            result.document_id,
            result.title,
            result.category,
            result.relevance_score
        );
        if !result.snippet.is_empty() {
            println!("     {}", truncate_str(&result.snippet, 80));
        }
    }
}

/// Print document list
pub fn print_document_list(documents: &[Document]) {
    println!("Found {} documents:", documents.len());
    for document in documents {
        println!(
            "  - {} | {} | {} | updated {}",
            document.id, document.category, document.title, document.last_updated
        );
    }
}

/// Print a full document
pub fn print_document(document: &Document) {
    println!("📄 {} ({})", document.title, document.id);
    println!("   Category: {}", document.category);
    println!("   Updated: {}", document.last_updated);
    println!("   Keywords: {}", document.keywords.join(", "));
    println!();
    println!("{}", document.content);
}

/// Print configuration
pub fn print_config(config: &AppConfig) {
    println!("📋 AskDesk Configuration:");
    println!();

    println!("📝 Logging:");
    println!("  Level: {}", config.logging.level);
    println!("  Backtrace: {}", config.logging.backtrace);
    println!();

    println!("🔍 Retrieval:");
    println!("  Top K: {}", config.top_k());
    println!("  Max sources: {}", config.max_sources());
    println!();

    let pacing = config.stage_pacing();
    println!("⏱️  Stage pacing (ms):");
    println!(
        "  analyzing={} searching={} matching={} generating={} completed={}",
        pacing.analyzing, pacing.searching, pacing.matching, pacing.generating, pacing.completed
    );
    println!();

    println!("📚 Corpus:");
    match &config.corpus.path {
        Some(path) => println!("  Path: {}", path.display()),
        None => println!("  Built-in sample corpus"),
    }
    println!();

    println!("🔐 Permissions:");
    println!("  Default role: {}", config.default_role());
    let mut roles: Vec<_> = config.permissions.roles.iter().collect();
    roles.sort_by(|a, b| a.0.cmp(b.0));
    for (role, features) in roles {
        println!("  {role}: {}", features.join(", "));
    }
    println!();

    println!("🌐 Server:");
    println!("  Address: {}", config.server_addr());
    println!("  CORS: {}", config.server.cors);
    println!();

    println!("💬 Sessions:");
    println!("  Timeout: {}s", config.sessions.timeout_secs);
    println!("  Max history: {}", config.sessions.max_history);
}

fn format_keywords(keywords: &[String]) -> String {
    if keywords.is_empty() {
        "(none)".to_string()
    } else {
        keywords.join(", ")
    }
}

/// Print colored output functions
pub fn print_info(msg: &str) {
    println!("ℹ️  {msg}");
}

pub fn print_success(msg: &str) {
    println!("✅ {msg}");
}

pub fn print_warning(msg: &str) {
    println!("⚠️  {msg}");
}

pub fn print_error(msg: &str) {
    eprintln!("❌ {msg}");
}
