//! Ask command handler

use crate::assistant::Assistant;
use crate::cli::output::*;
use crate::config::StagePacing;
use crate::rag::RunOutcome;
use crate::AppConfig;
use crate::Result;

pub async fn handle_ask(
    config: &AppConfig,
    question: &str,
    role: Option<&str>,
    details: bool,
    animate: bool,
) -> Result<()> {
    let mut config = config.clone();
    if animate {
        config.pipeline.stage_pacing_ms = StagePacing::animated();
    }

    let assistant = Assistant::from_config(&config)?;
    let role = assistant.resolve_role(role).to_string();

    print_info(&format!("🤖 Asking as '{role}': \"{question}\""));
    println!();

    let handle = assistant
        .submit_query(&role, question)?
        .on_stage_change(move |run| print_stage(run, details));

    // Ctrl-C abandons the run
    let canceller = handle.canceller();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            canceller.cancel();
        }
    });

    let outcome = handle.wait().await;
    interrupt.abort();

    match outcome {
        RunOutcome::Completed(answer) => {
            print_answer(&answer);
            if answer.is_fallback() {
                println!();
                print_warning("No confident answer; see the suggestions above");
            }
        }
        RunOutcome::Cancelled => print_warning("Cancelled"),
    }

    Ok(())
}
