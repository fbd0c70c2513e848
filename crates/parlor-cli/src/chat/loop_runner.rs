//! Main chat loop orchestration.
//!
//! Drives the read-stream-print cycle: async readline input, the exit
//! sentinel, cancellation at the top of each turn, and one streaming
//! relay turn at a time. All transcript and fragment handling lives in
//! `parlor_core::relay::run_turn`; this module is terminal plumbing.

use console::style;
use rustyline_async::{Readline, ReadlineEvent};
use tokio_util::sync::CancellationToken;
use tracing::info;
use uuid::Uuid;

use parlor_core::relay::{Transcript, TurnOutcome, is_exit_sentinel, run_turn};

use crate::bootstrap::Session;

use super::banner::print_welcome;
use super::sink::TerminalSink;

/// Run the interactive relay loop until exit, EOF, or cancellation.
pub async fn run_chat_loop(session: Session, cancel: CancellationToken) -> anyhow::Result<()> {
    let session_id = Uuid::now_v7();
    print_welcome(&session, &session_id);
    info!(session = %session_id, model = %session.model, "chat session started");

    let prompt = format!("  {} ", style("You >").green().bold());
    let (mut readline, _writer) = Readline::new(prompt)
        .map_err(|e| anyhow::anyhow!("failed to initialize terminal input: {e}"))?;

    let mut transcript = Transcript::new();

    loop {
        // Cancellation observed at the top of the turn: stop gracefully,
        // do not send pending input.
        if cancel.is_cancelled() {
            println!("\n  {}", style("Cancellation requested. Exiting loop.").dim());
            break;
        }

        let line = match readline.readline().await {
            Ok(ReadlineEvent::Line(line)) => line.trim().to_string(),
            Ok(ReadlineEvent::Eof) => {
                println!("\n  {}", style("Session ended.").dim());
                break;
            }
            Ok(ReadlineEvent::Interrupted) => {
                cancel.cancel();
                println!("\n  {}", style("Cancellation requested. Exiting loop.").dim());
                break;
            }
            Err(e) => {
                eprintln!("\n  {} input error: {e}", style("!").red().bold());
                break;
            }
        };

        if line.is_empty() {
            continue;
        }

        // The sentinel terminates the whole process, not just the loop.
        if is_exit_sentinel(&line) {
            println!("  {}", style("Exit command received. Terminating.").dim());
            std::process::exit(0);
        }

        let _ = readline.add_history_entry(line.clone());

        let mut sink = TerminalSink::with_spinner();
        let outcome = run_turn(&session.engine, &mut transcript, &line, &cancel, &mut sink).await;

        match outcome {
            TurnOutcome::Completed => {}
            TurnOutcome::Truncated => {
                println!(
                    "  {}",
                    style("Response was cut short; the partial reply was kept.").dim()
                );
            }
            TurnOutcome::Cancelled => {
                println!("\n  {}", style("Cancellation requested. Exiting loop.").dim());
                break;
            }
        }
    }

    info!(
        session = %session_id,
        turns = transcript.len(),
        "chat session ended"
    );
    Ok(())
}
