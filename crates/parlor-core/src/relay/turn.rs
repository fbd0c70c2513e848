//! The per-turn relay core.
//!
//! `run_turn` owns everything between "the user submitted a line" and
//! "the transcript gained a matching assistant turn": appending the user
//! turn, consuming the engine's fragment stream, sinking output with the
//! one-time assistant label, and preserving partial text on mid-stream
//! failure. It takes the cancellation handle and the output sink as
//! explicit parameters so it can be driven with fakes in tests.

use futures_util::StreamExt;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use parlor_types::llm::StreamEvent;

use super::engine::RelayEngine;
use super::transcript::Transcript;

/// Where the relay writes user-visible output.
///
/// The terminal implementation lives in parlor-cli; tests use a
/// recording fake.
pub trait OutputSink {
    /// Print the one-time "Assistant" label before the first fragment of
    /// a response.
    fn assistant_label(&mut self);

    /// Print one fragment of streamed text, flushing immediately.
    fn fragment(&mut self, text: &str);

    /// Note that a capability was executed on the model's behalf.
    fn tool_notice(&mut self, name: &str);

    /// Report a mid-stream failure.
    fn stream_error(&mut self, message: &str);

    /// The turn is over (successfully or not); finish the output line.
    fn end_turn(&mut self);
}

/// How a turn ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The stream completed normally.
    Completed,
    /// A mid-stream error truncated the response; the partial text was
    /// kept in the transcript.
    Truncated,
    /// Cancellation was observed before the turn began; nothing was
    /// appended and no request was issued.
    Cancelled,
}

/// True when the trimmed line case-insensitively equals the literal
/// `exit` sentinel.
///
/// The sentinel terminates the whole process, not just the loop; the
/// caller wires this to `std::process::exit`.
pub fn is_exit_sentinel(line: &str) -> bool {
    line.trim().eq_ignore_ascii_case("exit")
}

/// Run one turn: append the user input, stream the response, append the
/// assistant turn.
///
/// Invariant on return (except `Cancelled`): the transcript gained
/// exactly one user turn and exactly one assistant turn, in that order.
pub async fn run_turn<S: OutputSink>(
    engine: &RelayEngine,
    transcript: &mut Transcript,
    input: &str,
    cancel: &CancellationToken,
    sink: &mut S,
) -> TurnOutcome {
    // Observed at the top of the turn: do not send the pending input.
    if cancel.is_cancelled() {
        return TurnOutcome::Cancelled;
    }

    transcript.push_user(input);

    let mut stream = engine.stream_turn(transcript.to_wire(), cancel.clone());
    let mut buffer = String::new();
    let mut labeled = false;
    let mut failure: Option<String> = None;

    while let Some(event) = stream.next().await {
        match event {
            Ok(StreamEvent::TextDelta { text }) => {
                if !labeled {
                    sink.assistant_label();
                    labeled = true;
                }
                sink.fragment(&text);
                buffer.push_str(&text);
            }
            Ok(StreamEvent::ToolInvoked { name }) => {
                info!(capability = %name, "capability invoked");
                sink.tool_notice(&name);
            }
            Ok(StreamEvent::Done) => break,
            Ok(_) => {}
            Err(e) => {
                warn!(error = %e, "stream failed mid-turn");
                failure = Some(e.to_string());
                break;
            }
        }
    }

    if let Some(message) = &failure {
        sink.stream_error(message);
    }
    sink.end_turn();

    // The transcript never lacks a matching assistant turn once a user
    // turn was sent; a truncated stream keeps whatever arrived.
    transcript.push_assistant(buffer);

    if failure.is_some() {
        TurnOutcome::Truncated
    } else {
        TurnOutcome::Completed
    }
}
