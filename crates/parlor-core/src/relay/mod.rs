//! The interactive relay: transcript, streaming engine, and the
//! per-turn core.
//!
//! The engine owns request assembly and transparent capability
//! auto-invocation; the turn core owns fragment consumption, output
//! sinking, and the transcript invariant (exactly one assistant turn per
//! user turn sent, even on mid-stream failure). The terminal loop in
//! parlor-cli is a thin driver around [`turn::run_turn`].

pub mod engine;
pub mod transcript;
pub mod turn;

pub use engine::{EngineOptions, RelayEngine};
pub use transcript::Transcript;
pub use turn::{OutputSink, TurnOutcome, is_exit_sentinel, run_turn};
