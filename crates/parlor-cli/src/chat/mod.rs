//! The interactive chat command.
//!
//! Loads configuration, applies the fail-fast precondition check, builds
//! the session, and hands off to the loop runner. Missing configuration
//! or failed secret resolution emit the "credentials not found" notice
//! and return without issuing any remote call.

pub mod banner;
pub mod loop_runner;
pub mod sink;

use console::style;
use tokio_util::sync::CancellationToken;

use crate::{bootstrap, config_loader};

/// Entry point for `parlor chat`.
pub async fn run(model_override: Option<String>) -> anyhow::Result<()> {
    let config = config_loader::load()?;

    // Fail-fast: no partial startup, no remote call.
    if let Err(e) = config.validate() {
        eprintln!("  {} {e}", style("!").yellow().bold());
        eprintln!(
            "  {}",
            style("Fill ~/.parlor/config.toml or set PARLOR_* variables, then retry.").dim()
        );
        return Ok(());
    }

    // Secret resolution failure aborts startup the same way missing
    // configuration does.
    let session = match bootstrap::build_session(&config, model_override).await {
        Ok(session) => session,
        Err(e) => {
            eprintln!(
                "  {} credentials not found: {e:#}",
                style("!").yellow().bold()
            );
            return Ok(());
        }
    };

    // Ctrl-C cancels the shared token; the loop observes it at the top
    // of each turn and the engine between fragments.
    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal_cancel.cancel();
        }
    });

    loop_runner::run_chat_loop(session, cancel).await
}
