//! Parlor CLI entry point.
//!
//! Binary name: `parlor`
//!
//! Parses CLI arguments, loads configuration, resolves secrets, and
//! dispatches to the interactive chat loop or the configuration check.

mod bootstrap;
mod chat;
mod config_loader;

use clap::{Parser, Subcommand};
use clap_complete::{Shell, generate};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "parlor", version, about = "Interactive relay for hosted chat completion services")]
struct Cli {
    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive chat loop (the default)
    Chat {
        /// Override the configured chat model for this session
        #[arg(long)]
        model: Option<String>,
    },

    /// Validate configuration and secret resolution without chatting
    Check {
        /// Also issue one tiny non-streaming completion as a
        /// connectivity probe
        #[arg(long)]
        ping: bool,
    },

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,parlor=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            generate(shell, &mut cmd, "parlor", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Check { ping }) => bootstrap::check(ping).await,
        Some(Commands::Chat { model }) => chat::run(model).await,
        None => chat::run(None).await,
    }
}
