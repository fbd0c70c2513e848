//! Terminal output sink for the relay loop.
//!
//! Prints fragments as they arrive (flushing per fragment), the one-time
//! assistant label, capability notices, and mid-stream errors. A spinner
//! runs between submitting the input and the first fragment.

use std::io::Write;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use parlor_core::relay::OutputSink;

/// Sink writing styled output to the terminal.
pub struct TerminalSink {
    spinner: Option<ProgressBar>,
}

impl TerminalSink {
    /// Create a sink with a "thinking" spinner already ticking.
    pub fn with_spinner() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .expect("valid spinner template"),
        );
        spinner.set_message("thinking...");
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));

        Self {
            spinner: Some(spinner),
        }
    }

    fn clear_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}

impl OutputSink for TerminalSink {
    fn assistant_label(&mut self) {
        self.clear_spinner();
        print!("  {} ", style("Assistant >").cyan().bold());
        let _ = std::io::stdout().flush();
    }

    fn fragment(&mut self, text: &str) {
        print!("{text}");
        let _ = std::io::stdout().flush();
    }

    fn tool_notice(&mut self, name: &str) {
        self.clear_spinner();
        println!("  {} {}", style("⚙").dim(), style(name).dim());
    }

    fn stream_error(&mut self, message: &str) {
        self.clear_spinner();
        eprintln!("\n  {} {message}", style("!").red().bold());
    }

    fn end_turn(&mut self) {
        self.clear_spinner();
        println!();
    }
}
