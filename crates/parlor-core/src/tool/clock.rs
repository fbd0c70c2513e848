//! Built-in capability reporting the current date and time.

use chrono::Local;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use parlor_types::tool::ToolError;

use super::Tool;

/// Arguments for [`CurrentTimeTool`].
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct CurrentTimeArgs {
    /// Which part to report. Defaults to both date and time.
    #[serde(default)]
    pub part: TimePart,
}

/// Selector for the portion of the timestamp to report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TimePart {
    #[default]
    Both,
    Date,
    Time,
}

/// Capability output: the formatted local timestamp.
#[derive(Debug, Serialize)]
pub struct CurrentTimeOutput {
    pub now: String,
}

/// Reports the current local date and/or time.
///
/// The remote model invokes this autonomously when a question needs the
/// wall clock ("what day is it?", "how late is it?").
#[derive(Default)]
pub struct CurrentTimeTool;

impl CurrentTimeTool {
    pub fn new() -> Self {
        Self
    }

    fn format(part: TimePart, now: chrono::DateTime<Local>) -> String {
        match part {
            TimePart::Date => now.format("%A, %B %-d, %Y").to_string(),
            TimePart::Time => now.format("%H:%M:%S %Z").to_string(),
            TimePart::Both => now.format("%A, %B %-d, %Y %H:%M:%S %Z").to_string(),
        }
    }
}

impl Tool for CurrentTimeTool {
    const NAME: &'static str = "current_time";
    type Args = CurrentTimeArgs;
    type Output = CurrentTimeOutput;

    fn description(&self) -> &str {
        "Report the current local date and time"
    }

    async fn call(&self, args: CurrentTimeArgs) -> Result<CurrentTimeOutput, ToolError> {
        Ok(CurrentTimeOutput {
            now: Self::format(args.part, Local::now()),
        })
    }
}
