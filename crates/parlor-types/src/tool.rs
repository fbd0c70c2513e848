//! Capability (tool) definition types.
//!
//! A capability is a named callable exposed to the remote model. The
//! model decides when to invoke one during generation; the relay engine
//! executes it and feeds the result back. Definitions carry a JSON
//! Schema for the input so the provider can advertise the signature.

use serde::{Deserialize, Serialize};

/// Definition of a capability: name, human description, and the JSON
/// Schema of its input object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: serde_json::Value,
}

/// Output of a capability execution.
///
/// `text` is what goes back to the model as the tool result message;
/// `structured` preserves the typed output for logging and tests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolOutput {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structured: Option<serde_json::Value>,
}

impl ToolOutput {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            structured: None,
        }
    }
}

/// Errors from capability execution.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("unknown capability: '{0}'")]
    NotFound(String),

    #[error("invalid capability input: {0}")]
    InvalidInput(String),

    #[error("capability execution failed: {0}")]
    ExecutionFailed(String),
}
