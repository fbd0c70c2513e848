//! Capability (tool) traits and built-ins.
//!
//! A capability is registered by name, advertised to the model through
//! its [`ToolDefinition`], and executed by the relay engine when the
//! model asks for it. The strongly-typed [`Tool`] trait handles typed
//! arguments; the blanket [`ToolDyn`] impl takes care of JSON
//! (de)serialization so registries can hold heterogeneous tools.

pub mod clock;
pub mod registry;

pub use clock::CurrentTimeTool;
pub use registry::ToolRegistry;

use std::future::Future;
use std::pin::Pin;

use serde::Serialize;
use serde::de::DeserializeOwned;

use parlor_types::tool::{ToolDefinition, ToolError, ToolOutput};

/// Strongly-typed capability trait.
///
/// The blanket impl of [`ToolDyn`] handles JSON deserialization and
/// serialization so implementations work with concrete Rust types.
pub trait Tool: Send + Sync {
    /// The unique name of this capability.
    const NAME: &'static str;
    /// The deserialized input type.
    type Args: DeserializeOwned + schemars::JsonSchema + Send;
    /// The serializable output type.
    type Output: Serialize;

    /// One-line description advertised to the model.
    fn description(&self) -> &str;

    /// Execute the capability with typed arguments.
    fn call(
        &self,
        args: Self::Args,
    ) -> impl Future<Output = Result<Self::Output, ToolError>> + Send;

    /// The capability definition (name, description, input schema).
    ///
    /// Default implementation derives the schema from `Args` via schemars.
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: self.description().to_string(),
            input_schema: schemars::schema_for!(Self::Args).to_value(),
        }
    }
}

/// Type-erased capability for dynamic dispatch. Blanket-implemented for
/// all [`Tool`] impls.
pub trait ToolDyn: Send + Sync {
    /// The capability's unique name.
    fn name(&self) -> &str;
    /// The capability definition (name, description, input schema).
    fn definition(&self) -> ToolDefinition;
    /// Execute with a JSON value input, returning a generic output.
    fn call_dyn<'a>(
        &'a self,
        input: serde_json::Value,
    ) -> Pin<Box<dyn Future<Output = Result<ToolOutput, ToolError>> + Send + 'a>>;
}

/// Blanket implementation: any `Tool` automatically becomes a `ToolDyn`.
///
/// Handles deserializing the JSON input into `T::Args`, calling the
/// typed implementation, and serializing `T::Output` into a
/// [`ToolOutput`].
impl<T: Tool> ToolDyn for T {
    fn name(&self) -> &str {
        T::NAME
    }

    fn definition(&self) -> ToolDefinition {
        Tool::definition(self)
    }

    fn call_dyn<'a>(
        &'a self,
        input: serde_json::Value,
    ) -> Pin<Box<dyn Future<Output = Result<ToolOutput, ToolError>> + Send + 'a>> {
        Box::pin(async move {
            let args: T::Args = serde_json::from_value(input)
                .map_err(|e| ToolError::InvalidInput(e.to_string()))?;

            let output = self.call(args).await?;

            let structured = serde_json::to_value(&output)
                .map_err(|e| ToolError::ExecutionFailed(e.to_string()))?;

            let text = match &structured {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };

            Ok(ToolOutput {
                text,
                structured: Some(structured),
            })
        })
    }
}
