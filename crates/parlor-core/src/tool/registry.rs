//! Capability registry: register, look up, and execute capabilities.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use parlor_types::tool::{ToolDefinition, ToolError, ToolOutput};

use super::{Tool, ToolDyn};

/// Registry of capabilities handed to the relay engine.
///
/// Capabilities are stored as type-erased [`ToolDyn`] trait objects.
/// The registry only resolves and executes; invocation *timing* is the
/// remote model's decision, relayed by the engine.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn ToolDyn>>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a strongly-typed capability (auto-erased to `ToolDyn`).
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        self.tools.insert(T::NAME.to_string(), Arc::new(tool));
    }

    /// Register a pre-erased capability.
    pub fn register_dyn(&mut self, tool: Arc<dyn ToolDyn>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Look up a capability by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn ToolDyn>> {
        self.tools.get(name).cloned()
    }

    /// Number of registered capabilities.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// True when no capabilities are registered.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Definitions for all registered capabilities, sorted by name so
    /// the advertised order is stable across runs.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        let mut defs: Vec<ToolDefinition> = self.tools.values().map(|t| t.definition()).collect();
        defs.sort_by(|a, b| a.name.cmp(&b.name));
        defs
    }

    /// Execute a capability by name.
    pub async fn execute(
        &self,
        name: &str,
        input: serde_json::Value,
    ) -> Result<ToolOutput, ToolError> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| ToolError::NotFound(name.to_string()))?;

        debug!(capability = name, "executing capability");
        tool.call_dyn(input).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemars::JsonSchema;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, JsonSchema)]
    struct EchoArgs {
        text: String,
    }

    struct EchoTool;

    impl Tool for EchoTool {
        const NAME: &'static str = "echo";
        type Args = EchoArgs;
        type Output = String;

        fn description(&self) -> &str {
            "Echo the input text back"
        }

        async fn call(&self, args: EchoArgs) -> Result<String, ToolError> {
            Ok(args.text)
        }
    }

    #[tokio::test]
    async fn test_register_and_execute() {
        let mut registry = ToolRegistry::new();
        registry.register(EchoTool);

        let out = registry
            .execute("echo", serde_json::json!({"text": "hi"}))
            .await
            .unwrap();
        assert_eq!(out.text, "hi");
    }

    #[tokio::test]
    async fn test_unknown_capability() {
        let registry = ToolRegistry::new();
        let err = registry
            .execute("missing", serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_invalid_input_is_reported() {
        let mut registry = ToolRegistry::new();
        registry.register(EchoTool);

        let err = registry
            .execute("echo", serde_json::json!({"wrong": 1}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidInput(_)));
    }

    #[test]
    fn test_definitions_are_sorted() {
        #[derive(Debug, Deserialize, JsonSchema)]
        struct NoArgs {}

        struct ZTool;
        impl Tool for ZTool {
            const NAME: &'static str = "z_last";
            type Args = NoArgs;
            type Output = String;
            fn description(&self) -> &str {
                "z"
            }
            async fn call(&self, _args: NoArgs) -> Result<String, ToolError> {
                Ok("z".to_string())
            }
        }

        let mut registry = ToolRegistry::new();
        registry.register(ZTool);
        registry.register(EchoTool);

        let defs = registry.definitions();
        assert_eq!(defs.len(), 2);
        assert_eq!(defs[0].name, "echo");
        assert_eq!(defs[1].name, "z_last");
    }
}
