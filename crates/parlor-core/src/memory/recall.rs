//! The `recall_memory` capability.
//!
//! Embeds the model's query and searches the vector memory store,
//! returning the most relevant remembered facts as plain text. Only
//! registered when the memory feature set is configured.

use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use parlor_types::tool::ToolError;

use super::{BoxEmbedder, BoxMemoryStore};
use crate::tool::Tool;

const DEFAULT_LIMIT: usize = 5;

/// Arguments for [`RecallTool`].
#[derive(Debug, Deserialize, JsonSchema)]
pub struct RecallArgs {
    /// What to look for in long-term memory.
    pub query: String,
    /// Maximum number of memories to return.
    pub limit: Option<usize>,
}

/// Capability output: relevant memories, most relevant first.
#[derive(Debug, Serialize)]
pub struct RecallOutput {
    pub memories: Vec<String>,
}

/// Searches long-term memory on the model's behalf.
pub struct RecallTool {
    embedder: Arc<BoxEmbedder>,
    store: Arc<BoxMemoryStore>,
}

impl RecallTool {
    pub fn new(embedder: Arc<BoxEmbedder>, store: Arc<BoxMemoryStore>) -> Self {
        Self { embedder, store }
    }
}

impl Tool for RecallTool {
    const NAME: &'static str = "recall_memory";
    type Args = RecallArgs;
    type Output = RecallOutput;

    fn description(&self) -> &str {
        "Search long-term memory for facts relevant to a query"
    }

    async fn call(&self, args: RecallArgs) -> Result<RecallOutput, ToolError> {
        let limit = args.limit.unwrap_or(DEFAULT_LIMIT);

        let embeddings = self
            .embedder
            .embed(std::slice::from_ref(&args.query))
            .await
            .map_err(|e| ToolError::ExecutionFailed(e.to_string()))?;
        let query_embedding = embeddings
            .into_iter()
            .next()
            .ok_or_else(|| ToolError::ExecutionFailed("embedder returned no vector".to_string()))?;

        let ranked = self
            .store
            .search(&query_embedding, limit)
            .await
            .map_err(|e| ToolError::ExecutionFailed(e.to_string()))?;

        debug!(count = ranked.len(), "recalled memories");

        Ok(RecallOutput {
            memories: ranked.into_iter().map(|m| m.record.text).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use parlor_types::error::MemoryError;
    use parlor_types::memory::{MemoryRecord, RankedMemory};

    use crate::memory::{Embedder, MemoryStore};

    struct FakeEmbedder;

    impl Embedder for FakeEmbedder {
        async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, MemoryError> {
            Ok(texts.iter().map(|_| vec![0.1, 0.2, 0.3]).collect())
        }

        fn model_name(&self) -> &str {
            "fake-embeddings"
        }
    }

    struct FakeStore {
        hits: Vec<&'static str>,
    }

    impl MemoryStore for FakeStore {
        async fn search(
            &self,
            _query_embedding: &[f32],
            limit: usize,
        ) -> Result<Vec<RankedMemory>, MemoryError> {
            Ok(self
                .hits
                .iter()
                .take(limit)
                .map(|text| RankedMemory {
                    record: MemoryRecord::new(*text, Utc::now()),
                    score: 0.9,
                })
                .collect())
        }

        async fn add(
            &self,
            _record: &MemoryRecord,
            _embedding: &[f32],
        ) -> Result<(), MemoryError> {
            Ok(())
        }
    }

    fn make_tool(hits: Vec<&'static str>) -> RecallTool {
        RecallTool::new(
            Arc::new(BoxEmbedder::new(FakeEmbedder)),
            Arc::new(BoxMemoryStore::new(FakeStore { hits })),
        )
    }

    #[tokio::test]
    async fn test_recall_returns_store_hits() {
        let tool = make_tool(vec!["user likes rust", "user prefers tea"]);
        let out = tool
            .call(RecallArgs {
                query: "what does the user like?".to_string(),
                limit: None,
            })
            .await
            .unwrap();
        assert_eq!(out.memories.len(), 2);
        assert_eq!(out.memories[0], "user likes rust");
    }

    #[tokio::test]
    async fn test_recall_respects_limit() {
        let tool = make_tool(vec!["a", "b", "c"]);
        let out = tool
            .call(RecallArgs {
                query: "anything".to_string(),
                limit: Some(1),
            })
            .await
            .unwrap();
        assert_eq!(out.memories.len(), 1);
    }
}
