//! Long-term memory abstraction.
//!
//! Memory pairs an embedding generator with a vector search store and is
//! surfaced to the model as the `recall_memory` capability. Both trait
//! implementations live in parlor-infra; this module defines the seams
//! and their object-safe box wrappers.

pub mod recall;

pub use recall::RecallTool;

use std::future::Future;
use std::pin::Pin;

use parlor_types::error::MemoryError;
use parlor_types::memory::{MemoryRecord, RankedMemory};

/// Trait for converting text into embedding vectors.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait Embedder: Send + Sync {
    /// Embed one or more texts into vectors, one vector per input.
    fn embed(
        &self,
        texts: &[String],
    ) -> impl Future<Output = Result<Vec<Vec<f32>>, MemoryError>> + Send;

    /// The model used for embeddings (e.g., "text-embedding-3-small").
    fn model_name(&self) -> &str;
}

/// Trait for the vector-indexed memory backend.
pub trait MemoryStore: Send + Sync {
    /// Search for records semantically similar to the query embedding.
    fn search(
        &self,
        query_embedding: &[f32],
        limit: usize,
    ) -> impl Future<Output = Result<Vec<RankedMemory>, MemoryError>> + Send;

    /// Add a record with its embedding vector.
    fn add(
        &self,
        record: &MemoryRecord,
        embedding: &[f32],
    ) -> impl Future<Output = Result<(), MemoryError>> + Send;
}

/// Object-safe version of [`Embedder`] with boxed futures.
pub trait EmbedderDyn: Send + Sync {
    fn model_name(&self) -> &str;

    fn embed_boxed<'a>(
        &'a self,
        texts: &'a [String],
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Vec<f32>>, MemoryError>> + Send + 'a>>;
}

impl<T: Embedder> EmbedderDyn for T {
    fn model_name(&self) -> &str {
        Embedder::model_name(self)
    }

    fn embed_boxed<'a>(
        &'a self,
        texts: &'a [String],
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Vec<f32>>, MemoryError>> + Send + 'a>> {
        Box::pin(self.embed(texts))
    }
}

/// Type-erased embedder.
pub struct BoxEmbedder {
    inner: Box<dyn EmbedderDyn + Send + Sync>,
}

impl BoxEmbedder {
    pub fn new<T: Embedder + 'static>(embedder: T) -> Self {
        Self {
            inner: Box::new(embedder),
        }
    }

    pub fn model_name(&self) -> &str {
        self.inner.model_name()
    }

    pub async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, MemoryError> {
        self.inner.embed_boxed(texts).await
    }
}

/// Object-safe version of [`MemoryStore`] with boxed futures.
pub trait MemoryStoreDyn: Send + Sync {
    fn search_boxed<'a>(
        &'a self,
        query_embedding: &'a [f32],
        limit: usize,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RankedMemory>, MemoryError>> + Send + 'a>>;

    fn add_boxed<'a>(
        &'a self,
        record: &'a MemoryRecord,
        embedding: &'a [f32],
    ) -> Pin<Box<dyn Future<Output = Result<(), MemoryError>> + Send + 'a>>;
}

impl<T: MemoryStore> MemoryStoreDyn for T {
    fn search_boxed<'a>(
        &'a self,
        query_embedding: &'a [f32],
        limit: usize,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RankedMemory>, MemoryError>> + Send + 'a>> {
        Box::pin(self.search(query_embedding, limit))
    }

    fn add_boxed<'a>(
        &'a self,
        record: &'a MemoryRecord,
        embedding: &'a [f32],
    ) -> Pin<Box<dyn Future<Output = Result<(), MemoryError>> + Send + 'a>> {
        Box::pin(self.add(record, embedding))
    }
}

/// Type-erased memory store.
pub struct BoxMemoryStore {
    inner: Box<dyn MemoryStoreDyn + Send + Sync>,
}

impl BoxMemoryStore {
    pub fn new<T: MemoryStore + 'static>(store: T) -> Self {
        Self {
            inner: Box::new(store),
        }
    }

    pub async fn search(
        &self,
        query_embedding: &[f32],
        limit: usize,
    ) -> Result<Vec<RankedMemory>, MemoryError> {
        self.inner.search_boxed(query_embedding, limit).await
    }

    pub async fn add(
        &self,
        record: &MemoryRecord,
        embedding: &[f32],
    ) -> Result<(), MemoryError> {
        self.inner.add_boxed(record, embedding).await
    }
}
