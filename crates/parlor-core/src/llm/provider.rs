//! ChatProvider trait definition.
//!
//! This is the seam between the relay and the hosted completion service.
//! Uses RPITIT for `complete`, and `Pin<Box<dyn Stream>>` for `stream`
//! (streams need to be object-safe for the BoxChatProvider wrapper).

use std::pin::Pin;

use futures_util::Stream;

use parlor_types::llm::{
    CompletionRequest, CompletionResponse, LlmError, ProviderCapabilities, StreamEvent,
};

/// Trait for chat completion backends.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition) for
/// `complete`. The `stream` method returns a boxed stream because
/// streams need to be object-safe for `BoxChatProvider`.
///
/// Implementations live in parlor-infra.
pub trait ChatProvider: Send + Sync {
    /// Human-readable provider name (e.g., "openai-compatible").
    fn name(&self) -> &str;

    /// What this provider supports (streaming, capability calling, limits).
    fn capabilities(&self) -> &ProviderCapabilities;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;

    /// Send a streaming completion request. Returns a stream of events.
    ///
    /// The stream is finite and not restartable: it terminates normally
    /// with `StreamEvent::Done` or raises on transport/service error.
    fn stream(
        &self,
        request: CompletionRequest,
    ) -> Pin<Box<dyn Stream<Item = Result<StreamEvent, LlmError>> + Send + 'static>>;
}
