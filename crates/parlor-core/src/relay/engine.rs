//! Relay execution engine.
//!
//! `RelayEngine` assembles completion requests from wire messages, sends
//! them through `BoxChatProvider`, and re-streams the events. When the
//! model stops to call a capability and auto-invocation is enabled, the
//! engine executes the call through the registry, appends the tool
//! messages, and re-issues the request -- transparently, inside the one
//! stream the caller consumes. The relay loop never dispatches tools
//! itself.

use std::pin::Pin;
use std::sync::Arc;

use futures_util::{Stream, StreamExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use parlor_types::llm::{
    CompletionRequest, CompletionResponse, LlmError, StopReason, StreamEvent, ToolCallRecord,
    WireMessage,
};

use crate::llm::BoxChatProvider;
use crate::tool::ToolRegistry;

/// Per-session execution options for the engine.
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Model identifier sent with every request.
    pub model: String,
    /// Optional system prompt prepended to every request.
    pub system: Option<String>,
    pub temperature: f64,
    pub max_tokens: u32,
    /// Advertise registered capabilities and execute them when the model
    /// asks. When false the model sees no tools at all.
    pub auto_invoke_tools: bool,
    /// Upper bound on capability rounds per turn, so a model that keeps
    /// asking for tools cannot loop forever.
    pub max_tool_rounds: usize,
}

impl EngineOptions {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            system: None,
            temperature: 0.7,
            max_tokens: 4096,
            auto_invoke_tools: true,
            max_tool_rounds: 4,
        }
    }
}

/// Drives streaming turns against the completion provider.
pub struct RelayEngine {
    provider: Arc<BoxChatProvider>,
    tools: Arc<ToolRegistry>,
    options: EngineOptions,
}

impl RelayEngine {
    pub fn new(provider: BoxChatProvider, tools: ToolRegistry, options: EngineOptions) -> Self {
        Self {
            provider: Arc::new(provider),
            tools: Arc::new(tools),
            options,
        }
    }

    /// Human-readable name of the underlying provider.
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Stream one turn for the given wire messages.
    ///
    /// The returned stream is finite: it ends with `StreamEvent::Done`
    /// after the final capability round, ends early (still with `Done`)
    /// when `cancel` fires between fragments, or terminates with an
    /// error item on transport/service failure.
    pub fn stream_turn(
        &self,
        messages: Vec<WireMessage>,
        cancel: CancellationToken,
    ) -> Pin<Box<dyn Stream<Item = Result<StreamEvent, LlmError>> + Send + 'static>> {
        let provider = Arc::clone(&self.provider);
        let tools = Arc::clone(&self.tools);
        let options = self.options.clone();
        let mut messages = messages;

        Box::pin(async_stream::try_stream! {
            let definitions = if options.auto_invoke_tools {
                tools.definitions()
            } else {
                Vec::new()
            };
            let mut rounds = 0usize;

            'request: loop {
                let request = CompletionRequest {
                    model: options.model.clone(),
                    messages: messages.clone(),
                    system: options.system.clone(),
                    max_tokens: options.max_tokens,
                    temperature: Some(options.temperature),
                    stream: true,
                    tools: definitions.clone(),
                };

                debug!(
                    model = %request.model,
                    messages = request.messages.len(),
                    tools = request.tools.len(),
                    round = rounds,
                    "issuing streaming completion"
                );

                let mut inner = provider.stream(request);
                let mut pending: Vec<ToolCallRecord> = Vec::new();
                let mut tool_round = false;

                loop {
                    let event = tokio::select! {
                        biased;
                        _ = cancel.cancelled() => break 'request,
                        ev = inner.next() => match ev {
                            Some(ev) => ev,
                            None => break,
                        },
                    };
                    let event = event?;

                    match event {
                        StreamEvent::ToolUseComplete { id, name, input } => {
                            pending.push(ToolCallRecord {
                                id: id.clone(),
                                name: name.clone(),
                                arguments: input.clone(),
                            });
                            yield StreamEvent::ToolUseComplete { id, name, input };
                        }
                        StreamEvent::MessageDelta { stop_reason } => {
                            tool_round = stop_reason == StopReason::ToolUse;
                            yield StreamEvent::MessageDelta { stop_reason };
                        }
                        // The provider's own end-of-stream marker; the
                        // engine emits a single Done once all rounds are
                        // finished.
                        StreamEvent::Done => break,
                        other => yield other,
                    }
                }

                if tool_round && !pending.is_empty() && rounds < options.max_tool_rounds {
                    rounds += 1;
                    messages.push(WireMessage::tool_request(pending.clone()));

                    for call in pending {
                        let result = tools.execute(&call.name, call.arguments.clone()).await;
                        let text = match result {
                            Ok(output) => output.text,
                            Err(e) => {
                                warn!(capability = %call.name, error = %e, "capability failed");
                                format!("capability error: {e}")
                            }
                        };
                        messages.push(WireMessage::tool_result(call.id, text));
                        yield StreamEvent::ToolInvoked { name: call.name };
                    }
                    continue;
                }

                break;
            }

            yield StreamEvent::Done;
        })
    }

    /// Issue a non-streaming completion (used by connectivity checks).
    pub async fn complete_once(
        &self,
        messages: Vec<WireMessage>,
    ) -> Result<CompletionResponse, LlmError> {
        let request = CompletionRequest {
            model: self.options.model.clone(),
            messages,
            system: self.options.system.clone(),
            max_tokens: self.options.max_tokens,
            temperature: Some(self.options.temperature),
            stream: false,
            tools: Vec::new(),
        };
        self.provider.complete(&request).await
    }
}
