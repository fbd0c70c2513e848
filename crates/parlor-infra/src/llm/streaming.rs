//! SSE stream to [`StreamEvent`] adapter.
//!
//! Maps `async-openai`'s [`ChatCompletionResponseStream`] chunks onto
//! the relay's provider-agnostic event enum.
//!
//! Capability call arguments arrive as partial JSON fragments across
//! multiple streaming chunks (keyed by tool call index). These are
//! accumulated and emitted as [`StreamEvent::ToolUseComplete`] when the
//! finish reason arrives.

use std::collections::HashMap;
use std::pin::Pin;

use futures_util::{Stream, StreamExt};

use async_openai::types::chat::{ChatCompletionResponseStream, FinishReason};

use parlor_types::llm::{LlmError, StreamEvent, Usage};

use super::remote::map_finish_reason;

/// Accumulates partial JSON fragments for one capability call.
struct ToolCallAccumulator {
    id: String,
    name: String,
    json_buffer: String,
}

/// Map a chat completion response stream to relay stream events.
///
/// The returned stream emits events in this order:
/// 1. `Connected` -- immediately on entry
/// 2. `TextDelta` -- for each text content chunk
/// 3. `ToolUseComplete` -- when capability call JSON is fully assembled
/// 4. `MessageDelta` -- with the stop reason when finish_reason appears
/// 5. `Usage` -- token usage (requires `stream_options.include_usage`)
/// 6. `Done` -- at the end of the stream
pub fn map_completion_stream(
    stream: ChatCompletionResponseStream,
) -> Pin<Box<dyn Stream<Item = Result<StreamEvent, LlmError>> + Send + 'static>> {
    Box::pin(async_stream::try_stream! {
        yield StreamEvent::Connected;

        let mut tool_accumulators: HashMap<u32, ToolCallAccumulator> = HashMap::new();
        let mut stream = stream;

        while let Some(result) = stream.next().await {
            let chunk = result.map_err(|e| LlmError::Stream(e.to_string()))?;

            // The final chunk carries usage with an empty choices array.
            if let Some(usage) = chunk.usage.as_ref() {
                yield StreamEvent::Usage(Usage {
                    input_tokens: usage.prompt_tokens,
                    output_tokens: usage.completion_tokens,
                });
            }

            for choice in &chunk.choices {
                if let Some(text) = choice.delta.content.clone() {
                    if !text.is_empty() {
                        yield StreamEvent::TextDelta { text };
                    }
                }

                // Capability call deltas -- accumulate fragments.
                if let Some(tool_calls) = choice.delta.tool_calls.clone() {
                    for tc in &tool_calls {
                        let tc_id = tc.id.clone().unwrap_or_default();
                        let tc_name = tc
                            .function
                            .as_ref()
                            .and_then(|f| f.name.clone())
                            .unwrap_or_default();

                        let acc = tool_accumulators
                            .entry(tc.index)
                            .or_insert_with(|| ToolCallAccumulator {
                                id: tc_id.clone(),
                                name: tc_name.clone(),
                                json_buffer: String::new(),
                            });

                        // The first chunk for a call carries id/name.
                        if !tc_id.is_empty() {
                            acc.id = tc_id;
                        }
                        if !tc_name.is_empty() {
                            acc.name = tc_name;
                        }
                        if let Some(args) = tc.function.as_ref().and_then(|f| f.arguments.clone()) {
                            acc.json_buffer.push_str(&args);
                        }
                    }
                }

                if let Some(finish_reason) = choice.finish_reason.clone() {
                    if matches!(finish_reason, FinishReason::ToolCalls) {
                        let mut indices: Vec<u32> = tool_accumulators.keys().copied().collect();
                        indices.sort();
                        for idx in indices {
                            if let Some(acc) = tool_accumulators.remove(&idx) {
                                let input: serde_json::Value = if acc.json_buffer.is_empty() {
                                    serde_json::Value::Object(Default::default())
                                } else {
                                    serde_json::from_str(&acc.json_buffer).map_err(|e| {
                                        LlmError::Deserialization(format!(
                                            "capability call JSON for '{}': {e}",
                                            acc.name
                                        ))
                                    })?
                                };
                                yield StreamEvent::ToolUseComplete {
                                    id: acc.id,
                                    name: acc.name,
                                    input,
                                };
                            }
                        }
                    }

                    yield StreamEvent::MessageDelta {
                        stop_reason: map_finish_reason(&finish_reason),
                    };
                }
            }
        }

        yield StreamEvent::Done;
    })
}
