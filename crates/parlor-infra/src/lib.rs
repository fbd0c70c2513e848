//! Infrastructure implementations for Parlor.
//!
//! Concrete clients for the relay's collaborators:
//! - `llm`: the OpenAI-compatible hosted completion provider (streaming
//!   over SSE via async-openai)
//! - `secret`: secret resolution (environment variables, remote vault)
//! - `memory`: remote embeddings and the vector search memory store

pub mod llm;
pub mod memory;
pub mod secret;
