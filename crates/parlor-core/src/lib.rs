//! Business logic and trait seams for Parlor.
//!
//! This crate defines the abstractions the relay is built on -- the
//! completion provider, secret store, embedder, and memory store traits
//! with their object-safe box wrappers -- plus the capability registry,
//! the transcript, and the relay engine that drives a streaming turn
//! with transparent capability auto-invocation.
//!
//! Collaborator implementations live in `parlor-infra`; the terminal
//! front end lives in `parlor-cli`.

pub mod llm;
pub mod memory;
pub mod relay;
pub mod secret;
pub mod tool;
