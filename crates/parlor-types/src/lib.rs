//! Shared domain types for Parlor.
//!
//! This crate contains the types used across the relay: configuration,
//! conversation and streaming types, tool definitions, memory records,
//! and their associated error enums.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror,
//! and toml for configuration parsing.

pub mod config;
pub mod error;
pub mod llm;
pub mod memory;
pub mod tool;
