//! Completion provider implementations.

pub mod remote;
pub mod streaming;

pub use remote::RemoteChatProvider;
