use thiserror::Error;

/// Errors raised while loading or validating configuration.
///
/// All of these are fatal at startup: the session never begins and no
/// remote call is issued.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("credentials not found; missing configuration keys: {}", .0.join(", "))]
    MissingKeys(Vec<String>),

    #[error("failed to parse configuration: {0}")]
    Parse(String),

    #[error("failed to read configuration file: {0}")]
    Io(String),
}

/// Errors from secret resolution.
///
/// Secret failures are fatal at startup, the same tier as missing
/// configuration.
#[derive(Debug, Error)]
pub enum SecretError {
    #[error("secret '{0}' not found")]
    NotFound(String),

    #[error("vault authentication failed")]
    AuthenticationFailed,

    #[error("vault error: {0}")]
    Vault(String),
}

/// Errors from memory store operations.
#[derive(Debug, Error)]
pub enum MemoryError {
    #[error("embedding error: {0}")]
    Embedding(String),

    #[error("search error: {0}")]
    Search(String),

    #[error("memory backend unavailable: {0}")]
    Unavailable(String),
}
