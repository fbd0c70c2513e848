//! Environment variable secret store.
//!
//! Read-only, highest-priority backend in the resolution chain: env vars
//! override the vault.
//!
//! Key resolution: first `PARLOR_SECRET_{NAME}` with the secret name
//! uppercased and dashes mapped to underscores, then the name directly.

use parlor_core::secret::SecretStore;
use parlor_types::error::SecretError;

/// Environment variable secret store.
#[derive(Default)]
pub struct EnvSecretStore;

impl EnvSecretStore {
    pub fn new() -> Self {
        Self
    }

    /// Env var name for the prefixed form of a secret name.
    fn prefixed(name: &str) -> String {
        format!(
            "PARLOR_SECRET_{}",
            name.replace('-', "_").to_uppercase()
        )
    }
}

impl SecretStore for EnvSecretStore {
    fn name(&self) -> &str {
        "environment"
    }

    async fn get(&self, name: &str) -> Result<Option<String>, SecretError> {
        for key in [Self::prefixed(name), name.to_string()] {
            match std::env::var(&key) {
                Ok(val) => return Ok(Some(val)),
                Err(std::env::VarError::NotPresent) => {}
                // Present but not valid Unicode -- treat as absent,
                // secrets must be valid strings.
                Err(std::env::VarError::NotUnicode(_)) => {}
            }
        }
        Ok(None)
    }
}
