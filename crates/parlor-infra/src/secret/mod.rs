//! Secret resolution.
//!
//! Two backends behind the [`SecretStore`] seam:
//! - `env`: environment variables (read-only, highest priority)
//! - `vault`: remote secret vault over REST
//!
//! `SecretChain` queries them in order. Resolution failure is fatal at
//! startup: the relay constructs no client until every named secret it
//! needs has been resolved.

pub mod env;
pub mod vault;

pub use env::EnvSecretStore;
pub use vault::VaultClient;

use tracing::debug;

use parlor_core::secret::BoxSecretStore;
use parlor_types::error::SecretError;

/// Ordered chain of secret stores; the first store holding a name wins.
pub struct SecretChain {
    stores: Vec<BoxSecretStore>,
}

impl SecretChain {
    pub fn new(stores: Vec<BoxSecretStore>) -> Self {
        Self { stores }
    }

    /// Resolve a named secret, or fail.
    ///
    /// `Ok(None)` from a store means "not here, ask the next one"; an
    /// error from a store aborts resolution immediately -- a vault that
    /// is configured but unreachable is a startup failure, not a miss.
    pub async fn resolve(&self, name: &str) -> Result<String, SecretError> {
        for store in &self.stores {
            if let Some(value) = store.get(name).await? {
                debug!(secret = name, source = store.name(), "secret resolved");
                return Ok(value);
            }
        }
        Err(SecretError::NotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parlor_core::secret::SecretStore;

    struct StaticStore {
        name: &'static str,
        entries: Vec<(&'static str, &'static str)>,
    }

    impl SecretStore for StaticStore {
        fn name(&self) -> &str {
            self.name
        }

        async fn get(&self, name: &str) -> Result<Option<String>, SecretError> {
            Ok(self
                .entries
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.to_string()))
        }
    }

    struct FailingStore;

    impl SecretStore for FailingStore {
        fn name(&self) -> &str {
            "failing"
        }

        async fn get(&self, _name: &str) -> Result<Option<String>, SecretError> {
            Err(SecretError::Vault("unreachable".to_string()))
        }
    }

    #[tokio::test]
    async fn test_first_store_wins() {
        let chain = SecretChain::new(vec![
            BoxSecretStore::new(StaticStore {
                name: "first",
                entries: vec![("api-key", "from-first")],
            }),
            BoxSecretStore::new(StaticStore {
                name: "second",
                entries: vec![("api-key", "from-second")],
            }),
        ]);

        assert_eq!(chain.resolve("api-key").await.unwrap(), "from-first");
    }

    #[tokio::test]
    async fn test_falls_through_to_later_store() {
        let chain = SecretChain::new(vec![
            BoxSecretStore::new(StaticStore {
                name: "first",
                entries: vec![],
            }),
            BoxSecretStore::new(StaticStore {
                name: "second",
                entries: vec![("api-key", "from-second")],
            }),
        ]);

        assert_eq!(chain.resolve("api-key").await.unwrap(), "from-second");
    }

    #[tokio::test]
    async fn test_missing_everywhere_is_not_found() {
        let chain = SecretChain::new(vec![BoxSecretStore::new(StaticStore {
            name: "only",
            entries: vec![],
        })]);

        assert!(matches!(
            chain.resolve("api-key").await,
            Err(SecretError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_store_error_aborts_resolution() {
        let chain = SecretChain::new(vec![
            BoxSecretStore::new(FailingStore),
            BoxSecretStore::new(StaticStore {
                name: "second",
                entries: vec![("api-key", "unreachable-anyway")],
            }),
        ]);

        assert!(matches!(
            chain.resolve("api-key").await,
            Err(SecretError::Vault(_))
        ));
    }
}
