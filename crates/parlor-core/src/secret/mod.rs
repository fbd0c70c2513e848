//! Secret store abstraction.
//!
//! Named secrets (API keys) are resolved at startup, before any client
//! is constructed. Resolution failure is fatal to the session, the same
//! tier as missing configuration. Implementations (environment, remote
//! vault) live in parlor-infra.

use std::future::Future;
use std::pin::Pin;

use parlor_types::error::SecretError;

/// Trait for secret store backends.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
/// `get` returns `Ok(None)` when the backend is reachable but does not
/// hold the secret, and an error when the backend itself fails.
pub trait SecretStore: Send + Sync {
    /// Human-readable store name (e.g., "environment", "vault").
    fn name(&self) -> &str;

    /// Fetch a secret value by name.
    fn get(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<String>, SecretError>> + Send;
}

/// Object-safe version of [`SecretStore`] with boxed futures.
pub trait SecretStoreDyn: Send + Sync {
    fn name(&self) -> &str;

    fn get_boxed<'a>(
        &'a self,
        name: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Option<String>, SecretError>> + Send + 'a>>;
}

impl<T: SecretStore> SecretStoreDyn for T {
    fn name(&self) -> &str {
        SecretStore::name(self)
    }

    fn get_boxed<'a>(
        &'a self,
        name: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Option<String>, SecretError>> + Send + 'a>> {
        Box::pin(self.get(name))
    }
}

/// Type-erased secret store for runtime backend selection.
pub struct BoxSecretStore {
    inner: Box<dyn SecretStoreDyn + Send + Sync>,
}

impl BoxSecretStore {
    /// Wrap a concrete `SecretStore` in a type-erased box.
    pub fn new<T: SecretStore + 'static>(store: T) -> Self {
        Self {
            inner: Box::new(store),
        }
    }

    /// Human-readable store name.
    pub fn name(&self) -> &str {
        self.inner.name()
    }

    /// Fetch a secret value by name.
    pub async fn get(&self, name: &str) -> Result<Option<String>, SecretError> {
        self.inner.get_boxed(name).await
    }
}
