//! Remote secret vault client.
//!
//! Fetches named secrets from a vault's REST surface
//! (`GET {vault}/secrets/{name}?api-version=...` with a bearer
//! credential). The credential itself is ambient: it comes from the
//! environment, wrapped in [`secrecy::SecretString`], and is only
//! exposed when building the Authorization header.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use parlor_core::secret::SecretStore;
use parlor_types::error::SecretError;

const API_VERSION: &str = "7.4";

/// REST client for the secret vault.
///
/// Does NOT derive Debug so the bearer credential cannot leak through
/// logging.
pub struct VaultClient {
    http: reqwest::Client,
    endpoint: String,
    credential: SecretString,
}

/// Wire shape of a vault secret response.
#[derive(Debug, Deserialize)]
struct SecretBundle {
    value: String,
}

impl VaultClient {
    /// Create a vault client for the given endpoint and bearer credential.
    pub fn new(endpoint: impl Into<String>, credential: SecretString) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to create reqwest client");

        Self {
            http,
            endpoint: trim_trailing_slash(endpoint.into()),
            credential,
        }
    }

    /// Full URL for a named secret.
    fn secret_url(&self, name: &str) -> String {
        format!(
            "{}/secrets/{}?api-version={}",
            self.endpoint, name, API_VERSION
        )
    }
}

fn trim_trailing_slash(mut s: String) -> String {
    while s.ends_with('/') {
        s.pop();
    }
    s
}

impl SecretStore for VaultClient {
    fn name(&self) -> &str {
        "vault"
    }

    async fn get(&self, name: &str) -> Result<Option<String>, SecretError> {
        let response = self
            .http
            .get(self.secret_url(name))
            .bearer_auth(self.credential.expose_secret())
            .send()
            .await
            .map_err(|e| SecretError::Vault(format!("request failed: {e}")))?;

        let status = response.status();
        match status.as_u16() {
            200 => {
                let bundle: SecretBundle = response
                    .json()
                    .await
                    .map_err(|e| SecretError::Vault(format!("malformed response: {e}")))?;
                Ok(Some(bundle.value))
            }
            404 => Ok(None),
            401 | 403 => Err(SecretError::AuthenticationFailed),
            _ => {
                let body = response.text().await.unwrap_or_default();
                Err(SecretError::Vault(format!("HTTP {status}: {body}")))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_client() -> VaultClient {
        VaultClient::new(
            "https://example.vault.azure.net/",
            SecretString::from("test-token"),
        )
    }

    #[test]
    fn test_secret_url_shape() {
        let client = make_client();
        assert_eq!(
            client.secret_url("relay-api-key"),
            "https://example.vault.azure.net/secrets/relay-api-key?api-version=7.4"
        );
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        assert_eq!(
            trim_trailing_slash("https://v.example//".to_string()),
            "https://v.example"
        );
        assert_eq!(
            trim_trailing_slash("https://v.example".to_string()),
            "https://v.example"
        );
    }

    #[test]
    fn test_secret_bundle_parsing() {
        let bundle: SecretBundle =
            serde_json::from_str(r#"{"value": "sk-abc", "id": "https://v/secrets/k/1"}"#).unwrap();
        assert_eq!(bundle.value, "sk-abc");
    }
}
