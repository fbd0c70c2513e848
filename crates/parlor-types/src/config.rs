//! Relay configuration.
//!
//! `RelayConfig` represents the flat key set loaded once at startup from
//! `~/.parlor/config.toml` plus `PARLOR_*` environment overrides. It is
//! immutable after loading. Validation is fail-fast: a missing required
//! key for the selected feature set aborts the session before any remote
//! call is issued.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Environment variable prefix for per-key overrides.
pub const ENV_PREFIX: &str = "PARLOR_";

/// Top-level configuration for the relay.
///
/// All keys are individually optional; the feature set selected at
/// startup determines which are collectively required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelayConfig {
    #[serde(default)]
    pub relay: RelaySection,
    #[serde(default)]
    pub memory: MemorySection,
    #[serde(default)]
    pub vault: VaultSection,
}

/// `[relay]` -- the completion service connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelaySection {
    /// Base URL of the hosted completion service.
    pub endpoint: Option<String>,
    /// Chat model deployment/identifier.
    pub chat_model: Option<String>,
    /// Embeddings model identifier (memory feature).
    pub embeddings_model: Option<String>,
    /// Literal API key. Mutually exclusive in spirit with `api_key_name`;
    /// when both are set the literal key wins.
    pub api_key: Option<String>,
    /// Name of a vault secret holding the API key.
    pub api_key_name: Option<String>,
    /// Sampling temperature for completions.
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Maximum tokens per response.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

/// `[memory]` -- the vector search backed long-term memory (optional).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemorySection {
    /// Vector search service base URL.
    pub search_endpoint: Option<String>,
    /// Literal search API key.
    pub search_api_key: Option<String>,
    /// Name of a vault secret holding the search key.
    pub search_api_key_name: Option<String>,
    /// Search index holding memory records.
    #[serde(default = "default_index")]
    pub index: String,
}

/// `[vault]` -- the secret vault (optional).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VaultSection {
    /// Secret vault base URL.
    pub endpoint: Option<String>,
}

fn default_temperature() -> f64 {
    0.7
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_index() -> String {
    "parlor-memory".to_string()
}

impl Default for RelaySection {
    fn default() -> Self {
        Self {
            endpoint: None,
            chat_model: None,
            embeddings_model: None,
            api_key: None,
            api_key_name: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

impl Default for MemorySection {
    fn default() -> Self {
        Self {
            search_endpoint: None,
            search_api_key: None,
            search_api_key_name: None,
            index: default_index(),
        }
    }
}

/// Which collaborators the loaded configuration enables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureSet {
    /// API keys are resolved through the vault rather than read literally.
    pub vault: bool,
    /// Search-backed long-term memory and the recall capability.
    pub memory: bool,
}

impl RelayConfig {
    /// Parse a TOML document into a config.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply `PARLOR_*` environment overrides from an explicit key/value
    /// iterator.
    ///
    /// Taking the environment as a parameter keeps this pure and
    /// testable; the binary passes `std::env::vars()`.
    pub fn apply_env_overrides<I>(&mut self, vars: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in vars {
            let Some(name) = key.strip_prefix(ENV_PREFIX) else {
                continue;
            };
            match name {
                "ENDPOINT" => self.relay.endpoint = Some(value),
                "CHAT_MODEL" => self.relay.chat_model = Some(value),
                "EMBEDDINGS_MODEL" => self.relay.embeddings_model = Some(value),
                "API_KEY" => self.relay.api_key = Some(value),
                "API_KEY_NAME" => self.relay.api_key_name = Some(value),
                "SEARCH_ENDPOINT" => self.memory.search_endpoint = Some(value),
                "SEARCH_API_KEY" => self.memory.search_api_key = Some(value),
                "SEARCH_API_KEY_NAME" => self.memory.search_api_key_name = Some(value),
                "VAULT_ENDPOINT" => self.vault.endpoint = Some(value),
                _ => {}
            }
        }
    }

    /// Derive the feature set implied by which optional keys are present.
    pub fn features(&self) -> FeatureSet {
        FeatureSet {
            vault: self.vault.endpoint.is_some(),
            memory: self.memory.search_endpoint.is_some(),
        }
    }

    /// Validate that every key required by the derived feature set is
    /// present.
    ///
    /// Returns the full list of missing keys so the fail-fast notice can
    /// name all of them at once.
    pub fn validate(&self) -> Result<FeatureSet, ConfigError> {
        let features = self.features();
        let mut missing = Vec::new();

        if self.relay.endpoint.is_none() {
            missing.push("relay.endpoint");
        }
        if self.relay.chat_model.is_none() {
            missing.push("relay.chat_model");
        }

        // The API key is either literal or vault-indirected.
        if self.relay.api_key.is_none() {
            if features.vault {
                if self.relay.api_key_name.is_none() {
                    missing.push("relay.api_key_name");
                }
            } else {
                missing.push("relay.api_key");
            }
        }

        if features.memory {
            if self.relay.embeddings_model.is_none() {
                missing.push("relay.embeddings_model");
            }
            if self.memory.search_api_key.is_none() {
                if features.vault {
                    if self.memory.search_api_key_name.is_none() {
                        missing.push("memory.search_api_key_name");
                    }
                } else {
                    missing.push("memory.search_api_key");
                }
            }
        }

        if missing.is_empty() {
            Ok(features)
        } else {
            Err(ConfigError::MissingKeys(
                missing.into_iter().map(String::from).collect(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_toml() -> &'static str {
        r#"
[relay]
endpoint = "https://example.openai.azure.com"
chat_model = "gpt-4o"
api_key = "sk-test"
"#
    }

    #[test]
    fn test_parse_minimal_chat_config() {
        let config = RelayConfig::from_toml_str(base_toml()).unwrap();
        assert_eq!(
            config.relay.endpoint.as_deref(),
            Some("https://example.openai.azure.com")
        );
        let features = config.validate().unwrap();
        assert!(!features.vault);
        assert!(!features.memory);
    }

    #[test]
    fn test_defaults() {
        let config = RelayConfig::from_toml_str(base_toml()).unwrap();
        assert!((config.relay.temperature - 0.7).abs() < f64::EPSILON);
        assert_eq!(config.relay.max_tokens, 4096);
        assert_eq!(config.memory.index, "parlor-memory");
    }

    #[test]
    fn test_default_struct_matches_serde_defaults() {
        // A missing config file starts from Default; the tunables must
        // match what an empty TOML document would deserialize to.
        let from_empty = RelayConfig::from_toml_str("").unwrap();
        let from_default = RelayConfig::default();
        assert_eq!(from_empty.relay.max_tokens, from_default.relay.max_tokens);
        assert!(
            (from_empty.relay.temperature - from_default.relay.temperature).abs() < f64::EPSILON
        );
        assert_eq!(from_empty.memory.index, from_default.memory.index);
    }

    #[test]
    fn test_empty_config_reports_all_missing_keys() {
        let config = RelayConfig::from_toml_str("").unwrap();
        let err = config.validate().unwrap_err();
        match err {
            ConfigError::MissingKeys(keys) => {
                assert!(keys.contains(&"relay.endpoint".to_string()));
                assert!(keys.contains(&"relay.chat_model".to_string()));
                assert!(keys.contains(&"relay.api_key".to_string()));
            }
            other => panic!("expected MissingKeys, got {other:?}"),
        }
    }

    #[test]
    fn test_vault_indirection_requires_key_name() {
        let toml_str = r#"
[relay]
endpoint = "https://example.openai.azure.com"
chat_model = "gpt-4o"

[vault]
endpoint = "https://example.vault.azure.net"
"#;
        let config = RelayConfig::from_toml_str(toml_str).unwrap();
        let err = config.validate().unwrap_err();
        match err {
            ConfigError::MissingKeys(keys) => {
                assert_eq!(keys, vec!["relay.api_key_name".to_string()]);
            }
            other => panic!("expected MissingKeys, got {other:?}"),
        }
    }

    #[test]
    fn test_memory_feature_requires_embeddings_and_search_key() {
        let toml_str = r#"
[relay]
endpoint = "https://example.openai.azure.com"
chat_model = "gpt-4o"
api_key = "sk-test"

[memory]
search_endpoint = "https://example.search.windows.net"
"#;
        let config = RelayConfig::from_toml_str(toml_str).unwrap();
        let err = config.validate().unwrap_err();
        match err {
            ConfigError::MissingKeys(keys) => {
                assert!(keys.contains(&"relay.embeddings_model".to_string()));
                assert!(keys.contains(&"memory.search_api_key".to_string()));
            }
            other => panic!("expected MissingKeys, got {other:?}"),
        }
    }

    #[test]
    fn test_full_memory_vault_config_validates() {
        let toml_str = r#"
[relay]
endpoint = "https://example.openai.azure.com"
chat_model = "gpt-4o"
embeddings_model = "text-embedding-3-small"
api_key_name = "relay-api-key"

[memory]
search_endpoint = "https://example.search.windows.net"
search_api_key_name = "search-api-key"

[vault]
endpoint = "https://example.vault.azure.net"
"#;
        let config = RelayConfig::from_toml_str(toml_str).unwrap();
        let features = config.validate().unwrap();
        assert!(features.vault);
        assert!(features.memory);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = RelayConfig::from_toml_str(base_toml()).unwrap();
        config.apply_env_overrides(vec![
            ("PARLOR_CHAT_MODEL".to_string(), "gpt-4o-mini".to_string()),
            ("PARLOR_VAULT_ENDPOINT".to_string(), "https://v.example".to_string()),
            ("UNRELATED".to_string(), "ignored".to_string()),
        ]);
        assert_eq!(config.relay.chat_model.as_deref(), Some("gpt-4o-mini"));
        assert_eq!(config.vault.endpoint.as_deref(), Some("https://v.example"));
    }

    #[test]
    fn test_literal_key_wins_over_indirection() {
        let toml_str = r#"
[relay]
endpoint = "https://example.openai.azure.com"
chat_model = "gpt-4o"
api_key = "sk-literal"
api_key_name = "relay-api-key"

[vault]
endpoint = "https://example.vault.azure.net"
"#;
        let config = RelayConfig::from_toml_str(toml_str).unwrap();
        // Validation passes without consulting the vault name.
        let features = config.validate().unwrap();
        assert!(features.vault);
    }
}
