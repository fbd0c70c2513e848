//! Startup wiring: secret resolution and engine construction.
//!
//! Fail-fast: configuration validation and every named-secret lookup
//! happen here, before any client is constructed. A failure at this
//! stage aborts the session with the "credentials not found" notice and
//! no remote call is ever issued.

use std::sync::Arc;

use anyhow::Context;
use console::style;
use secrecy::SecretString;
use tracing::info;

use parlor_core::llm::BoxChatProvider;
use parlor_core::memory::{BoxEmbedder, BoxMemoryStore, RecallTool};
use parlor_core::relay::{EngineOptions, RelayEngine};
use parlor_core::secret::BoxSecretStore;
use parlor_core::tool::{CurrentTimeTool, ToolRegistry};
use parlor_infra::llm::RemoteChatProvider;
use parlor_infra::memory::{RemoteEmbedder, SearchMemoryClient};
use parlor_infra::secret::{EnvSecretStore, SecretChain, VaultClient};
use parlor_types::config::RelayConfig;

/// Environment variable carrying the ambient vault credential.
const VAULT_TOKEN_VAR: &str = "PARLOR_VAULT_TOKEN";

/// Everything the chat loop needs, built from validated configuration.
pub struct Session {
    pub engine: RelayEngine,
    pub model: String,
    pub memory_enabled: bool,
}

/// Validate configuration, resolve secrets, and construct the engine.
pub async fn build_session(
    config: &RelayConfig,
    model_override: Option<String>,
) -> anyhow::Result<Session> {
    let features = config.validate()?;

    // Required keys were validated above; the defaults below are
    // unreachable.
    let endpoint = config.relay.endpoint.clone().unwrap_or_default();
    let model = model_override
        .or_else(|| config.relay.chat_model.clone())
        .unwrap_or_default();

    let chain = build_secret_chain(config, features.vault)?;

    let api_key = match &config.relay.api_key {
        Some(literal) => literal.clone(),
        None => {
            let name = config
                .relay
                .api_key_name
                .as_deref()
                .unwrap_or_default();
            chain
                .resolve(name)
                .await
                .context("resolving completion service API key")?
        }
    };

    let provider = RemoteChatProvider::new(&endpoint, &model, SecretString::from(api_key.clone()));

    let mut tools = ToolRegistry::new();
    tools.register(CurrentTimeTool::new());

    if features.memory {
        let search_endpoint = config.memory.search_endpoint.clone().unwrap_or_default();
        let embeddings_model = config.relay.embeddings_model.clone().unwrap_or_default();

        let search_key = match &config.memory.search_api_key {
            Some(literal) => literal.clone(),
            None => {
                let name = config
                    .memory
                    .search_api_key_name
                    .as_deref()
                    .unwrap_or_default();
                chain
                    .resolve(name)
                    .await
                    .context("resolving search service API key")?
            }
        };

        let embedder = BoxEmbedder::new(RemoteEmbedder::new(
            &endpoint,
            SecretString::from(api_key),
            embeddings_model,
        ));
        let store = BoxMemoryStore::new(SearchMemoryClient::new(
            search_endpoint,
            SecretString::from(search_key),
            config.memory.index.clone(),
        ));
        tools.register(RecallTool::new(Arc::new(embedder), Arc::new(store)));
        info!("memory recall capability registered");
    }

    let mut options = EngineOptions::new(&model);
    options.temperature = config.relay.temperature;
    options.max_tokens = config.relay.max_tokens;

    Ok(Session {
        engine: RelayEngine::new(BoxChatProvider::new(provider), tools, options),
        model,
        memory_enabled: features.memory,
    })
}

/// Build the secret resolution chain: environment first, then the vault
/// when one is configured.
fn build_secret_chain(config: &RelayConfig, vault: bool) -> anyhow::Result<SecretChain> {
    let mut stores = vec![BoxSecretStore::new(EnvSecretStore::new())];

    if vault {
        let endpoint = config.vault.endpoint.clone().unwrap_or_default();
        let credential = std::env::var(VAULT_TOKEN_VAR).map_err(|_| {
            anyhow::anyhow!("vault credential not found (set {VAULT_TOKEN_VAR})")
        })?;
        stores.push(BoxSecretStore::new(VaultClient::new(
            endpoint,
            SecretString::from(credential),
        )));
    }

    Ok(SecretChain::new(stores))
}

/// `parlor check`: validate configuration and secret resolution without
/// starting the loop. With `--ping`, also issue one tiny non-streaming
/// completion as a connectivity probe.
pub async fn check(ping: bool) -> anyhow::Result<()> {
    let config = crate::config_loader::load()?;

    let check_mark = |ok: bool| {
        if ok {
            format!("{}", style("ok").green())
        } else {
            format!("{}", style("missing").red())
        }
    };

    println!();
    println!("  {} Configuration", style("Parlor").cyan().bold());
    println!();
    println!(
        "  endpoint         {}",
        check_mark(config.relay.endpoint.is_some())
    );
    println!(
        "  chat model       {}",
        check_mark(config.relay.chat_model.is_some())
    );
    println!(
        "  api key          {}",
        check_mark(config.relay.api_key.is_some() || config.relay.api_key_name.is_some())
    );

    let features = config.features();
    if features.vault {
        println!(
            "  vault endpoint   {}",
            check_mark(config.vault.endpoint.is_some())
        );
    }
    if features.memory {
        println!(
            "  search endpoint  {}",
            check_mark(config.memory.search_endpoint.is_some())
        );
        println!(
            "  embeddings model {}",
            check_mark(config.relay.embeddings_model.is_some())
        );
    }
    println!();

    let session = match build_session(&config, None).await {
        Ok(session) => session,
        Err(e) => {
            println!("  {} {e:#}", style("✗").red().bold());
            println!();
            return Err(e);
        }
    };

    println!(
        "  {} ready: model {} ({})",
        style("✓").green().bold(),
        style(&session.model).cyan(),
        if session.memory_enabled {
            "chat + memory"
        } else {
            "chat"
        }
    );

    if ping {
        use parlor_types::llm::{Role, WireMessage};
        let response = session
            .engine
            .complete_once(vec![WireMessage::text(Role::User, "Reply with one word: pong")])
            .await
            .context("connectivity probe failed")?;
        println!(
            "  {} probe: {} ({} tokens)",
            style("✓").green().bold(),
            style(response.content.trim()).dim(),
            response.usage.output_tokens
        );
    }

    println!();
    Ok(())
}
