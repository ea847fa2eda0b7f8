//! Configuration for the bridge.
//!
//! The only environment-driven setting is the listen port; everything else
//! (upstream address, ownership table) is fixed at startup.

use anyhow::{Context, Result};
use std::collections::HashMap;

/// Base URL of the local Ollama server the bridge forwards to.
pub const OLLAMA_BASE_URL: &str = "http://127.0.0.1:11434";

/// Name of this bridge, used in synthetic `system_fingerprint` values.
pub const BRIDGE_NAME: &str = "ollama-openai-bridge";

/// Main application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Server configuration (host, port)
    pub server: ServerConfig,

    /// Base URL of the downstream Ollama server
    pub upstream_base_url: String,

    /// Request timeout in seconds for downstream calls
    pub request_timeout_secs: u64,
}

/// Server-specific configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3301
}

fn default_request_timeout() -> u64 {
    300
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Only `PORT` is read; it falls back to 3301 when unset.
    pub fn from_env() -> Result<Self> {
        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("Invalid PORT value: {}", raw))?,
            Err(_) => default_port(),
        };

        Ok(Self {
            server: ServerConfig {
                host: default_host(),
                port,
            },
            upstream_base_url: OLLAMA_BASE_URL.to_string(),
            request_timeout_secs: default_request_timeout(),
        })
    }
}

/// Immutable model-name-prefix to organization mapping.
///
/// Built once at startup and injected into the application state; lookups
/// use the substring before the first `:` of a model name (the whole name
/// when there is no colon) and fall back to `"Unknown"`.
#[derive(Debug, Clone)]
pub struct OwnershipTable {
    owners: HashMap<String, String>,
}

impl OwnershipTable {
    /// Build the table with the built-in prefix entries.
    pub fn builtin() -> Self {
        let entries = [
            ("llama2", "Meta Platforms"),
            ("llama3", "Meta Platforms"),
            ("codellama", "Meta Platforms"),
            ("mistral", "Mistral AI"),
            ("mixtral", "Mistral AI"),
            ("gemma", "Google"),
            ("phi", "Microsoft"),
            ("orca-mini", "Microsoft"),
            ("qwen", "Alibaba Cloud"),
            ("deepseek-coder", "DeepSeek"),
            ("starcoder", "BigCode"),
            ("vicuna", "LMSYS"),
            ("neural-chat", "Intel"),
        ];

        Self {
            owners: entries
                .iter()
                .map(|(prefix, org)| (prefix.to_string(), org.to_string()))
                .collect(),
        }
    }

    /// Resolve the owning organization for a full model name.
    pub fn owner_for(&self, model_name: &str) -> String {
        let prefix = model_name.split(':').next().unwrap_or(model_name);
        self.owners
            .get(prefix)
            .cloned()
            .unwrap_or_else(|| "Unknown".to_string())
    }
}
