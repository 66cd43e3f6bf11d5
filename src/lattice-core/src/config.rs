use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Connection settings for a Lattice client
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout; exceeding it is reported as a connection failure
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Versioned root every API path is mounted under
    #[serde(default = "default_api_root")]
    pub api_root: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Raise `success=false` envelopes as API errors instead of reporting
    /// them as absent results / `false`
    #[serde(default)]
    pub raise_api_errors: bool,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_api_root() -> String {
    "/v1.0".to_string()
}

fn default_user_agent() -> String {
    format!("lattice-rs/{}", env!("CARGO_PKG_VERSION"))
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn load(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read client config {path}"))?;
        let config: ClientConfig = serde_json::from_str(&contents)
            .with_context(|| format!("invalid client config {path}"))?;
        Ok(config)
    }

    /// Base address joined with the API root, without a trailing slash
    pub fn api_url(&self) -> String {
        let root = self.api_root.trim_matches('/');
        let base = self.base_url.trim_end_matches('/');
        if root.is_empty() {
            base.to_string()
        } else {
            format!("{base}/{root}")
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            api_root: default_api_root(),
            user_agent: default_user_agent(),
            raise_api_errors: false,
        }
    }
}
