//! Configuration management for the admintrace service.
//!
//! Configuration is loaded from (in priority order):
//! 1. Environment variables (`ADMINTRACE__` prefix, `__` separator)
//! 2. Config file (`admintrace.toml` by default)
//! 3. Defaults
//!
//! It is read once at startup; nothing here changes afterwards.

use serde::Deserialize;

use crate::error::{Result, TraceError};

/// Top-level service configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub endpoint: EndpointConfig,

    #[serde(default)]
    pub ontology: OntologyConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

/// The remote SPARQL endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct EndpointConfig {
    /// SPARQL query URL (default: "http://localhost:8890/sparql").
    #[serde(default = "default_endpoint_url")]
    pub url: String,

    /// Upper bound on a single store round-trip, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// The ontology namespace bound to the empty prefix `:` in every query.
#[derive(Debug, Clone, Deserialize)]
pub struct OntologyConfig {
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

/// Listening address for the HTTP API.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_endpoint_url() -> String {
    "http://localhost:8890/sparql".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_namespace() -> String {
    "http://nepal.admin.trace/ontology#".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    4000
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            url: default_endpoint_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for OntologyConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl AppConfig {
    /// Load from `{file_prefix}.toml` (optional) and `ADMINTRACE__*` env vars.
    pub fn load(file_prefix: &str) -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::File::with_name(file_prefix).required(false))
            .add_source(
                config::Environment::with_prefix("ADMINTRACE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let app: AppConfig = cfg.try_deserialize()?;
        app.validate()?;
        tracing::debug!(
            endpoint = %app.endpoint.url,
            namespace = %app.ontology.namespace,
            "Configuration loaded"
        );
        Ok(app)
    }

    /// Reject settings that would produce broken queries or a dead client.
    pub fn validate(&self) -> Result<()> {
        let url = &self.endpoint.url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(TraceError::Config(format!(
                "endpoint.url must be an http(s) URL, got {url:?}"
            )));
        }
        if self.endpoint.timeout_secs == 0 {
            return Err(TraceError::Config(
                "endpoint.timeout_secs must be greater than zero".to_string(),
            ));
        }

        // The namespace is spliced into `PREFIX : <...>` verbatim.
        let ns = &self.ontology.namespace;
        if ns.is_empty()
            || ns
                .chars()
                .any(|c| c.is_whitespace() || matches!(c, '<' | '>' | '"' | '{' | '}' | '\\'))
        {
            return Err(TraceError::Config(format!(
                "ontology.namespace is not a valid IRI: {ns:?}"
            )));
        }
        Ok(())
    }

    /// `host:port` string for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
