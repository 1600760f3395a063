//! SPARQL endpoint connection and the shared endpoint client.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use admintrace_core::{AppConfig, RawBinding, TraceError};

/// Media type requested from the store.
pub const SPARQL_RESULTS_JSON: &str = "application/sparql-results+json";

/// Longest store error body kept in a `GraphError`.
const MAX_ERROR_BODY: usize = 512;

/// Errors from talking to the SPARQL endpoint.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("SPARQL transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("SPARQL endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode SPARQL results: {0}")]
    Decode(String),
}

impl From<GraphError> for TraceError {
    fn from(e: GraphError) -> Self {
        TraceError::execution(e)
    }
}

/// Configuration for connecting to the SPARQL endpoint.
#[derive(Debug, Clone)]
pub struct GraphConfig {
    pub endpoint_url: String,
    pub namespace: String,
    pub timeout: Duration,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for GraphConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            endpoint_url: config.endpoint.url.clone(),
            namespace: config.ontology.namespace.clone(),
            timeout: Duration::from_secs(config.endpoint.timeout_secs),
        }
    }
}

/// A store that answers SPARQL SELECT queries.
///
/// `query` is the query body without prefix declarations; implementations
/// bind the ontology prefix themselves.
#[async_trait]
pub trait SparqlEndpoint: Send + Sync {
    async fn select(&self, query: &str) -> Result<Vec<RawBinding>, GraphError>;
}

/// SPARQL 1.1 JSON results document. Only the bindings are used.
#[derive(Debug, Deserialize)]
struct SparqlResults {
    results: ResultSet,
}

#[derive(Debug, Deserialize)]
struct ResultSet {
    bindings: Vec<RawBinding>,
}

/// HTTP client for a single remote SPARQL endpoint.
///
/// Clone is cheap (inner Arc); the underlying connection pool is shared, so
/// one instance serves all in-flight requests.
#[derive(Clone)]
pub struct EndpointClient {
    http: reqwest::Client,
    endpoint_url: String,
    prefix: String,
}

impl EndpointClient {
    /// Build a client for the configured endpoint. Does not contact the store.
    pub fn new(config: &GraphConfig) -> Result<Self, GraphError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;

        tracing::info!(
            endpoint = %config.endpoint_url,
            timeout_secs = config.timeout.as_secs(),
            "SPARQL endpoint client ready"
        );
        Ok(Self {
            http,
            endpoint_url: config.endpoint_url.clone(),
            prefix: prefix_declaration(&config.namespace),
        })
    }

    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }

    /// The full query text sent to the store for `query`.
    pub fn compose(&self, query: &str) -> String {
        format!("{}{}", self.prefix, query)
    }

    async fn send(&self, text: &str) -> Result<Vec<RawBinding>, GraphError> {
        let response = self
            .http
            .post(&self.endpoint_url)
            .header(reqwest::header::ACCEPT, SPARQL_RESULTS_JSON)
            .form(&[("query", text)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GraphError::Status {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY).collect(),
            });
        }

        let bytes = response.bytes().await?;
        let results: SparqlResults =
            serde_json::from_slice(&bytes).map_err(|e| GraphError::Decode(e.to_string()))?;
        Ok(results.results.bindings)
    }
}

#[async_trait]
impl SparqlEndpoint for EndpointClient {
    async fn select(&self, query: &str) -> Result<Vec<RawBinding>, GraphError> {
        let text = self.compose(query);
        match self.send(&text).await {
            Ok(rows) => {
                tracing::debug!(rows = rows.len(), "SPARQL query succeeded");
                Ok(rows)
            }
            Err(e) => {
                tracing::error!(
                    endpoint = %self.endpoint_url,
                    error = %e,
                    "SPARQL query failed"
                );
                Err(e)
            }
        }
    }
}

/// `PREFIX : <namespace>` line bound in front of every query.
pub fn prefix_declaration(namespace: &str) -> String {
    format!("PREFIX : <{namespace}>\n")
}
