use thiserror::Error;

/// Top-level error type for the admintrace request path.
///
/// Every failure a request can hit is one of these variants; the server
/// crate maps each variant to exactly one HTTP status.
#[derive(Error, Debug)]
pub enum TraceError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Rejected parameter {param}: {reason}")]
    InjectionRisk { param: &'static str, reason: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Query execution error: {source}")]
    QueryExecution {
        #[source]
        source: anyhow::Error,
    },

    #[error("Malformed result: {0}")]
    MalformedResult(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl TraceError {
    /// Wrap any store-side failure as a `QueryExecution` error.
    pub fn execution(source: impl Into<anyhow::Error>) -> Self {
        Self::QueryExecution {
            source: source.into(),
        }
    }

    /// True for errors caused by the caller's input rather than the store.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument(_) | Self::InjectionRisk { .. } | Self::NotFound(_)
        )
    }
}

impl From<config::ConfigError> for TraceError {
    fn from(e: config::ConfigError) -> Self {
        Self::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TraceError>;
