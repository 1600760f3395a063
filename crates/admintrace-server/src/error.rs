//! Error → HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use admintrace_core::TraceError;

/// Body returned to clients for store-side failures; causes stay in the logs.
const OPAQUE_SERVER_ERROR: &str = "query execution error";

/// The one place a `TraceError` becomes a status code.
pub fn status_for(err: &TraceError) -> StatusCode {
    match err {
        TraceError::InvalidArgument(_) | TraceError::InjectionRisk { .. } => {
            StatusCode::BAD_REQUEST
        }
        TraceError::NotFound(_) => StatusCode::NOT_FOUND,
        TraceError::QueryExecution { .. }
        | TraceError::MalformedResult(_)
        | TraceError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Handler error wrapper so `?` works on `TraceError` results.
#[derive(Debug)]
pub struct ApiError(pub TraceError);

impl From<TraceError> for ApiError {
    fn from(e: TraceError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        let message = if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self.0, "Request failed");
            OPAQUE_SERVER_ERROR.to_string()
        } else {
            tracing::warn!(status = status.as_u16(), error = %self.0, "Request rejected");
            self.0.to_string()
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_table() {
        let cases = [
            (
                TraceError::InvalidArgument("missing".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                TraceError::InjectionRisk {
                    param: "unitId",
                    reason: "quote".into(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (TraceError::NotFound("D9".into()), StatusCode::NOT_FOUND),
            (
                TraceError::execution(anyhow::anyhow!("refused")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                TraceError::MalformedResult("?numOld".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(status_for(&err), expected, "{err}");
        }
    }

    #[test]
    fn test_execution_error_response_status() {
        let response =
            ApiError(TraceError::execution(anyhow::anyhow!("secret-host:8890 refused")))
                .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
