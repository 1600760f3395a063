//! admintrace-server: HTTP surface for the administrative-unit graph.
//!
//! Handlers are thin: they pass path/query parameters to [`AdminGraph`],
//! serialize what comes back, and map failures through [`error::status_for`].

pub mod error;
pub mod handlers;

use axum::routing::get;
use axum::Router;

use admintrace_graph::AdminGraph;

pub use error::ApiError;

/// Shared router state. Clone is cheap.
#[derive(Clone)]
pub struct AppState {
    pub graph: AdminGraph,
}

impl AppState {
    pub fn new(graph: AdminGraph) -> Self {
        Self { graph }
    }
}

/// Build the API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(handlers::healthz))
        .route("/units/{unit_type}/{unit_id}", get(handlers::unit))
        .route(
            "/units/{unit_type}/{unit_id}/replacedBy",
            get(handlers::replaced_by),
        )
        .route("/units/{unit_type}/{unit_id}/history", get(handlers::history))
        .route(
            "/districts/{district_id}/changes",
            get(handlers::district_changes),
        )
        .route("/search", get(handlers::search))
        .with_state(state)
}
