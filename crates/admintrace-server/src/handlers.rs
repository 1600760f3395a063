//! Route handlers.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use admintrace_core::{DistrictChangeSummary, HistoryEntry, Replacement, Unit, UnitRef};

use crate::{ApiError, AppState};

type ApiResult<T> = Result<Json<T>, ApiError>;

pub async fn healthz() -> &'static str {
    "ok"
}

/// `GET /units/{unitType}/{unitId}`
#[tracing::instrument(skip(state))]
pub async fn unit(
    State(state): State<AppState>,
    Path((unit_type, unit_id)): Path<(String, String)>,
) -> ApiResult<Unit> {
    Ok(Json(state.graph.unit(&unit_type, &unit_id).await?))
}

/// `GET /units/{unitType}/{unitId}/replacedBy`
#[tracing::instrument(skip(state))]
pub async fn replaced_by(
    State(state): State<AppState>,
    Path((unit_type, unit_id)): Path<(String, String)>,
) -> ApiResult<Vec<Replacement>> {
    let replacements = state.graph.replaced_by(&unit_type, &unit_id).await?;
    tracing::info!(count = replacements.len(), "Replacements resolved");
    Ok(Json(replacements))
}

/// `GET /units/{unitType}/{unitId}/history`
#[tracing::instrument(skip(state))]
pub async fn history(
    State(state): State<AppState>,
    Path((unit_type, unit_id)): Path<(String, String)>,
) -> ApiResult<HistoryEntry> {
    let entry = state.graph.history(&unit_type, &unit_id).await?;
    tracing::info!(
        predecessors = entry.predecessors.len(),
        successors = entry.successors.len(),
        "History resolved"
    );
    Ok(Json(entry))
}

/// `GET /districts/{districtId}/changes`
#[tracing::instrument(skip(state))]
pub async fn district_changes(
    State(state): State<AppState>,
    Path(district_id): Path<String>,
) -> ApiResult<DistrictChangeSummary> {
    Ok(Json(state.graph.district_changes(&district_id).await?))
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
}

/// `GET /search?query=<term>`
#[tracing::instrument(skip(state))]
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Vec<UnitRef>> {
    let units = state.graph.search(params.query.as_deref()).await?;
    tracing::info!(count = units.len(), "Search completed");
    Ok(Json(units))
}
