//! Read operations over the administrative-unit graph.

use std::sync::Arc;

use admintrace_core::{
    DistrictChangeSummary, HistoryEntry, RawBinding, Replacement, Result, TraceError, Unit,
    UnitRef,
};

use crate::builder::{self, SEARCH_LIMIT};
use crate::client::SparqlEndpoint;
use crate::mapping;
use crate::params::{LocalName, SearchTerm, UnitType};

/// Validates parameters, runs the matching query, and maps the rows.
///
/// Clone is cheap; the endpoint is shared.
#[derive(Clone)]
pub struct AdminGraph {
    endpoint: Arc<dyn SparqlEndpoint>,
    namespace: String,
}

impl AdminGraph {
    pub fn new(endpoint: Arc<dyn SparqlEndpoint>, namespace: impl Into<String>) -> Self {
        Self {
            endpoint,
            namespace: namespace.into(),
        }
    }

    async fn select(&self, op: &'static str, query: String) -> Result<Vec<RawBinding>> {
        tracing::debug!(op, %query, "Running SPARQL query");
        let rows = self.endpoint.select(&query).await?;
        tracing::debug!(op, rows = rows.len(), "SPARQL query returned");
        Ok(rows)
    }

    // ── Replacement Lookups ──────────────────────────────────────

    /// Units that replaced the `unit_type` unit whose IRI ends with `unit_id`.
    pub async fn replaced_by(&self, unit_type: &str, unit_id: &str) -> Result<Vec<Replacement>> {
        let unit_type = UnitType::parse(unit_type)?;
        let unit_id = LocalName::parse("unitId", unit_id)?;

        let rows = self
            .select("replaced_by", builder::replaced_by(&unit_type, &unit_id))
            .await?;
        rows.iter()
            .map(|row| mapping::to_replacement(row, unit_type.as_str()))
            .collect()
    }

    /// Predecessors and successors around a unit.
    ///
    /// `current` echoes the request; the unit's existence is not checked.
    pub async fn history(&self, unit_type: &str, unit_id: &str) -> Result<HistoryEntry> {
        let unit_type = UnitType::parse(unit_type)?;
        let unit_id = LocalName::parse("unitId", unit_id)?;

        let (preds, succs) = tokio::try_join!(
            self.select("history_predecessors", builder::predecessors(&unit_id)),
            self.select("history_successors", builder::successors(&unit_id)),
        )?;
        mapping::to_history_entry(&preds, &succs, unit_type.as_str(), unit_id.as_str())
    }

    // ── Aggregates ───────────────────────────────────────────────

    /// Counts of replaced VDCs and their replacements under a district.
    pub async fn district_changes(&self, district_id: &str) -> Result<DistrictChangeSummary> {
        let district = LocalName::parse("districtId", district_id)?;

        let rows = self
            .select("district_changes", builder::district_changes(&district))
            .await?;
        match rows.first() {
            Some(row) => mapping::to_district_change_summary(row, district.as_str()),
            None => Err(TraceError::NotFound(format!(
                "no change record for district {}",
                district.as_str()
            ))),
        }
    }

    // ── Unit Lookups ─────────────────────────────────────────────

    /// A single unit of the given class, with its label and type.
    pub async fn unit(&self, unit_type: &str, unit_id: &str) -> Result<Unit> {
        let unit_type = UnitType::parse(unit_type)?;
        let unit_id = LocalName::parse("unitId", unit_id)?;

        let rows = self
            .select("unit", builder::unit(&unit_type, &unit_id))
            .await?;
        match rows.first() {
            Some(row) => mapping::to_unit(row, &self.namespace),
            None => Err(TraceError::NotFound(format!(
                "no {} matching {}",
                unit_type.as_str(),
                unit_id.as_str()
            ))),
        }
    }

    // ── Full-Text Search ─────────────────────────────────────────

    /// Subjects whose IRI contains `term`, in store order, at most 50.
    pub async fn search(&self, term: Option<&str>) -> Result<Vec<UnitRef>> {
        let term = SearchTerm::parse(term)?;

        let rows = self.select("search", builder::search(&term)).await?;
        rows.iter()
            .take(SEARCH_LIMIT)
            .map(|row| mapping::to_unit_ref(row, "unit"))
            .collect()
    }
}
