//! Core domain types for the administrative-unit graph.
//!
//! Response objects are built fresh per request from SPARQL result rows;
//! field names match the JSON contract of the HTTP API.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// ── Result rows ───────────────────────────────────────────────────

/// One RDF term in a SPARQL 1.1 JSON result row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RdfTerm {
    /// `uri`, `literal`, `typed-literal` or `bnode`.
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datatype: Option<String>,
    #[serde(
        default,
        rename = "xml:lang",
        skip_serializing_if = "Option::is_none"
    )]
    pub lang: Option<String>,
}

impl RdfTerm {
    pub fn uri(value: impl Into<String>) -> Self {
        Self {
            kind: "uri".to_string(),
            value: value.into(),
            datatype: None,
            lang: None,
        }
    }

    pub fn literal(value: impl Into<String>) -> Self {
        Self {
            kind: "literal".to_string(),
            value: value.into(),
            datatype: None,
            lang: None,
        }
    }

    pub fn typed_literal(value: impl Into<String>, datatype: impl Into<String>) -> Self {
        Self {
            kind: "typed-literal".to_string(),
            value: value.into(),
            datatype: Some(datatype.into()),
            lang: None,
        }
    }
}

/// A result row: variable name → bound term. Unbound variables are absent.
pub type RawBinding = HashMap<String, RdfTerm>;

// ── Response objects ──────────────────────────────────────────────

/// An administrative entity node (district, VDC, municipality, ...).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Unit {
    pub id: String,
    pub name: String,
    /// Lowercased local class name, never namespaced.
    #[serde(rename = "type")]
    pub unit_type: String,
}

/// A unit that succeeds another via `wasReplacedBy`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Replacement {
    pub id: String,
    #[serde(rename = "type")]
    pub unit_type: String,
}

/// Bare identifier reference used in history chains and search results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UnitRef {
    pub id: String,
}

/// The anchor of a history chain, taken from the request as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CurrentUnit {
    pub id: String,
    #[serde(rename = "type")]
    pub unit_type: String,
}

/// The replacement chain around one unit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryEntry {
    pub predecessors: Vec<UnitRef>,
    pub current: CurrentUnit,
    pub successors: Vec<UnitRef>,
}

/// Distinct old/new VDC counts under one district.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DistrictChangeSummary {
    pub district: String,
    pub num_old_units: u64,
    pub num_new_units: u64,
}
