//! admintrace-core: Shared types, configuration, and error handling for the admintrace API.
//!
//! This crate provides the foundational pieces used by the graph and server crates:
//! - Domain types (Unit, Replacement, HistoryEntry, DistrictChangeSummary)
//! - The SPARQL JSON result row shape (`RawBinding`, `RdfTerm`)
//! - Configuration loading
//! - The error taxonomy shared across the request path

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{Result, TraceError};
pub use types::{
    CurrentUnit, DistrictChangeSummary, HistoryEntry, RawBinding, RdfTerm, Replacement, Unit,
    UnitRef,
};
