//! admintrace-graph — SPARQL access layer for the administrative-unit graph.
//!
//! Every store read flows through this crate: request parameters are turned
//! into validated tokens, the tokens into query text, the query text into
//! result rows via a [`SparqlEndpoint`], and the rows into response objects.

pub mod builder;
pub mod client;
pub mod mapping;
pub mod params;
pub mod queries;

pub use client::{EndpointClient, GraphConfig, GraphError, SparqlEndpoint};
pub use queries::AdminGraph;
