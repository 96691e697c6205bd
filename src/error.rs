//! Error types.
//!
//! Lookups that miss, duplicate keys and disconnected graphs are ordinary
//! outcomes and never show up here.

use thiserror::Error;

/// Unknown issue category label.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown issue category: {0}")]
pub struct ParseCategoryError(pub String);

/// Unknown issue status label.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown issue status: {0}")]
pub struct ParseStatusError(pub String);

/// Rejected edge insertions. The graph is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// An endpoint name is empty or whitespace.
    #[error("area name cannot be empty")]
    EmptyAreaName,

    /// Edge weights are travel costs and must be positive.
    #[error("edge {from} <-> {to} has zero weight")]
    ZeroWeight { from: String, to: String },
}
