//! Test fixtures for civic-index.
//!
//! Provides a small ward dataset and builders for issue snapshots with
//! explicit timestamps.

pub mod ward_issues;

pub use ward_issues::*;
