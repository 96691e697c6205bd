//! civic-index core
//!
//! In-memory indices and service-area routing over municipal issue snapshots.

pub mod traits;
pub mod error;
pub mod issue;
pub mod priority_queue;
pub mod ticket_index;
pub mod recency_index;
pub mod graph;
pub mod topology;
pub mod coordinator;
