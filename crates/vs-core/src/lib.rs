//! # vs-core
//!
//! Core types, counting, and error types for vars-summary.
//!
//! This crate provides the foundational types shared across all vars-summary crates:
//! - `Concept` names and concept-list parsing
//! - Query kinds and report variants
//! - Owned `QueryResult` snapshots of drained result streams
//! - Row counting and per-concept aggregation into `ConceptCounts`
//! - Cross-cutting error types

pub mod concept;
pub mod counts;
pub mod enums;
pub mod errors;
pub mod result;

pub use concept::Concept;
pub use counts::{ConceptCounts, Report};
pub use enums::{QueryKind, ReportVariant};
pub use errors::CoreError;
pub use result::{CellValue, QueryResult};
