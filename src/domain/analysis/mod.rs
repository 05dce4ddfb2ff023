//! Analysis Module - Pure domain services for DEMATEL analysis.
//!
//! This module contains stateless functions that operate on domain objects
//! to derive cause/effect structure from a pairwise-influence matrix.
//!
//! # Components
//!
//! - `InfluenceMatrix` - Labeled square matrix of direct pairwise influences
//! - `DematelEngine` - Normalization, total-relation derivation, summaries
//! - `FactorSummary` / `CauseEffectPartition` - Per-factor measures and groups
//! - `AnalysisReport` - Every derived table bundled under one run identity
//!
//! # Design Philosophy
//!
//! All functions are pure (no side effects) and stateless. They take domain
//! objects as input and return computed results. No ports or adapters needed
//! since there's no I/O or external dependencies.

mod engine;
mod influence_matrix;
mod report;
mod summary;
mod tables;

// Re-export all public types
pub use engine::{
    DematelEngine, NormalizedMatrix, TotalRelationMatrix, SINGULARITY_EPSILON,
};
pub use influence_matrix::{InfluenceMatrix, InfluenceMatrixBuilder};
pub use report::{chart_records, AnalysisReport, ChartRecord};
pub use summary::{CauseEffectPartition, FactorRole, FactorSummary, Measure};
