//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps, and the error type that form
//! the vocabulary of the DEMATEL analysis domain.

mod errors;
mod ids;
mod timestamp;

pub use errors::DematelError;
pub use ids::AnalysisId;
pub use timestamp::Timestamp;
