//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors)
//! - `analysis` - Pure domain services for DEMATEL analysis

pub mod analysis;
pub mod foundation;
