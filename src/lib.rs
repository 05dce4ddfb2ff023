//! DEMATEL analysis engine.
//!
//! This crate derives cause/effect structure from a square pairwise
//! influence matrix: normalization, total-relation derivation via a matrix
//! inverse, per-factor prominence and net effect, and the cause/effect
//! partition. Presentation (rendering, charting, file handling) is left to
//! the embedding application.

pub mod domain;
pub mod io;
