//! # weft-types
//!
//! Shared types, identifiers, error types, and simulation defaults
//! for the weft cloth solver.
//!
//! This crate has zero domain logic: it defines the vocabulary
//! that all other weft crates share.

pub mod constants;
pub mod error;
pub mod ids;

pub use error::{WeftError, WeftResult};
pub use ids::VertexId;
