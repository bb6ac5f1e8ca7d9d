//! # weft-io
//!
//! Scene contract, input validation, and frame export.
//!
//! Defines the boundary types that external systems (CLI, asset pipeline)
//! use to hand a cloth scene to the solver and read frames back.

pub mod contract;
pub mod export;
pub mod validator;

pub use contract::{load_config, ColliderTrack, ScheduledCollider, SimulationInput};
pub use export::JsonFrameExporter;
pub use validator::validate_input;
