//! # weft-solver
//!
//! Position-based dynamics cloth solver.
//!
//! ## Key Types
//!
//! - [`SolverConfig`]: Every tuning parameter, with documented defaults
//! - [`initialize`]: Topology builder: mesh + vertex groups → [`SolverState`]
//! - [`SolverState`]: Owned per-vertex buffers and immutable constraints
//! - [`step_frame`] / [`advance_frame`]: One frame of substeps
//! - [`FrameDriver`]: Multi-frame loop with a [`MeshSink`] and telemetry
//! - [`ExecutionStrategy`]: Serial or parallel scheduling of the one kernel
//!
//! ```
//! use glam::Vec3;
//! use weft_mesh::{generators::quad_grid, VertexGroup};
//! use weft_solver::{initialize_from_groups, step_frame, SolverConfig};
//!
//! let mut mesh = quad_grid(4, 4, 1.0, 1.0);
//! mesh.add_group(VertexGroup::uniform("pin", [0, 4]));
//! let mut state = initialize_from_groups(&mesh, "pin", None, &SolverConfig::default()).unwrap();
//! let positions = step_frame(&mut state, Vec3::new(0.0, 0.0, -10.0));
//! assert_eq!(positions.len(), 25);
//! ```

pub mod builder;
pub mod collider;
pub mod config;
pub mod constraints;
pub mod driver;
pub mod frame;
pub mod kernel;
pub mod state;
pub mod strategy;

pub use builder::{initialize, initialize_from_groups};
pub use collider::SphereCollider;
pub use config::SolverConfig;
pub use constraints::{Attachments, Link, LinkKind};
pub use driver::{FrameDriver, FrameRecorder, MeshSink, RunSummary};
pub use frame::{advance_frame, step_frame, ColliderSource, FrameReport};
pub use state::SolverState;
pub use strategy::ExecutionStrategy;
