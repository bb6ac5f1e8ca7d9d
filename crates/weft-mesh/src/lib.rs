//! # weft-mesh
//!
//! Triangle mesh representation with Structure-of-Arrays (SoA) layout.
//!
//! ## Key Types
//!
//! - [`TriangleMesh`]: Positions, triangle indices, and named vertex groups.
//! - [`VertexGroup`]: Weighted vertex membership (pin and attachment groups).
//! - [`Topology`]: Unique edge list and edge-to-face adjacency.
//! - Procedural generators for test and benchmark meshes.

pub mod generators;
pub mod groups;
pub mod mesh;
pub mod topology;

pub use groups::VertexGroup;
pub use mesh::TriangleMesh;
pub use topology::Topology;
