//! Scene validation.
//!
//! Validates simulation inputs before the solver receives them,
//! catching data-level errors early with clear diagnostics.

use weft_mesh::Topology;
use weft_types::{WeftError, WeftResult};

use crate::contract::SimulationInput;

/// Validates a complete simulation input.
///
/// Checks:
/// - Mesh integrity (SoA consistency, valid indices, group ranges)
/// - Mesh is non-empty and every edge borders at most two faces
/// - Solver parameters
/// - The pin group exists, and the attachment group when LRA is enabled
/// - Collider track is finite and at least one frame is requested
pub fn validate_input(input: &SimulationInput) -> WeftResult<()> {
    let mesh = &input.mesh;
    mesh.validate()?;

    if mesh.vertex_count() == 0 {
        return Err(WeftError::InvalidMesh("Mesh has no vertices".into()));
    }

    let topology = Topology::build(mesh);
    let non_manifold = topology.non_manifold_edge_count();
    if non_manifold > 0 {
        return Err(WeftError::InvalidMesh(format!(
            "{non_manifold} edge(s) are shared by more than two faces"
        )));
    }

    input.config.validate()?;

    if mesh.group(&input.pin_group).is_none() {
        return Err(WeftError::MissingVertexGroup(input.pin_group.clone()));
    }

    if input.config.long_range_attachment {
        let name = input.attach_group.as_deref().ok_or_else(|| {
            WeftError::InvalidConfig(
                "Long-range attachment is enabled but no attachment group was named".into(),
            )
        })?;
        if mesh.group(name).is_none() {
            return Err(WeftError::MissingVertexGroup(name.to_string()));
        }
    }

    if !input.collider.is_finite() {
        return Err(WeftError::InvalidConfig(
            "Collider track has non-finite coordinates".into(),
        ));
    }

    if input.frame_count == 0 {
        return Err(WeftError::InvalidConfig(
            "Frame count must be >= 1".into(),
        ));
    }

    Ok(())
}
