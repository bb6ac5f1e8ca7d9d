//! Topology builder: turns a mesh into solver state.
//!
//! Runs once per simulation. Produces, in order:
//! 1. positions and inverse masses (`w = 1 - pin_weight` for pin-group members)
//! 2. attachment anchors and tether rest lengths (only with LRA enabled)
//! 3. one stretch link per mesh edge
//! 4. two bend links per face, between face vertices (0, 1) and (1, 2)
//!
//! On any precondition failure nothing is returned but the error.

use glam::Vec3;
use tracing::{info, warn};
use weft_mesh::{Topology, TriangleMesh, VertexGroup};
use weft_types::constants::DEGENERATE_LENGTH;
use weft_types::{WeftError, WeftResult};

use crate::config::SolverConfig;
use crate::constraints::{Attachments, Link, LinkKind};
use crate::state::SolverState;

/// Builds solver state from a mesh, its topology, and vertex groups.
///
/// `attachments` is only read when `config.long_range_attachment` is set,
/// and is then required.
pub fn initialize(
    mesh: &TriangleMesh,
    topology: &Topology,
    pins: &VertexGroup,
    attachments: Option<&VertexGroup>,
    config: &SolverConfig,
) -> WeftResult<SolverState> {
    config.validate()?;
    mesh.validate()?;

    let n = mesh.vertex_count();
    if n == 0 {
        return Err(WeftError::InvalidMesh("Mesh has no vertices".into()));
    }

    let non_manifold = topology.non_manifold_edge_count();
    if non_manifold > 0 {
        return Err(WeftError::InvalidMesh(format!(
            "{non_manifold} edge(s) are shared by more than two faces"
        )));
    }
    if let Some(&[a, b]) = topology
        .edges
        .iter()
        .find(|&&[a, b]| a as usize >= n || b as usize >= n || a == b)
    {
        return Err(WeftError::InvalidMesh(format!(
            "Edge [{a}, {b}] is degenerate or out of range (vertex count: {n})"
        )));
    }

    // Groups passed in directly are not covered by `mesh.validate()`.
    pins.validate(n)?;
    if config.long_range_attachment {
        if let Some(group) = attachments {
            group.validate(n)?;
        }
    }

    let positions = mesh.positions();
    let inv_mass = inverse_masses(n, pins);

    let attachments = if config.long_range_attachment {
        let group = attachments.ok_or_else(|| {
            WeftError::InvalidConfig(
                "Long-range attachment is enabled but no attachment group was given".into(),
            )
        })?;
        let anchors: Vec<u32> = group.vertices();
        if anchors.is_empty() {
            warn!(group = %group.name, "attachment group is empty; tethers disabled");
        }
        Some(Attachments::build(&positions, &anchors))
    } else {
        None
    };

    let links = build_links(mesh, topology, &positions, config);

    let degenerate = links
        .iter()
        .filter(|l| l.rest_length < DEGENERATE_LENGTH)
        .count();
    if degenerate > 0 {
        warn!(degenerate, "links with zero rest length will never correct");
    }

    let state = SolverState::new(positions, inv_mass, links, attachments, config.clone());

    info!(
        vertices = state.vertex_count(),
        links = state.link_count(),
        anchors = state.attachment_count(),
        boundary_edges = topology.boundary_edge_count(),
        execution = config.execution.name(),
        "cloth solver initialized"
    );
    if config.execution.is_parallel() && !config.execution.uses_threads() {
        warn!("parallel execution requested without the `parallel` feature; running the same schedule on one thread");
    }

    Ok(state)
}

/// Resolves vertex groups by name on the mesh, then calls [`initialize`].
///
/// Fails with [`WeftError::MissingVertexGroup`] if the pin group, or the
/// attachment group while LRA is enabled, does not exist.
pub fn initialize_from_groups(
    mesh: &TriangleMesh,
    pin_group: &str,
    attach_group: Option<&str>,
    config: &SolverConfig,
) -> WeftResult<SolverState> {
    let pins = mesh
        .group(pin_group)
        .ok_or_else(|| WeftError::MissingVertexGroup(pin_group.to_string()))?;

    let attachments = match (config.long_range_attachment, attach_group) {
        (true, Some(name)) => Some(
            mesh.group(name)
                .ok_or_else(|| WeftError::MissingVertexGroup(name.to_string()))?,
        ),
        (true, None) => {
            return Err(WeftError::InvalidConfig(
                "Long-range attachment is enabled but no attachment group was named".into(),
            ));
        }
        (false, _) => None,
    };

    let topology = Topology::build(mesh);
    initialize(mesh, &topology, pins, attachments, config)
}

/// `1.0` everywhere, `1 - weight` for members of the pin group.
fn inverse_masses(vertex_count: usize, pins: &VertexGroup) -> Vec<f32> {
    pins.membership(vertex_count)
        .into_iter()
        .map(|weight| weight.map_or(1.0, |w| 1.0 - w))
        .collect()
}

/// Stretch links for every edge, then two bend links per face.
fn build_links(
    mesh: &TriangleMesh,
    topology: &Topology,
    positions: &[Vec3],
    config: &SolverConfig,
) -> Vec<Link> {
    let rest = |a: u32, b: u32| positions[a as usize].distance(positions[b as usize]);

    let mut links = Vec::with_capacity(topology.edge_count() + 2 * mesh.triangle_count());

    for &[a, b] in &topology.edges {
        links.push(Link::new(a, b, rest(a, b), config.stretch_stiffness, LinkKind::Stretch));
    }

    for t in 0..mesh.triangle_count() {
        let face = mesh.triangle(t);
        for j in 0..2 {
            let (a, b) = (face[j], face[j + 1]);
            links.push(Link::new(a, b, rest(a, b), config.bend_stiffness, LinkKind::Bend));
        }
    }

    links
}
