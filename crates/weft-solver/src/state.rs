//! Solver state: everything the kernel reads and writes.
//!
//! A `SolverState` is produced by [`crate::builder::initialize`] and then
//! passed by `&mut` into the frame functions. Positions, predictions and
//! velocities are mutated every substep; links, attachments, inverse
//! masses and the configuration are fixed after construction.

use glam::Vec3;

use crate::collider::SphereCollider;
use crate::config::SolverConfig;
use crate::constraints::{Attachments, Link};

/// Owned PBD cloth state.
///
/// # Layout
///
/// All per-vertex arrays have length `vertex_count()`:
/// ```text
/// positions:  [x0, x1, x2, ...]   committed positions
/// predicted:  [p0, p1, p2, ...]   scratch for the current substep
/// velocities: [v0, v1, v2, ...]
/// inv_mass:   [w0, w1, w2, ...]   0 = pinned
/// ```
#[derive(Debug, Clone)]
pub struct SolverState {
    // ─── Per-vertex ───
    /// Committed positions `x`.
    pub positions: Vec<Vec3>,
    /// Predicted positions `p`.
    pub predicted: Vec<Vec3>,
    /// Velocities `v`.
    pub velocities: Vec<Vec3>,
    /// Inverse masses `w`.
    pub inv_mass: Vec<f32>,

    // ─── Constraints ───
    /// Stretch links followed by bend links.
    pub links: Vec<Link>,
    /// Number of links touching each vertex. Used by the Jacobi schedule.
    pub link_degree: Vec<u32>,
    /// Long-range attachments, present only when enabled.
    pub attachments: Option<Attachments>,

    // ─── Scene ───
    /// Sphere obstacle. The center is refreshed every substep.
    pub collider: SphereCollider,

    /// Configuration snapshot from initialization.
    pub config: SolverConfig,

    /// Frames advanced so far.
    pub frame: u32,

    /// Per-vertex accumulation buffer for the Jacobi link schedule.
    pub(crate) link_delta: Vec<Vec3>,
}

impl SolverState {
    /// Assembles a state from already-built parts. Velocities start at zero.
    pub fn new(
        positions: Vec<Vec3>,
        inv_mass: Vec<f32>,
        links: Vec<Link>,
        attachments: Option<Attachments>,
        config: SolverConfig,
    ) -> Self {
        let n = positions.len();
        let mut link_degree = vec![0u32; n];
        for link in &links {
            for v in link.endpoints {
                link_degree[v.index()] += 1;
            }
        }

        Self {
            predicted: positions.clone(),
            velocities: vec![Vec3::ZERO; n],
            positions,
            inv_mass,
            links,
            link_degree,
            attachments,
            collider: SphereCollider::new(Vec3::ZERO, config.collision_radius),
            config,
            frame: 0,
            link_delta: vec![Vec3::ZERO; n],
        }
    }

    /// Number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of links (stretch + bend).
    #[inline]
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Number of attachment anchors (0 when LRA is disabled).
    #[inline]
    pub fn attachment_count(&self) -> usize {
        self.attachments.as_ref().map_or(0, Attachments::len)
    }

    /// Committed vertex positions.
    #[inline]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Returns true if vertex `i` is never moved by corrections.
    #[inline]
    pub fn is_immovable(&self, i: usize) -> bool {
        self.inv_mass[i] <= self.config.inv_mass_epsilon
    }

    /// Simulated time (seconds) at the start of the next frame.
    #[inline]
    pub fn sim_time(&self) -> f64 {
        self.frame as f64 * self.config.frame_time as f64
    }

    /// Mean absolute deviation of link lengths from rest lengths,
    /// measured on the committed positions.
    pub fn link_deviation(&self) -> f32 {
        mean_link_deviation(&self.links, &self.positions)
    }

    /// Total kinetic energy: `0.5 * Σ m_i * ||v_i||²` with `m = 1/w`,
    /// skipping immovable vertices.
    pub fn kinetic_energy(&self) -> f64 {
        let eps = self.config.inv_mass_epsilon;
        self.velocities
            .iter()
            .zip(&self.inv_mass)
            .filter(|(_, &w)| w > eps)
            .map(|(v, &w)| 0.5 * v.length_squared() as f64 / w as f64)
            .sum()
    }
}

fn mean_link_deviation(links: &[Link], positions: &[Vec3]) -> f32 {
    if links.is_empty() {
        return 0.0;
    }
    let total: f64 = links
        .iter()
        .map(|l| (l.length(positions) - l.rest_length).abs() as f64)
        .sum();
    (total / links.len() as f64) as f32
}
