//! Frame stepping: the host-facing entry points.
//!
//! [`step_frame`] runs `substeps` substeps against a fixed collider center
//! and returns the new positions. [`advance_frame`] does the same but asks a
//! [`ColliderSource`] for the center before every substep and reports what
//! happened.

use std::time::Instant;

use glam::Vec3;
use tracing::debug;

use crate::kernel::{self, SubstepStats};
use crate::state::SolverState;

/// Supplies the collider center. Queried once at the start of every substep.
pub trait ColliderSource {
    /// Center of the sphere collider for `substep` of `frame`.
    fn collider_center(&mut self, frame: u32, substep: u32) -> Vec3;
}

/// A fixed center.
impl ColliderSource for Vec3 {
    fn collider_center(&mut self, _frame: u32, _substep: u32) -> Vec3 {
        *self
    }
}

/// What happened during one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Index of the frame that was advanced.
    pub frame: u32,
    /// Substeps run.
    pub substeps: u32,
    /// Collision projections applied.
    pub contacts: u32,
    /// Deepest penetration removed (meters).
    pub max_penetration: f32,
    /// Tether corrections applied.
    pub tether_corrections: u32,
    /// Mean absolute link length error after the frame.
    pub link_deviation: f32,
    /// Wall-clock time for the frame (seconds).
    pub wall_time: f64,
}

/// Advances `state` by one frame, refreshing the collider every substep.
pub fn advance_frame(state: &mut SolverState, source: &mut dyn ColliderSource) -> FrameReport {
    let start = Instant::now();
    let frame = state.frame;
    let substeps = state.config.substeps;
    let dt = state.config.substep_dt();

    let mut stats = SubstepStats::default();
    for s in 0..substeps {
        state.collider.center = source.collider_center(frame, s);
        stats.merge(kernel::substep(state, dt));
    }
    state.frame += 1;

    let report = FrameReport {
        frame,
        substeps,
        contacts: stats.contacts,
        max_penetration: stats.max_penetration,
        tether_corrections: stats.tether_corrections,
        link_deviation: state.link_deviation(),
        wall_time: start.elapsed().as_secs_f64(),
    };
    debug!(
        frame,
        contacts = report.contacts,
        tethers = report.tether_corrections,
        deviation = report.link_deviation,
        "frame advanced"
    );
    report
}

/// Advances `state` by one frame with the collider held at
/// `collider_center`, returning the updated positions.
pub fn step_frame(state: &mut SolverState, collider_center: Vec3) -> &[Vec3] {
    let mut source = collider_center;
    advance_frame(state, &mut source);
    state.positions()
}
