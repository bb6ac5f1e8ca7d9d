//! Solver configuration.
//!
//! Every tuning value the kernel reads lives here, with defaults from
//! `weft_types::constants`. The configuration is copied into the solver
//! state at initialization and is immutable for the rest of the run.

use serde::{Deserialize, Serialize};
use weft_types::constants;
use weft_types::{WeftError, WeftResult};

use crate::strategy::ExecutionStrategy;

/// Configuration for the PBD cloth solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Duration of one frame (seconds). Each substep lasts
    /// `frame_time / substeps`.
    pub frame_time: f32,

    /// Substeps per frame.
    pub substeps: u32,

    /// Constraint relaxation iterations per substep.
    pub solver_iterations: u32,

    /// Exponential drag coefficient: `v *= exp(-dt * drag_damping)`.
    pub drag_damping: f32,

    /// Gravity vector [gx, gy, gz] in m/s².
    pub gravity: [f32; 3],

    /// Stiffness of links built from mesh edges (0–1).
    pub stretch_stiffness: f32,

    /// Stiffness of the per-face bending links (0–1).
    pub bend_stiffness: f32,

    /// Enables long-range attachment tethers.
    pub long_range_attachment: bool,

    /// Relative tether stretch allowed before a tether pulls back.
    pub tether_give: f32,

    /// Influence of each tether correction (0–1).
    pub lra_stiffness: f32,

    /// Radius of the sphere collider (meters).
    pub collision_radius: f32,

    /// Inverse mass at or below which a vertex is never corrected.
    pub inv_mass_epsilon: f32,

    /// Element scheduling inside each stage.
    pub execution: ExecutionStrategy,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            frame_time: constants::DEFAULT_FRAME_TIME,
            substeps: constants::DEFAULT_SUBSTEPS,
            solver_iterations: constants::DEFAULT_SOLVER_ITERATIONS,
            drag_damping: constants::DEFAULT_DRAG_DAMPING,
            gravity: [0.0, 0.0, -constants::GRAVITY],
            stretch_stiffness: constants::DEFAULT_STRETCH_STIFFNESS,
            bend_stiffness: constants::DEFAULT_BEND_STIFFNESS,
            long_range_attachment: false,
            tether_give: constants::DEFAULT_TETHER_GIVE,
            lra_stiffness: constants::DEFAULT_LRA_STIFFNESS,
            collision_radius: constants::DEFAULT_COLLISION_RADIUS,
            inv_mass_epsilon: constants::DEFAULT_INV_MASS_EPSILON,
            execution: ExecutionStrategy::Serial,
        }
    }
}

impl SolverConfig {
    /// Creates a config for quick previews (fewer substeps and iterations).
    pub fn preview() -> Self {
        Self {
            substeps: 3,
            solver_iterations: 2,
            ..Default::default()
        }
    }

    /// Creates a high-quality config (more substeps and iterations).
    pub fn high_quality() -> Self {
        Self {
            substeps: 20,
            solver_iterations: 10,
            ..Default::default()
        }
    }

    /// Duration of one substep (seconds).
    #[inline]
    pub fn substep_dt(&self) -> f32 {
        self.frame_time / self.substeps as f32
    }

    /// Gravity as a `glam::Vec3`.
    #[inline]
    pub fn gravity_vec3(&self) -> glam::Vec3 {
        glam::Vec3::from_array(self.gravity)
    }

    /// Checks that every parameter is usable by the kernel.
    pub fn validate(&self) -> WeftResult<()> {
        if !(self.frame_time.is_finite() && self.frame_time > 0.0) {
            return Err(WeftError::InvalidConfig(
                "Frame time must be positive".into(),
            ));
        }
        if self.substeps == 0 {
            return Err(WeftError::InvalidConfig(
                "Substep count must be >= 1".into(),
            ));
        }
        if self.solver_iterations == 0 {
            return Err(WeftError::InvalidConfig(
                "Solver iterations must be >= 1".into(),
            ));
        }
        if !(self.drag_damping.is_finite() && self.drag_damping >= 0.0) {
            return Err(WeftError::InvalidConfig(
                "Drag damping must be non-negative".into(),
            ));
        }
        if self.gravity.iter().any(|g| !g.is_finite()) {
            return Err(WeftError::InvalidConfig(
                "Gravity must be finite".into(),
            ));
        }
        for (name, k) in [
            ("stretch_stiffness", self.stretch_stiffness),
            ("bend_stiffness", self.bend_stiffness),
            ("lra_stiffness", self.lra_stiffness),
        ] {
            if !(0.0..=1.0).contains(&k) {
                return Err(WeftError::InvalidConfig(format!(
                    "{name} must be in [0, 1], got {k}"
                )));
            }
        }
        if !(self.tether_give.is_finite() && self.tether_give >= 0.0) {
            return Err(WeftError::InvalidConfig(
                "Tether give must be non-negative".into(),
            ));
        }
        if !(self.collision_radius.is_finite() && self.collision_radius > 0.0) {
            return Err(WeftError::InvalidConfig(
                "Collision radius must be positive".into(),
            ));
        }
        if !(self.inv_mass_epsilon.is_finite() && self.inv_mass_epsilon >= 0.0) {
            return Err(WeftError::InvalidConfig(
                "Inverse-mass epsilon must be non-negative".into(),
            ));
        }
        Ok(())
    }
}
