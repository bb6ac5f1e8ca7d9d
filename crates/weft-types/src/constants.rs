//! Physical constants and solver defaults.
//!
//! These are the defaults behind `SolverConfig`; the solver itself only
//! ever reads values from its configuration.

/// Gravitational acceleration (m/s²).
pub const GRAVITY: f32 = 9.8;

/// Default frame duration (seconds). 1/60th of a second.
pub const DEFAULT_FRAME_TIME: f32 = 1.0 / 60.0;

/// Default number of substeps per frame.
pub const DEFAULT_SUBSTEPS: u32 = 10;

/// Default number of constraint relaxation iterations per substep.
pub const DEFAULT_SOLVER_ITERATIONS: u32 = 4;

/// Default exponential drag coefficient (1/s).
pub const DEFAULT_DRAG_DAMPING: f32 = 1.0;

/// Stiffness of links built from mesh edges.
pub const DEFAULT_STRETCH_STIFFNESS: f32 = 0.9;

/// Stiffness of the per-face bending links.
pub const DEFAULT_BEND_STIFFNESS: f32 = 0.7;

/// Influence of a tether correction (long-range attachments).
pub const DEFAULT_LRA_STIFFNESS: f32 = 0.5;

/// Relative stretch a tether tolerates before it pulls back.
pub const DEFAULT_TETHER_GIVE: f32 = 0.2;

/// Radius of the spherical collider (meters).
pub const DEFAULT_COLLISION_RADIUS: f32 = 1.01;

/// Inverse mass at or below which a vertex is treated as immovable.
pub const DEFAULT_INV_MASS_EPSILON: f32 = 1.0e-3;

/// Distances below this are too short to normalize by.
pub const DEGENERATE_LENGTH: f32 = 1.0e-7;
