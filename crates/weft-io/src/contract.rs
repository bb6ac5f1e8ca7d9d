//! Scene contract types.
//!
//! A scene file is a JSON-serialized [`SimulationInput`]: the cloth mesh
//! with its vertex groups, the names of the groups to pin and attach to,
//! solver parameters, and how the sphere collider moves.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use weft_mesh::TriangleMesh;
use weft_solver::{initialize_from_groups, ColliderSource, SolverConfig, SolverState};
use weft_types::{WeftError, WeftResult};

/// Complete input for a simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationInput {
    /// Cloth mesh, including its vertex groups.
    pub mesh: TriangleMesh,

    /// Name of the pin group. Must exist on the mesh (it may be empty).
    pub pin_group: String,

    /// Name of the attachment group. Required when long-range attachment
    /// is enabled, ignored otherwise.
    #[serde(default)]
    pub attach_group: Option<String>,

    /// Solver parameters. Missing fields take their defaults.
    #[serde(default)]
    pub config: SolverConfig,

    /// Motion of the sphere collider.
    pub collider: ColliderTrack,

    /// Number of frames to simulate.
    pub frame_count: u32,
}

impl SimulationInput {
    /// Parses a scene from JSON text.
    pub fn from_json_str(json: &str) -> WeftResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| WeftError::Serialization(format!("Invalid scene JSON: {e}")))
    }

    /// Serializes the scene to pretty-printed JSON.
    pub fn to_json_string(&self) -> WeftResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| WeftError::Serialization(format!("JSON serialization failed: {e}")))
    }

    /// Reads a scene file.
    pub fn load(path: impl AsRef<Path>) -> WeftResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Builds solver state from the named groups.
    pub fn initialize(&self) -> WeftResult<SolverState> {
        initialize_from_groups(
            &self.mesh,
            &self.pin_group,
            self.attach_group.as_deref(),
            &self.config,
        )
    }

    /// Collider source timed by this scene's frame and substep length.
    pub fn collider_source(&self) -> ScheduledCollider {
        self.collider.schedule(&self.config)
    }
}

/// How the sphere collider center moves over time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColliderTrack {
    /// Fixed center.
    Static {
        /// Center of the sphere.
        center: [f32; 3],
    },
    /// Constant-velocity motion: `center(t) = start + t * velocity`.
    Linear {
        /// Center at `t = 0`.
        start: [f32; 3],
        /// Velocity in m/s.
        velocity: [f32; 3],
    },
}

impl ColliderTrack {
    /// Center of the sphere at simulated time `time` (seconds).
    pub fn center_at(&self, time: f64) -> Vec3 {
        match *self {
            ColliderTrack::Static { center } => Vec3::from_array(center),
            ColliderTrack::Linear { start, velocity } => {
                Vec3::from_array(start) + time as f32 * Vec3::from_array(velocity)
            }
        }
    }

    /// Returns true if every coordinate is finite.
    pub fn is_finite(&self) -> bool {
        match self {
            ColliderTrack::Static { center } => center.iter().all(|c| c.is_finite()),
            ColliderTrack::Linear { start, velocity } => {
                start.iter().chain(velocity).all(|c| c.is_finite())
            }
        }
    }

    /// Binds the track to the frame and substep length of `config`.
    pub fn schedule(&self, config: &SolverConfig) -> ScheduledCollider {
        ScheduledCollider {
            track: *self,
            frame_time: config.frame_time as f64,
            substep_dt: config.substep_dt() as f64,
        }
    }
}

/// A [`ColliderTrack`] evaluated at `frame * frame_time + substep * dt`.
#[derive(Debug, Clone, Copy)]
pub struct ScheduledCollider {
    track: ColliderTrack,
    frame_time: f64,
    substep_dt: f64,
}

impl ScheduledCollider {
    /// Simulated time at the start of `substep` of `frame`.
    pub fn time(&self, frame: u32, substep: u32) -> f64 {
        frame as f64 * self.frame_time + substep as f64 * self.substep_dt
    }
}

impl ColliderSource for ScheduledCollider {
    fn collider_center(&mut self, frame: u32, substep: u32) -> Vec3 {
        self.track.center_at(self.time(frame, substep))
    }
}

/// Reads a TOML solver configuration. Missing fields take their defaults.
pub fn load_config(path: impl AsRef<Path>) -> WeftResult<SolverConfig> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| WeftError::Serialization(format!("Invalid config TOML: {e}")))
}
