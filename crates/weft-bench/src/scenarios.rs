//! Benchmark scenarios: procedural mesh, vertex groups and config for each
//! test case.
//!
//! Three canonical scenarios:
//! 1. **Hanging sheet**: cloth pinned along one edge, swinging down under gravity
//! 2. **Tethered sheet**: same, with long-range attachments to the pinned edge
//! 3. **Sphere drape**: free cloth falling onto the sphere collider

use glam::Vec3;
use serde::{Deserialize, Serialize};

use weft_mesh::generators::{grid_top_row, quad_grid};
use weft_mesh::{TriangleMesh, VertexGroup};
use weft_solver::{ExecutionStrategy, SolverConfig};

/// Which benchmark scenario to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    /// Cloth pinned at one edge, hanging under gravity.
    HangingSheet,
    /// Hanging sheet with long-range attachment tethers.
    TetheredSheet,
    /// Cloth falling onto the sphere collider.
    SphereDrape,
}

impl ScenarioKind {
    /// Returns all scenario kinds.
    pub fn all() -> &'static [ScenarioKind] {
        &[
            ScenarioKind::HangingSheet,
            ScenarioKind::TetheredSheet,
            ScenarioKind::SphereDrape,
        ]
    }

    /// Returns a human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioKind::HangingSheet => "hanging_sheet",
            ScenarioKind::TetheredSheet => "tethered_sheet",
            ScenarioKind::SphereDrape => "sphere_drape",
        }
    }

    /// Looks a scenario up by [`name`](Self::name).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|k| k.name() == name)
    }
}

/// A fully specified benchmark scenario.
pub struct Scenario {
    /// Scenario type.
    pub kind: ScenarioKind,
    /// Cloth mesh with its vertex groups.
    pub mesh: TriangleMesh,
    /// Name of the pin group on `mesh`.
    pub pin_group: String,
    /// Name of the attachment group, if any.
    pub attach_group: Option<String>,
    /// Solver configuration.
    pub config: SolverConfig,
    /// Fixed sphere center.
    pub collider_center: Vec3,
    /// Number of frames to simulate.
    pub frames: u32,
}

/// Collider center far below every hanging scenario.
const OUT_OF_REACH: Vec3 = Vec3::new(0.0, 0.0, -10.0);

impl Scenario {
    /// Create the hanging sheet scenario.
    ///
    /// A 1m × 1m cloth at 20×20 resolution, lying flat at a height of 1m and
    /// pinned along its +Y edge, swinging down for 2 seconds at 60fps.
    pub fn hanging_sheet() -> Self {
        let cols = 20;
        let mut mesh = elevated_grid(cols, 1.0, 1.0);
        mesh.add_group(VertexGroup::uniform("pin", grid_top_row(cols)));

        Self {
            kind: ScenarioKind::HangingSheet,
            mesh,
            pin_group: "pin".into(),
            attach_group: None,
            config: SolverConfig::default(),
            collider_center: OUT_OF_REACH,
            frames: 120, // 2 seconds at 60fps
        }
    }

    /// Create the tethered sheet scenario.
    ///
    /// The hanging sheet with its pinned edge also used as the attachment
    /// group and long-range attachment enabled.
    pub fn tethered_sheet() -> Self {
        let cols = 20;
        let mut mesh = elevated_grid(cols, 1.0, 1.0);
        mesh.add_group(VertexGroup::uniform("pin", grid_top_row(cols)));
        mesh.add_group(VertexGroup::uniform("attach", grid_top_row(cols)));

        Self {
            kind: ScenarioKind::TetheredSheet,
            mesh,
            pin_group: "pin".into(),
            attach_group: Some("attach".into()),
            config: SolverConfig {
                long_range_attachment: true,
                ..Default::default()
            },
            collider_center: OUT_OF_REACH,
            frames: 120,
        }
    }

    /// Create the sphere drape scenario.
    ///
    /// A 1.5m × 1.5m cloth at 20×20 resolution falls from a height of 0.8m
    /// onto a sphere of radius 0.5m centered at the origin.
    pub fn sphere_drape() -> Self {
        let mut mesh = elevated_grid(20, 1.5, 0.8);
        mesh.add_group(VertexGroup::new("pin")); // Nothing pinned

        Self {
            kind: ScenarioKind::SphereDrape,
            mesh,
            pin_group: "pin".into(),
            attach_group: None,
            config: SolverConfig {
                collision_radius: 0.5,
                ..Default::default()
            },
            collider_center: Vec3::ZERO,
            frames: 180, // 3 seconds
        }
    }

    /// Create a scenario by kind.
    pub fn from_kind(kind: ScenarioKind) -> Self {
        match kind {
            ScenarioKind::HangingSheet => Self::hanging_sheet(),
            ScenarioKind::TetheredSheet => Self::tethered_sheet(),
            ScenarioKind::SphereDrape => Self::sphere_drape(),
        }
    }

    /// Overrides the execution strategy.
    pub fn with_execution(mut self, execution: ExecutionStrategy) -> Self {
        self.config.execution = execution;
        self
    }
}

/// Square grid in the XY plane raised to `height`.
fn elevated_grid(cols: usize, size: f32, height: f32) -> TriangleMesh {
    let mut mesh = quad_grid(cols, cols, size, size);
    mesh.pos_z.iter_mut().for_each(|z| *z = height);
    mesh
}
