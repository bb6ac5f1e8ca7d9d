//! Per-frame driver.
//!
//! Runs a fixed number of frames, publishing positions to a [`MeshSink`]
//! once per frame (never per substep) and emitting telemetry.
//!
//! ```text
//! for frame in 0..frame_count:
//!     FrameBegin
//!     for substep in 0..substeps:
//!         collider.center = source.collider_center(frame, substep)
//!         substep()
//!     sink.publish(frame, x)
//!     Contacts, Relaxation, Energy, FrameEnd
//! ```

use glam::Vec3;
use tracing::info;
use weft_mesh::TriangleMesh;
use weft_telemetry::{EventBus, EventKind, SimulationEvent};
use weft_types::WeftResult;

use crate::frame::{advance_frame, ColliderSource, FrameReport};
use crate::state::SolverState;

/// Receives the vertex positions produced by each frame.
pub trait MeshSink {
    /// Called once per frame after all substeps.
    fn publish(&mut self, frame: u32, positions: &[Vec3]) -> WeftResult<()>;
}

/// Writes published frames straight back into a host mesh.
impl MeshSink for TriangleMesh {
    fn publish(&mut self, _frame: u32, positions: &[Vec3]) -> WeftResult<()> {
        self.update_positions(positions)
    }
}

/// Keeps every published frame in memory.
#[derive(Debug, Clone, Default)]
pub struct FrameRecorder {
    /// One entry per published frame.
    pub frames: Vec<Vec<Vec3>>,
}

impl MeshSink for FrameRecorder {
    fn publish(&mut self, _frame: u32, positions: &[Vec3]) -> WeftResult<()> {
        self.frames.push(positions.to_vec());
        Ok(())
    }
}

/// Summary of a driver run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// One report per frame.
    pub reports: Vec<FrameReport>,
}

impl RunSummary {
    /// Total wall-clock time across frames (seconds).
    pub fn total_wall_time(&self) -> f64 {
        self.reports.iter().map(|r| r.wall_time).sum()
    }

    /// Total collision projections across frames.
    pub fn total_contacts(&self) -> u64 {
        self.reports.iter().map(|r| r.contacts as u64).sum()
    }
}

/// Drives the solver frame by frame.
#[derive(Default)]
pub struct FrameDriver {
    bus: Option<EventBus>,
}

impl FrameDriver {
    /// Creates a driver without telemetry.
    pub fn new() -> Self {
        Self { bus: None }
    }

    /// Creates a driver that emits events on `bus`.
    pub fn with_bus(bus: EventBus) -> Self {
        Self { bus: Some(bus) }
    }

    /// Runs `frame_count` frames.
    ///
    /// Stops at the first sink error; frames before it have been published.
    pub fn run(
        &mut self,
        state: &mut SolverState,
        source: &mut dyn ColliderSource,
        sink: &mut dyn MeshSink,
        frame_count: u32,
    ) -> WeftResult<RunSummary> {
        let mut summary = RunSummary {
            reports: Vec::with_capacity(frame_count as usize),
        };

        for _ in 0..frame_count {
            let frame = state.frame;
            self.emit(frame, EventKind::FrameBegin {
                sim_time: state.sim_time(),
            });

            let report = advance_frame(state, source);
            sink.publish(frame, state.positions())?;

            self.emit(frame, EventKind::Contacts {
                count: report.contacts,
                max_penetration: report.max_penetration,
            });
            self.emit(frame, EventKind::Relaxation {
                link_deviation: report.link_deviation,
                tether_corrections: report.tether_corrections,
            });
            self.emit(frame, EventKind::Energy {
                kinetic: state.kinetic_energy(),
            });
            self.emit(frame, EventKind::FrameEnd {
                wall_time: report.wall_time,
            });
            if let Some(bus) = self.bus.as_mut() {
                bus.flush();
            }

            summary.reports.push(report);
        }

        if let Some(bus) = self.bus.as_mut() {
            bus.finish();
        }

        info!(
            frames = frame_count,
            wall_time = summary.total_wall_time(),
            contacts = summary.total_contacts(),
            "simulation run complete"
        );
        Ok(summary)
    }

    fn emit(&self, frame: u32, kind: EventKind) {
        if let Some(bus) = &self.bus {
            bus.emit(SimulationEvent::new(frame, kind));
        }
    }
}
