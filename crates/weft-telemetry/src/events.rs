//! Simulation event types.
//!
//! Events are lightweight value types tagged with the frame they belong to.

use serde::{Deserialize, Serialize};

/// A simulation event emitted by the frame driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationEvent {
    /// Frame number (0-indexed).
    pub frame: u32,
    /// Event payload.
    pub kind: EventKind,
}

/// Event payload variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    /// Frame started.
    FrameBegin {
        /// Simulated time at the start of the frame (seconds).
        sim_time: f64,
    },

    /// Frame completed and positions were published.
    FrameEnd {
        /// Wall-clock time for the whole frame (seconds).
        wall_time: f64,
    },

    /// Collision projections during the frame.
    Contacts {
        /// Projections applied, summed over substeps and iterations.
        count: u32,
        /// Deepest penetration removed (meters).
        max_penetration: f32,
    },

    /// Constraint state at the end of the frame.
    Relaxation {
        /// Mean absolute link length error (meters).
        link_deviation: f32,
        /// Tether corrections applied during the frame.
        tether_corrections: u32,
    },

    /// Energy snapshot at the end of the frame.
    Energy {
        /// Kinetic energy (0.5 * m * v^2).
        kinetic: f64,
    },
}

impl SimulationEvent {
    /// Creates a new event for the given frame.
    pub fn new(frame: u32, kind: EventKind) -> Self {
        Self { frame, kind }
    }
}
