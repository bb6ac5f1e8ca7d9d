//! # weft-telemetry
//!
//! Event bus for simulation telemetry. The frame driver emits structured
//! events (frame timing, contacts, constraint error, energy) that are
//! consumed by pluggable sinks.

pub mod bus;
pub mod events;
pub mod sinks;

pub use bus::EventBus;
pub use events::{EventKind, SimulationEvent};
pub use sinks::{EventSink, TracingSink, VecSink};
