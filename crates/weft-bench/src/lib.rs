//! # weft-bench
//!
//! Benchmark suite for the weft cloth solver.
//!
//! Provides 3 procedural benchmark scenarios, metric collection,
//! and CSV export for regression tracking.

pub mod metrics;
pub mod runner;
pub mod scenarios;

pub use metrics::BenchmarkMetrics;
pub use runner::BenchmarkRunner;
pub use scenarios::{Scenario, ScenarioKind};
