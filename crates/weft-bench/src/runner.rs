//! Benchmark runner: executes scenarios through the frame driver and
//! collects metrics.

use std::time::Instant;

use tracing::info;
use weft_solver::{initialize_from_groups, FrameDriver};
use weft_types::WeftResult;

use crate::metrics::BenchmarkMetrics;
use crate::scenarios::{Scenario, ScenarioKind};

/// Runs benchmark scenarios and collects metrics.
pub struct BenchmarkRunner;

impl BenchmarkRunner {
    /// Run a single scenario.
    ///
    /// Returns metrics for the completed run.
    pub fn run(scenario: &Scenario) -> WeftResult<BenchmarkMetrics> {
        let mut state = initialize_from_groups(
            &scenario.mesh,
            &scenario.pin_group,
            scenario.attach_group.as_deref(),
            &scenario.config,
        )?;

        // The mesh copy receives every frame and keeps the initial
        // positions in `scenario.mesh` untouched for displacement tracking.
        let mut output = scenario.mesh.clone();
        let mut source = scenario.collider_center;

        let total_start = Instant::now();
        let summary =
            FrameDriver::new().run(&mut state, &mut source, &mut output, scenario.frames)?;
        let total_wall_time = total_start.elapsed().as_secs_f64();

        let max_displacement = scenario
            .mesh
            .positions()
            .iter()
            .zip(state.positions())
            .map(|(initial, current)| initial.distance(*current))
            .fold(0.0f32, f32::max);

        let frame_times: Vec<f64> = summary.reports.iter().map(|r| r.wall_time).collect();
        let avg_frame = if frame_times.is_empty() {
            0.0
        } else {
            frame_times.iter().sum::<f64>() / frame_times.len() as f64
        };
        let min_frame = frame_times.iter().copied().fold(f64::MAX, f64::min);
        let max_frame = frame_times.iter().copied().fold(0.0, f64::max);

        let metrics = BenchmarkMetrics {
            scenario: scenario.kind.name().to_string(),
            execution: scenario.config.execution.name().to_string(),
            total_wall_time,
            frames: scenario.frames,
            avg_frame_time: avg_frame,
            min_frame_time: if frame_times.is_empty() { 0.0 } else { min_frame },
            max_frame_time: max_frame,
            final_kinetic_energy: state.kinetic_energy(),
            max_displacement,
            final_link_deviation: state.link_deviation(),
            total_contacts: summary.total_contacts(),
            vertex_count: state.vertex_count(),
            triangle_count: scenario.mesh.triangle_count(),
            link_count: state.link_count(),
        };

        info!(
            scenario = %metrics.scenario,
            wall_time = metrics.total_wall_time,
            "benchmark finished"
        );
        Ok(metrics)
    }

    /// Run all scenarios and return metrics for each.
    pub fn run_all() -> WeftResult<Vec<BenchmarkMetrics>> {
        ScenarioKind::all()
            .iter()
            .map(|&kind| Self::run(&Scenario::from_kind(kind)))
            .collect()
    }
}
