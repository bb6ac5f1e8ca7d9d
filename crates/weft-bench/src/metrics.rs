//! Benchmark metrics: data collected during a benchmark run.

use serde::{Deserialize, Serialize};

/// Metrics collected from a benchmark scenario run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkMetrics {
    /// Scenario name.
    pub scenario: String,
    /// Execution strategy name.
    pub execution: String,
    /// Total wall-clock time (seconds).
    pub total_wall_time: f64,
    /// Number of frames executed.
    pub frames: u32,
    /// Average wall-clock time per frame (seconds).
    pub avg_frame_time: f64,
    /// Minimum frame time.
    pub min_frame_time: f64,
    /// Maximum frame time.
    pub max_frame_time: f64,
    /// Final kinetic energy.
    pub final_kinetic_energy: f64,
    /// Maximum vertex displacement from initial position.
    pub max_displacement: f32,
    /// Mean absolute link length error at the final frame.
    pub final_link_deviation: f32,
    /// Collision projections across the run.
    pub total_contacts: u64,
    /// Vertex count.
    pub vertex_count: usize,
    /// Triangle count.
    pub triangle_count: usize,
    /// Link count (stretch + bend).
    pub link_count: usize,
}

impl BenchmarkMetrics {
    /// CSV header row.
    pub fn to_csv_header() -> String {
        "scenario,execution,vertex_count,triangle_count,link_count,frames,total_wall_time_s,avg_frame_ms,min_frame_ms,max_frame_ms,final_ke,max_displacement,final_link_deviation,total_contacts".to_string()
    }

    /// Format this metrics instance as a CSV data row.
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{},{:.6},{:.4},{:.4},{:.4},{:.6e},{:.6},{:.6e},{}",
            self.scenario,
            self.execution,
            self.vertex_count,
            self.triangle_count,
            self.link_count,
            self.frames,
            self.total_wall_time,
            self.avg_frame_time * 1000.0,
            self.min_frame_time * 1000.0,
            self.max_frame_time * 1000.0,
            self.final_kinetic_energy,
            self.max_displacement,
            self.final_link_deviation,
            self.total_contacts,
        )
    }

    /// Format multiple metrics as a complete CSV string.
    pub fn to_csv(metrics: &[BenchmarkMetrics]) -> String {
        let mut csv = Self::to_csv_header();
        for m in metrics {
            csv.push('\n');
            csv.push_str(&m.to_csv_row());
        }
        csv
    }
}
