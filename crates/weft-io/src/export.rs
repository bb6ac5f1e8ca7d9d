//! JSON frame exporter: writes per-frame mesh data for visual inspection.
//!
//! Implements [`MeshSink`]. Captures vertex positions at each published
//! frame, then serializes the whole animation to a JSON file on
//! [`finalize`](JsonFrameExporter::finalize):
//!
//! ```text
//! { "vertex_count": N, "triangle_count": T, "indices": [...],
//!   "frames": [ { "frame": 0, "positions": [x0, y0, z0, x1, ...] }, ... ] }
//! ```

use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::info;
use weft_mesh::TriangleMesh;
use weft_solver::MeshSink;
use weft_types::{WeftError, WeftResult};

/// A single frame of captured mesh data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameData {
    /// Frame index.
    pub frame: u32,
    /// Interleaved `[x0, y0, z0, x1, y1, z1, ...]`.
    pub positions: Vec<f32>,
}

/// Complete animation data as written to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationData {
    /// Vertices per frame.
    pub vertex_count: usize,
    /// Triangles in the mesh.
    pub triangle_count: usize,
    /// Flat triangle indices.
    pub indices: Vec<u32>,
    /// Captured frames in publish order.
    pub frames: Vec<FrameData>,
}

impl AnimationData {
    /// Reads an exported animation file.
    pub fn load(path: impl AsRef<Path>) -> WeftResult<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| WeftError::Serialization(format!("Invalid animation JSON: {e}")))
    }
}

/// Exports simulation frames to a JSON file.
///
/// Usage:
/// ```text
/// let mut exporter = JsonFrameExporter::new("frames.json", &mesh);
/// driver.run(&mut state, &mut source, &mut exporter, frames)?;
/// exporter.finalize()?; // Writes the JSON file
/// ```
pub struct JsonFrameExporter {
    output_path: PathBuf,
    indices: Vec<u32>,
    vertex_count: usize,
    triangle_count: usize,
    frames: Vec<FrameData>,
}

impl JsonFrameExporter {
    /// Creates an exporter for `mesh` that will write to `output_path`.
    pub fn new(output_path: impl Into<PathBuf>, mesh: &TriangleMesh) -> Self {
        Self {
            output_path: output_path.into(),
            indices: mesh.indices.clone(),
            vertex_count: mesh.vertex_count(),
            triangle_count: mesh.triangle_count(),
            frames: Vec::new(),
        }
    }

    /// Number of frames captured so far.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Destination file.
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Writes all captured frames and clears the buffer.
    pub fn finalize(&mut self) -> WeftResult<()> {
        let data = AnimationData {
            vertex_count: self.vertex_count,
            triangle_count: self.triangle_count,
            indices: self.indices.clone(),
            frames: std::mem::take(&mut self.frames),
        };
        let json = serde_json::to_string(&data)
            .map_err(|e| WeftError::Serialization(format!("JSON serialization failed: {e}")))?;
        std::fs::write(&self.output_path, json)?;
        info!(
            path = %self.output_path.display(),
            frames = data.frames.len(),
            "frames exported"
        );
        Ok(())
    }
}

impl MeshSink for JsonFrameExporter {
    fn publish(&mut self, frame: u32, positions: &[Vec3]) -> WeftResult<()> {
        if positions.len() != self.vertex_count {
            return Err(WeftError::InvalidMesh(format!(
                "Frame {frame} has {} positions, expected {}",
                positions.len(),
                self.vertex_count
            )));
        }
        let positions = positions.iter().flat_map(|p| p.to_array()).collect();
        self.frames.push(FrameData { frame, positions });
        Ok(())
    }
}
