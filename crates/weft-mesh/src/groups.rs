//! Named, weighted vertex groups.
//!
//! A group assigns a weight in `[0, 1]` to a subset of vertices. The solver
//! reads one group as pinning weights and, optionally, another as the set
//! of long-range attachment points.

use serde::{Deserialize, Serialize};
use weft_types::{WeftError, WeftResult};

/// A named set of vertices, each carrying a weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VertexGroup {
    /// Group name, used for lookup.
    pub name: String,
    /// `(vertex index, weight)` pairs. Order is preserved.
    pub members: Vec<(u32, f32)>,
}

impl VertexGroup {
    /// Creates an empty group.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
        }
    }

    /// Creates a group where every listed vertex has weight 1.0.
    pub fn uniform(name: impl Into<String>, vertices: impl IntoIterator<Item = u32>) -> Self {
        Self {
            name: name.into(),
            members: vertices.into_iter().map(|v| (v, 1.0)).collect(),
        }
    }

    /// Adds a vertex with the given weight, replacing an existing entry.
    pub fn assign(&mut self, vertex: u32, weight: f32) {
        match self.members.iter_mut().find(|(v, _)| *v == vertex) {
            Some(entry) => entry.1 = weight,
            None => self.members.push((vertex, weight)),
        }
    }

    /// Returns the weight of `vertex`, or `None` if it is not a member.
    pub fn weight(&self, vertex: u32) -> Option<f32> {
        self.members
            .iter()
            .find(|(v, _)| *v == vertex)
            .map(|&(_, w)| w)
    }

    /// Returns true if `vertex` belongs to this group.
    pub fn contains(&self, vertex: u32) -> bool {
        self.weight(vertex).is_some()
    }

    /// Member vertex indices in ascending order, without duplicates.
    pub fn vertices(&self) -> Vec<u32> {
        let mut out: Vec<u32> = self.members.iter().map(|&(v, _)| v).collect();
        out.sort_unstable();
        out.dedup();
        out
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns true if the group has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Checks that every member is below `vertex_count` and weighs in `[0, 1]`.
    pub fn validate(&self, vertex_count: usize) -> WeftResult<()> {
        for &(v, w) in &self.members {
            if v as usize >= vertex_count {
                return Err(WeftError::InvalidMesh(format!(
                    "Group '{}' references vertex {} (vertex count: {})",
                    self.name, v, vertex_count
                )));
            }
            if !(0.0..=1.0).contains(&w) {
                return Err(WeftError::InvalidMesh(format!(
                    "Group '{}' weight {} for vertex {} is outside [0, 1]",
                    self.name, w, v
                )));
            }
        }
        Ok(())
    }

    /// Expands the group into a dense per-vertex table.
    ///
    /// Entry `i` is `Some(weight)` for members and `None` otherwise.
    /// Members outside `0..vertex_count` are ignored.
    pub fn membership(&self, vertex_count: usize) -> Vec<Option<f32>> {
        let mut out = vec![None; vertex_count];
        for &(v, w) in &self.members {
            if let Some(slot) = out.get_mut(v as usize) {
                *slot = Some(w);
            }
        }
        out
    }
}
