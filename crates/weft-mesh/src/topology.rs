//! Mesh topology queries.
//!
//! Builds the unique edge list from the triangle index buffer. Edge order
//! is deterministic (first-seen while walking faces in order), which makes
//! the solver's link order, and therefore its results, reproducible.

use std::collections::HashMap;

use crate::mesh::TriangleMesh;

/// Precomputed topology information for a triangle mesh.
///
/// Built once when a mesh is loaded. Provides the edge list consumed by
/// the solver's stretch links and the adjacency counts used to reject
/// non-manifold input.
#[derive(Debug, Clone, Default)]
pub struct Topology {
    /// Unique edges as `[a, b]` pairs, in first-seen order.
    /// Endpoints keep the orientation of the face that introduced them.
    pub edges: Vec<[u32; 2]>,

    /// For each edge, the adjacent triangles.
    /// Boundary edges have one, interior edges two, loose edges none.
    pub edge_triangles: Vec<Vec<u32>>,

    /// Canonical `(min, max)` key → index into `edges`.
    lookup: HashMap<(u32, u32), usize>,
}

impl Topology {
    /// Build topology from a triangle mesh.
    pub fn build(mesh: &TriangleMesh) -> Self {
        let mut topo = Self::default();

        for t in 0..mesh.triangle_count() {
            let [a, b, c] = mesh.triangle(t);
            for (v0, v1) in [(a, b), (b, c), (c, a)] {
                let idx = topo.insert(v0, v1);
                topo.edge_triangles[idx].push(t as u32);
            }
        }

        topo
    }

    /// Adds a loose edge (one not bordering any face).
    ///
    /// Returns `false` if the edge already exists or is a self-loop.
    pub fn add_edge(&mut self, a: u32, b: u32) -> bool {
        if a == b || self.lookup.contains_key(&canonical(a, b)) {
            return false;
        }
        self.insert(a, b);
        true
    }

    /// Returns the index of edge `(a, b)` in either orientation.
    pub fn edge_index(&self, a: u32, b: u32) -> Option<usize> {
        self.lookup.get(&canonical(a, b)).copied()
    }

    /// Number of unique edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns the number of boundary edges (edges with only 1 adjacent triangle).
    pub fn boundary_edge_count(&self) -> usize {
        self.edge_triangles
            .iter()
            .filter(|tris| tris.len() == 1)
            .count()
    }

    /// Returns the number of edges shared by more than two triangles.
    pub fn non_manifold_edge_count(&self) -> usize {
        self.edge_triangles
            .iter()
            .filter(|tris| tris.len() > 2)
            .count()
    }

    /// Returns true if the mesh is closed (no boundary edges).
    pub fn is_closed(&self) -> bool {
        self.boundary_edge_count() == 0
    }

    fn insert(&mut self, a: u32, b: u32) -> usize {
        let edges = &mut self.edges;
        let edge_triangles = &mut self.edge_triangles;
        *self.lookup.entry(canonical(a, b)).or_insert_with(|| {
            edges.push([a, b]);
            edge_triangles.push(Vec::new());
            edges.len() - 1
        })
    }
}

#[inline]
fn canonical(a: u32, b: u32) -> (u32, u32) {
    if a < b { (a, b) } else { (b, a) }
}
