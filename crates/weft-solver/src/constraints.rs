//! Constraint data built once by the topology builder.
//!
//! - [`Link`]: distance constraint between two vertices (stretch or bend)
//! - [`Attachments`]: long-range attachment anchors and tether rest lengths
//!
//! Both are immutable after initialization.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use weft_types::constants::DEGENERATE_LENGTH;
use weft_types::VertexId;

/// Which mesh feature a link was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkKind {
    /// Built from a mesh edge.
    Stretch,
    /// Built from a vertex pair inside a face.
    Bend,
}

/// A distance constraint between two vertices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Link {
    /// The two constrained vertices. Always distinct.
    pub endpoints: [VertexId; 2],
    /// Distance between the endpoints at initialization.
    pub rest_length: f32,
    /// Stiffness in `[0, 1]`.
    pub stiffness: f32,
    /// Origin of the link.
    pub kind: LinkKind,
}

impl Link {
    /// Creates a link between `a` and `b` with the given rest length.
    pub fn new(a: u32, b: u32, rest_length: f32, stiffness: f32, kind: LinkKind) -> Self {
        Self {
            endpoints: [VertexId(a), VertexId(b)],
            rest_length,
            stiffness,
            kind,
        }
    }

    /// Stiffness for relaxation iteration `iteration` (0-based):
    /// `1 - (1 - k)^(1 / (iteration + 1))`.
    #[inline]
    pub fn compensated_stiffness(&self, iteration: u32) -> f32 {
        1.0 - (1.0 - self.stiffness).powf(1.0 / (iteration + 1) as f32)
    }

    /// Computes the endpoint displacements that move `p0`/`p1` toward the
    /// rest length.
    ///
    /// Each endpoint moves by half the length error scaled by its own
    /// inverse mass and `kp`; endpoints with `w <= epsilon` stay put.
    /// Returns zero displacements when the endpoints coincide.
    #[inline]
    pub fn correction(
        &self,
        p0: Vec3,
        p1: Vec3,
        w0: f32,
        w1: f32,
        kp: f32,
        epsilon: f32,
    ) -> (Vec3, Vec3) {
        let delta = p0 - p1;
        let length = delta.length();
        if length < DEGENERATE_LENGTH {
            return (Vec3::ZERO, Vec3::ZERO);
        }
        let dir = delta / length;
        let magnitude = 0.5 * (length - self.rest_length) * kp;

        let dp0 = if w0 > epsilon { -w0 * magnitude * dir } else { Vec3::ZERO };
        let dp1 = if w1 > epsilon { w1 * magnitude * dir } else { Vec3::ZERO };
        (dp0, dp1)
    }

    /// Current length given a position buffer.
    #[inline]
    pub fn length(&self, positions: &[Vec3]) -> f32 {
        let [a, b] = self.endpoints;
        positions[a.index()].distance(positions[b.index()])
    }
}

/// Long-range attachment anchors with per-(vertex, anchor) tether lengths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachments {
    /// Anchor vertices, ascending.
    pub vertices: Vec<VertexId>,
    /// Anchor positions captured at initialization.
    pub anchors: Vec<Vec3>,
    /// Row-major `vertex_count × anchor_count` rest distances.
    pub tether_lengths: Vec<f32>,
}

impl Attachments {
    /// Builds anchors and the full tether rest-length table.
    pub fn build(positions: &[Vec3], anchor_vertices: &[u32]) -> Self {
        let vertices: Vec<VertexId> = anchor_vertices.iter().map(|&v| VertexId(v)).collect();
        let anchors: Vec<Vec3> = anchor_vertices
            .iter()
            .map(|&v| positions[v as usize])
            .collect();

        let mut tether_lengths = Vec::with_capacity(positions.len() * anchors.len());
        for &x in positions {
            for &anchor in &anchors {
                tether_lengths.push(x.distance(anchor));
            }
        }

        Self {
            vertices,
            anchors,
            tether_lengths,
        }
    }

    /// Number of anchors.
    #[inline]
    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    /// Returns true if there are no anchors.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// Rest distance from `vertex` to anchor `anchor`.
    #[inline]
    pub fn tether_length(&self, vertex: usize, anchor: usize) -> f32 {
        self.tether_lengths[vertex * self.anchors.len() + anchor]
    }

    /// Tether rest distances of one vertex, one per anchor.
    #[inline]
    pub fn tethers_of(&self, vertex: usize) -> &[f32] {
        let a = self.anchors.len();
        &self.tether_lengths[vertex * a..(vertex + 1) * a]
    }

    /// Pulls `p` back toward every anchor whose tether is stretched past
    /// `give`. Returns the number of tethers that corrected.
    ///
    /// Tethers with a degenerate rest length (the anchor itself) and
    /// positions coincident with an anchor are skipped.
    pub fn project(
        &self,
        vertex: usize,
        p: &mut Vec3,
        w: f32,
        give: f32,
        influence: f32,
    ) -> u32 {
        let mut corrected = 0;
        for (&anchor, &rest) in self.anchors.iter().zip(self.tethers_of(vertex)) {
            if rest < DEGENERATE_LENGTH {
                continue;
            }
            let offset = *p - anchor;
            let dist = offset.length();
            if dist < DEGENERATE_LENGTH {
                continue;
            }
            let stretch = dist - rest;
            if stretch / rest > give {
                let dp = -0.5 * w * stretch * offset / dist;
                *p += influence * dp;
                corrected += 1;
            }
        }
        corrected
    }
}
