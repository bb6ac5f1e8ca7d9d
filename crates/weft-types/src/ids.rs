//! Strongly-typed vertex identifiers.
//!
//! Link endpoints are stored as `VertexId` so they cannot be confused with
//! link or anchor indices.

use serde::{Deserialize, Serialize};

/// Index into the per-vertex arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VertexId(pub u32);

impl VertexId {
    /// Returns the raw index as `usize` for array indexing.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for VertexId {
    fn from(val: u32) -> Self {
        Self(val)
    }
}
