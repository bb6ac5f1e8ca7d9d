//! Analytical sphere collider.
//!
//! Pushes penetrating predicted positions radially out to the sphere
//! surface. The center is refreshed by the frame driver every substep;
//! the radius is fixed for the run.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use weft_types::constants::DEGENERATE_LENGTH;

/// Sphere obstacle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SphereCollider {
    /// Center of the sphere.
    pub center: Vec3,
    /// Radius of the sphere.
    pub radius: f32,
}

impl SphereCollider {
    /// Creates a new sphere collider.
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Projects `p` onto the sphere surface if it is inside.
    ///
    /// Returns the penetration depth that was removed, or `None` when the
    /// point was outside or sits on the center (no direction to push along).
    #[inline]
    pub fn project(&self, p: &mut Vec3) -> Option<f32> {
        let offset = *p - self.center;
        let dist = offset.length();
        let diff = dist - self.radius;
        if diff >= 0.0 || dist < DEGENERATE_LENGTH {
            return None;
        }
        *p += -diff / dist * offset;
        Some(-diff)
    }
}
