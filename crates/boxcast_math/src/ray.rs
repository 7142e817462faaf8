use crate::Vec3;

/// A view ray with an origin and an unnormalized direction.
///
/// Camera rays keep the raw direction produced by the projection so the
/// parametric distance `t` can be turned into depth along the optical axis
/// with a single multiply.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Distance travelled along `axis` at parameter t.
    ///
    /// With `axis` the camera forward vector this is the z-buffer depth.
    #[inline]
    pub fn depth_along(&self, t: f32, axis: Vec3) -> f32 {
        t * self.direction.dot(axis)
    }
}
