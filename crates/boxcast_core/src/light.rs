//! Point lights for Phong shading.

use boxcast_math::Vec3;

/// A point light with per-light Phong coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Vec3,
    /// Diffuse reflection coefficient per channel
    pub diffuse: Vec3,
    /// Specular reflection coefficient per channel
    pub specular: Vec3,
    /// Exponent applied to the half-vector term
    pub phong_exponent: f32,
    pub color: Vec3,
}

impl Light {
    /// White light with the given coefficients.
    pub fn new(position: Vec3, diffuse: Vec3, specular: Vec3, phong_exponent: f32) -> Self {
        Self {
            position,
            diffuse,
            specular,
            phong_exponent,
            color: Vec3::ONE,
        }
    }

    /// Set the light color.
    pub fn with_color(mut self, color: Vec3) -> Self {
        self.color = color;
        self
    }
}
