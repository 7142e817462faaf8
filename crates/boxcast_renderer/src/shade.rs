//! Texture lookup and Phong lighting for resolved hits.
//!
//! The texel color and every light's Phong terms are summed. The albedo is
//! an additive base color; it does not modulate the lighting.

use std::sync::Arc;

use boxcast_core::{Geometry, Light, Material};
use boxcast_math::{Ray, Vec3};

use crate::frame::Color;
use crate::intersect::Hit;

/// Added to vector lengths before normalizing.
///
/// Keeps coincident points (hit point on the light or the eye) from
/// producing NaNs at the cost of vectors very slightly shorter than unit.
pub const NORMALIZE_EPSILON: f32 = 1e-6;

/// Normalize `v`, tolerating zero length.
#[inline]
pub fn safe_normalize(v: Vec3, epsilon: f32) -> Vec3 {
    v / (v.length() + epsilon)
}

/// Barycentric interpolation of a per-vertex attribute packed as (x, y, z).
#[inline]
pub fn interpolate(values: Vec3, beta: f32, gamma: f32) -> f32 {
    values.x + (values.y - values.x) * beta + (values.z - values.x) * gamma
}

/// Texel color of the material at the hit point.
pub fn texture_color(hit: &Hit, geometry: &Geometry, materials: &[Arc<Material>]) -> Color {
    let triangle = hit.triangle;
    let u = interpolate(geometry.tex_u()[triangle], hit.beta, hit.gamma);
    let v = interpolate(geometry.tex_v()[triangle], hit.beta, hit.gamma);

    let material = &materials[geometry.materials()[triangle]];
    material.texture.lookup(u, v, material.scale)
}

/// Sum of Phong diffuse and specular terms from every light.
///
/// `eye` is the camera position. With no lights the result is black.
pub fn phong(point: Vec3, normal: Vec3, eye: Vec3, lights: &[Light], epsilon: f32) -> Color {
    if lights.is_empty() {
        return Color::ZERO;
    }

    let view = safe_normalize(eye - point, epsilon);

    lights.iter().fold(Color::ZERO, |color, light| {
        let to_light = safe_normalize(light.position - point, epsilon);
        let half = safe_normalize(view + to_light, epsilon);

        let n_dot_l = normal.dot(to_light).max(0.0);
        let n_dot_h = normal.dot(half).max(0.0);

        color
            + light.diffuse * light.color * n_dot_l
            + light.specular * light.color * n_dot_h.powf(light.phong_exponent)
    })
}

/// Full shaded color of a hit: texture plus lighting.
pub fn shade(
    hit: &Hit,
    ray: &Ray,
    geometry: &Geometry,
    materials: &[Arc<Material>],
    lights: &[Light],
    epsilon: f32,
) -> Color {
    let albedo = texture_color(hit, geometry, materials);
    let point = ray.at(hit.t);
    let normal = geometry.normals()[hit.triangle];

    albedo + phong(point, normal, ray.origin, lights, epsilon)
}
