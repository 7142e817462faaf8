//! Brute-force nearest-hit search over every triangle in the scene.
//!
//! Each ray is solved against each triangle with Cramer's rule on the system
//!
//! ```text
//! origin + t * direction = a + beta * (b - a) + gamma * (c - a)
//! ```
//!
//! There is no acceleration structure: a batch of `P` rays against `T`
//! triangles costs `P * T` tests.

use boxcast_core::Geometry;
use boxcast_math::{Interval, Ray, Vec3};
use rayon::prelude::*;

/// Added to the system determinant before dividing by it.
///
/// Rays parallel to a triangle and zero-area triangles would otherwise
/// divide by zero. The price is a tiny bias in `t`, `beta` and `gamma`, and
/// possibly a bogus far-away hit on a degenerate triangle.
pub const DETERMINANT_EPSILON: f32 = 1e-7;

/// Nearest intersection of a ray with the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Ray parameter of the hit point
    pub t: f32,
    /// Index of the triangle in the geometry store
    pub triangle: usize,
    /// Barycentric weight of the second vertex
    pub beta: f32,
    /// Barycentric weight of the third vertex
    pub gamma: f32,
}

impl Hit {
    /// Barycentric weight of the first vertex.
    pub fn alpha(&self) -> f32 {
        1.0 - self.beta - self.gamma
    }
}

/// Intersect one ray with one triangle.
///
/// Returns `(t, beta, gamma)` when the hit lies in `range` and inside the
/// triangle. The edges `beta = 0` and `gamma = 0` are open while
/// `beta + gamma = 1` is closed.
///
/// The `beta` and `gamma` numerators are both written as
/// `to_origin . (edge x direction)`, so two triangles sharing their first
/// vertex and an edge out of it (as the `beta = 0` edge of one and the
/// `gamma = 0` edge of the other) compute the same value with opposite
/// signs. A ray near that edge is then claimed by at most one of them; a
/// ray landing exactly on it can be missed by both.
#[inline]
pub fn intersect_triangle(
    ray: &Ray,
    vertices: &[Vec3; 3],
    range: Interval,
    epsilon: f32,
) -> Option<(f32, f32, f32)> {
    let [a, b, c] = *vertices;
    let edge_b = a - b;
    let edge_c = a - c;
    let to_origin = a - ray.origin;

    // Columns of the system matrix: (a - b), (a - c), direction
    let edge_c_x_dir = edge_c.cross(ray.direction);
    let m = edge_b.dot(edge_c_x_dir) + epsilon;
    let edge_b_x_origin = edge_b.cross(to_origin);

    let t = -edge_c.dot(edge_b_x_origin) / m;
    if !range.contains(t) {
        return None;
    }

    // d . (edge_b x to_origin) rearranged to mirror the beta numerator
    let gamma = -to_origin.dot(edge_b.cross(ray.direction)) / m;
    if !(gamma > 0.0 && gamma <= 1.0) {
        return None;
    }

    let beta = to_origin.dot(edge_c_x_dir) / m;
    if !(beta > 0.0 && beta <= 1.0 - gamma) {
        return None;
    }

    Some((t, beta, gamma))
}

/// Find the closest triangle hit along a ray.
///
/// Ties on `t` keep the lowest triangle index.
pub fn nearest_hit(ray: &Ray, geometry: &Geometry, range: Interval, epsilon: f32) -> Option<Hit> {
    let mut closest: Option<Hit> = None;

    for (triangle, vertices) in geometry.vertices().iter().enumerate() {
        let Some((t, beta, gamma)) = intersect_triangle(ray, vertices, range, epsilon) else {
            continue;
        };

        if closest.map_or(true, |hit| t < hit.t) {
            closest = Some(Hit {
                t,
                triangle,
                beta,
                gamma,
            });
        }
    }

    closest
}

/// Resolve the nearest hit for every direction of one sample.
///
/// All rays share `origin`. The result is indexed like `directions`.
pub fn intersect_all(
    origin: Vec3,
    directions: &[Vec3],
    geometry: &Geometry,
    range: Interval,
    epsilon: f32,
    parallel: bool,
) -> Vec<Option<Hit>> {
    let trace = |direction: &Vec3| {
        nearest_hit(&Ray::new(origin, *direction), geometry, range, epsilon)
    };

    if parallel {
        directions.par_iter().map(trace).collect()
    } else {
        directions.iter().map(trace).collect()
    }
}
