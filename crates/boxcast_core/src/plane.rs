//! Rectangular planes and the five-plane box room built from them.

use boxcast_math::Vec3;

use crate::geometry::TriangleSource;

/// A textured rectangle spanned by two edges from a corner.
///
/// The rectangle faces `edge_a x edge_b`. Texture U runs from 0 to 1 along
/// `edge_a` and V from 0 to 1 along `edge_b`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub corner: Vec3,
    pub edge_a: Vec3,
    pub edge_b: Vec3,
}

impl Plane {
    /// Create a plane from a corner and two edge vectors.
    pub fn new(corner: Vec3, edge_a: Vec3, edge_b: Vec3) -> Self {
        Self {
            corner,
            edge_a,
            edge_b,
        }
    }

    /// Unit normal the plane faces.
    pub fn normal(&self) -> Vec3 {
        self.edge_a.cross(self.edge_b).normalize_or_zero()
    }

    /// Center of the rectangle.
    pub fn center(&self) -> Vec3 {
        self.corner + 0.5 * (self.edge_a + self.edge_b)
    }
}

impl TriangleSource for Plane {
    // Both halves start at the corner and hold the diagonal as an open edge
    // (beta = 0 in the first, gamma = 0 in the second). The two edge tests
    // evaluate the same triple product with opposite signs, so a ray near the
    // diagonal is claimed by at most one half. A ray landing exactly on it
    // can be missed by both.
    fn triangles(&self) -> Vec<[Vec3; 3]> {
        let c = self.corner;
        let a = self.edge_a;
        let b = self.edge_b;

        vec![[c, c + a, c + a + b], [c, c + a + b, c + b]]
    }

    fn texture_coords(&self) -> (Vec<Vec3>, Vec<Vec3>) {
        let tex_u = vec![Vec3::new(0.0, 1.0, 1.0), Vec3::new(0.0, 1.0, 0.0)];
        let tex_v = vec![Vec3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 1.0, 1.0)];
        (tex_u, tex_v)
    }
}

/// Five inward-facing planes of a box room, open on the -Z side.
///
/// The room spans `x` in `[-width/2, width/2]`, `y` in `[0, height]` and
/// `z` in `[-length/2, length/2]`. Planes are returned as floor, ceiling,
/// left wall (-X), right wall (+X) and far wall (+Z).
pub fn box_room(width: f32, length: f32, height: f32) -> [Plane; 5] {
    let hw = width / 2.0;
    let hl = length / 2.0;
    let across = Vec3::new(width, 0.0, 0.0);
    let deep = Vec3::new(0.0, 0.0, length);
    let up = Vec3::new(0.0, height, 0.0);

    [
        Plane::new(Vec3::new(-hw, 0.0, -hl), deep, across),
        Plane::new(Vec3::new(-hw, height, -hl), across, deep),
        Plane::new(Vec3::new(-hw, 0.0, -hl), up, deep),
        Plane::new(Vec3::new(hw, 0.0, -hl), deep, up),
        Plane::new(Vec3::new(-hw, 0.0, hl), up, across),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::face_normal_and_area;

    #[test]
    fn test_plane_triangles_share_orientation() {
        let plane = Plane::new(Vec3::ZERO, Vec3::X * 2.0, Vec3::Y * 3.0);
        let batch = plane.to_batch();

        assert_eq!(batch.len(), 2);
        for (vertices, normal) in batch.vertices.iter().zip(&batch.normals) {
            assert_eq!(*normal, Vec3::Z);
            let (_, area) = face_normal_and_area(vertices);
            assert!((area - 6.0).abs() < 1e-5);
        }
        assert_eq!(plane.normal(), Vec3::Z);
    }

    #[test]
    fn test_plane_texture_coords_follow_vertices() {
        let plane = Plane::new(Vec3::ZERO, Vec3::X, Vec3::Y);
        let triangles = plane.triangles();
        let (tex_u, tex_v) = plane.texture_coords();

        // On a unit plane the texture coordinate equals the vertex position
        for (t, vertices) in triangles.iter().enumerate() {
            for (i, vertex) in vertices.iter().enumerate() {
                assert_eq!(tex_u[t][i], vertex.x);
                assert_eq!(tex_v[t][i], vertex.y);
            }
        }
    }

    #[test]
    fn test_box_room_faces_inward() {
        let planes = box_room(200.0, 200.0, 150.0);
        let interior = Vec3::new(0.0, 75.0, 0.0);

        for plane in &planes {
            let to_inside = interior - plane.center();
            assert!(
                plane.normal().dot(to_inside) > 0.0,
                "plane at {:?} faces outward",
                plane.center()
            );
        }

        assert_eq!(planes[0].normal(), Vec3::Y);
        assert_eq!(planes[1].normal(), -Vec3::Y);
        assert_eq!(planes[4].normal(), -Vec3::Z);
        assert_eq!(planes[4].center(), Vec3::new(0.0, 75.0, 100.0));
    }
}
