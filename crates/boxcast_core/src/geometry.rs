//! Flattened triangle storage for the whole scene.
//!
//! Scene objects hand their triangles over as a [`TriangleBatch`]; the
//! [`GeometryBuilder`] appends batches into structure-of-arrays storage and
//! [`GeometryBuilder::finalize`] turns it into the read-only [`Geometry`]
//! the renderer walks.

use std::ops::Range;

use boxcast_math::Vec3;

use crate::error::{SceneError, SceneResult};

/// Upper bound on the number of triangles a default builder accepts.
pub const DEFAULT_TRIANGLE_CAPACITY: usize = 1 << 20;

/// Triangles of one scene object with their derived attributes.
///
/// Every vector holds one entry per triangle. Texture coordinates store the
/// three per-vertex values of a triangle in the x, y and z components.
#[derive(Clone, Debug, Default)]
pub struct TriangleBatch {
    pub vertices: Vec<[Vec3; 3]>,
    pub normals: Vec<Vec3>,
    pub tex_u: Vec<Vec3>,
    pub tex_v: Vec<Vec3>,
    pub centroids: Vec<Vec3>,
    pub areas: Vec<f32>,
}

impl TriangleBatch {
    /// Build a batch from vertices and texture coordinates, deriving
    /// normals, double areas and centroids from the vertex winding.
    pub fn from_triangles(vertices: Vec<[Vec3; 3]>, tex_u: Vec<Vec3>, tex_v: Vec<Vec3>) -> Self {
        let (normals, areas) = vertices.iter().map(face_normal_and_area).unzip();
        let centroids = vertices.iter().map(centroid).collect();

        Self {
            vertices,
            normals,
            tex_u,
            tex_v,
            centroids,
            areas,
        }
    }

    /// Number of triangles in the batch.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Check if the batch has no triangles.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    fn validate(&self) -> SceneResult<()> {
        let expected = self.vertices.len();
        let fields = [
            ("normals", self.normals.len()),
            ("tex_u", self.tex_u.len()),
            ("tex_v", self.tex_v.len()),
            ("centroids", self.centroids.len()),
            ("areas", self.areas.len()),
        ];

        for (field, actual) in fields {
            if actual != expected {
                return Err(SceneError::BatchLengthMismatch {
                    field,
                    expected,
                    actual,
                });
            }
        }

        Ok(())
    }
}

/// Unit normal and double area of a triangle.
///
/// The normal follows `(v1 - v0) x (v2 - v0)`. Degenerate triangles get a
/// +Y normal and zero area; the intersection epsilon keeps them harmless.
pub fn face_normal_and_area(vertices: &[Vec3; 3]) -> (Vec3, f32) {
    let [v0, v1, v2] = *vertices;
    let cross = (v1 - v0).cross(v2 - v0);
    let double_area = cross.length();

    if double_area > 0.0 {
        (cross / double_area, double_area)
    } else {
        (Vec3::Y, 0.0)
    }
}

/// Average of the three vertices.
pub fn centroid(vertices: &[Vec3; 3]) -> Vec3 {
    (vertices[0] + vertices[1] + vertices[2]) / 3.0
}

/// Anything that can be decomposed into textured triangles.
///
/// Implementors only have to provide the vertices and texture coordinates;
/// normals, areas and centroids default to values derived from the winding.
pub trait TriangleSource {
    /// Triangle vertices, wound so that the normal faces the viewer.
    fn triangles(&self) -> Vec<[Vec3; 3]>;

    /// Per-triangle (U, V) texture coordinates, one component per vertex.
    fn texture_coords(&self) -> (Vec<Vec3>, Vec<Vec3>);

    /// Unit normals and double areas.
    fn normals_and_areas(&self) -> (Vec<Vec3>, Vec<f32>) {
        self.triangles().iter().map(face_normal_and_area).unzip()
    }

    /// Triangle centroids.
    fn centroids(&self) -> Vec<Vec3> {
        self.triangles().iter().map(centroid).collect()
    }

    /// Collect everything into a batch ready for [`GeometryBuilder::append`].
    fn to_batch(&self) -> TriangleBatch {
        let (tex_u, tex_v) = self.texture_coords();
        let (normals, areas) = self.normals_and_areas();

        TriangleBatch {
            vertices: self.triangles(),
            normals,
            tex_u,
            tex_v,
            centroids: self.centroids(),
            areas,
        }
    }
}

/// Append-only builder for [`Geometry`].
///
/// Storage grows on demand up to a fixed triangle capacity.
#[derive(Debug)]
pub struct GeometryBuilder {
    capacity: usize,
    vertices: Vec<[Vec3; 3]>,
    normals: Vec<Vec3>,
    tex_u: Vec<Vec3>,
    tex_v: Vec<Vec3>,
    centroids: Vec<Vec3>,
    areas: Vec<f32>,
    materials: Vec<usize>,
}

impl GeometryBuilder {
    /// Create a builder bounded by [`DEFAULT_TRIANGLE_CAPACITY`].
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_TRIANGLE_CAPACITY)
    }

    /// Create a builder that accepts at most `capacity` triangles.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            vertices: Vec::new(),
            normals: Vec::new(),
            tex_u: Vec::new(),
            tex_v: Vec::new(),
            centroids: Vec::new(),
            areas: Vec::new(),
            materials: Vec::new(),
        }
    }

    /// Maximum number of triangles this builder accepts.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of triangles appended so far.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Check if nothing has been appended yet.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Append one object's triangles, all sharing `material`.
    ///
    /// Returns the index range the triangles occupy. On error nothing is
    /// appended.
    pub fn append(&mut self, batch: TriangleBatch, material: usize) -> SceneResult<Range<usize>> {
        batch.validate()?;

        let start = self.len();
        let requested = start + batch.len();
        if requested > self.capacity {
            return Err(SceneError::CapacityExceeded {
                requested,
                capacity: self.capacity,
            });
        }

        let degenerate = batch.areas.iter().filter(|area| **area <= 0.0).count();
        if degenerate > 0 {
            log::warn!("Appending {} degenerate triangles (material {})", degenerate, material);
        }

        self.vertices.extend(batch.vertices);
        self.normals.extend(batch.normals);
        self.tex_u.extend(batch.tex_u);
        self.tex_v.extend(batch.tex_v);
        self.centroids.extend(batch.centroids);
        self.areas.extend(batch.areas);
        self.materials.resize(requested, material);

        log::debug!("Appended triangles {}..{} with material {}", start, requested, material);

        Ok(start..requested)
    }

    /// Trim storage to the live triangle count and freeze it.
    pub fn finalize(mut self) -> Geometry {
        self.vertices.shrink_to_fit();
        self.normals.shrink_to_fit();
        self.tex_u.shrink_to_fit();
        self.tex_v.shrink_to_fit();
        self.centroids.shrink_to_fit();
        self.areas.shrink_to_fit();
        self.materials.shrink_to_fit();

        log::info!("Finalized geometry: {} triangles", self.vertices.len());

        Geometry {
            vertices: self.vertices,
            normals: self.normals,
            tex_u: self.tex_u,
            tex_v: self.tex_v,
            centroids: self.centroids,
            areas: self.areas,
            materials: self.materials,
        }
    }
}

impl Default for GeometryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only triangle table used during rendering.
#[derive(Clone, Debug)]
pub struct Geometry {
    vertices: Vec<[Vec3; 3]>,
    normals: Vec<Vec3>,
    tex_u: Vec<Vec3>,
    tex_v: Vec<Vec3>,
    centroids: Vec<Vec3>,
    areas: Vec<f32>,
    materials: Vec<usize>,
}

impl Geometry {
    /// Number of triangles.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Check if the store holds no triangles.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertices(&self) -> &[[Vec3; 3]] {
        &self.vertices
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn tex_u(&self) -> &[Vec3] {
        &self.tex_u
    }

    pub fn tex_v(&self) -> &[Vec3] {
        &self.tex_v
    }

    pub fn centroids(&self) -> &[Vec3] {
        &self.centroids
    }

    pub fn areas(&self) -> &[f32] {
        &self.areas
    }

    /// Material index of every triangle.
    pub fn materials(&self) -> &[usize] {
        &self.materials
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_triangle() -> [Vec3; 3] {
        [Vec3::ZERO, Vec3::X, Vec3::Y]
    }

    fn batch(count: usize) -> TriangleBatch {
        TriangleBatch::from_triangles(
            vec![unit_triangle(); count],
            vec![Vec3::new(0.0, 1.0, 0.0); count],
            vec![Vec3::new(0.0, 0.0, 1.0); count],
        )
    }

    #[test]
    fn test_derived_attributes() {
        let (normal, area) = face_normal_and_area(&unit_triangle());
        assert_eq!(normal, Vec3::Z);
        assert!((area - 1.0).abs() < 1e-6);

        let c = centroid(&unit_triangle());
        assert!((c - Vec3::new(1.0 / 3.0, 1.0 / 3.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_degenerate_triangle_has_zero_area() {
        let (normal, area) = face_normal_and_area(&[Vec3::ZERO, Vec3::X, Vec3::X * 2.0]);
        assert_eq!(area, 0.0);
        assert!((normal.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_append_assigns_material_and_range() {
        let mut builder = GeometryBuilder::new();

        let first = builder.append(batch(2), 0).unwrap();
        let second = builder.append(batch(3), 4).unwrap();

        assert_eq!(first, 0..2);
        assert_eq!(second, 2..5);

        let geometry = builder.finalize();
        assert_eq!(geometry.len(), 5);
        assert_eq!(geometry.materials(), &[0, 0, 4, 4, 4]);
        assert_eq!(geometry.normals().len(), 5);
        assert_eq!(geometry.tex_u()[3], Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_capacity_exceeded_appends_nothing() {
        let mut builder = GeometryBuilder::with_capacity(4);
        builder.append(batch(3), 0).unwrap();

        let err = builder.append(batch(2), 0).unwrap_err();
        assert!(matches!(
            err,
            SceneError::CapacityExceeded {
                requested: 5,
                capacity: 4
            }
        ));
        assert_eq!(builder.len(), 3);

        // Filling exactly to capacity is fine
        builder.append(batch(1), 0).unwrap();
        assert_eq!(builder.len(), 4);
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let mut builder = GeometryBuilder::new();
        let mut bad = batch(2);
        bad.tex_v.pop();

        let err = builder.append(bad, 0).unwrap_err();
        assert!(matches!(
            err,
            SceneError::BatchLengthMismatch {
                field: "tex_v",
                expected: 2,
                actual: 1
            }
        ));
        assert!(builder.is_empty());
    }

    #[test]
    fn test_finalize_empty() {
        let geometry = GeometryBuilder::new().finalize();
        assert!(geometry.is_empty());
    }
}
