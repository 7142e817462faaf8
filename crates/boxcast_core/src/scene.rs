//! Scene assembly: geometry, materials, lights and cameras.
//!
//! A [`SceneBuilder`] collects materials first and then objects that
//! reference them, so material indices are checked while the scene is being
//! built rather than discovered broken during rendering.

use std::ops::Range;
use std::sync::Arc;

use crate::camera::Camera;
use crate::error::{SceneError, SceneResult};
use crate::geometry::{Geometry, GeometryBuilder, TriangleBatch, TriangleSource};
use crate::light::Light;
use crate::material::Material;

/// Builder for a [`Scene`].
#[derive(Debug)]
pub struct SceneBuilder {
    name: String,
    geometry: GeometryBuilder,
    materials: Vec<Arc<Material>>,
    lights: Vec<Light>,
    cameras: Vec<Camera>,
}

impl SceneBuilder {
    /// Create an empty builder with the default triangle capacity.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            geometry: GeometryBuilder::new(),
            materials: Vec::new(),
            lights: Vec::new(),
            cameras: Vec::new(),
        }
    }

    /// Bound the geometry store to `capacity` triangles.
    ///
    /// Must be called before any object is added; already appended triangles
    /// are discarded.
    pub fn with_triangle_capacity(mut self, capacity: usize) -> Self {
        self.geometry = GeometryBuilder::with_capacity(capacity);
        self
    }

    /// Add a material and return its index.
    pub fn add_material(&mut self, material: Material) -> usize {
        let id = self.materials.len();
        log::debug!("Material {}: {}", id, material.name);
        self.materials.push(Arc::new(material));
        id
    }

    /// Add a light.
    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// Add a camera and return its index.
    pub fn add_camera(&mut self, camera: Camera) -> usize {
        self.cameras.push(camera);
        self.cameras.len() - 1
    }

    /// Append an object's triangles with the given material.
    pub fn add_object(
        &mut self,
        object: &dyn TriangleSource,
        material: usize,
    ) -> SceneResult<Range<usize>> {
        self.add_batch(object.to_batch(), material)
    }

    /// Append a prepared triangle batch with the given material.
    pub fn add_batch(
        &mut self,
        batch: TriangleBatch,
        material: usize,
    ) -> SceneResult<Range<usize>> {
        if material >= self.materials.len() {
            return Err(SceneError::UnknownMaterial {
                index: material,
                count: self.materials.len(),
            });
        }
        self.geometry.append(batch, material)
    }

    /// Finalize the geometry store and produce the scene.
    pub fn build(self) -> Scene {
        let geometry = self.geometry.finalize();

        log::info!(
            "Built scene '{}': {} triangles, {} materials, {} lights, {} cameras",
            self.name,
            geometry.len(),
            self.materials.len(),
            self.lights.len(),
            self.cameras.len()
        );

        Scene {
            name: self.name,
            geometry,
            materials: self.materials,
            lights: self.lights,
            cameras: self.cameras,
        }
    }
}

/// A complete scene ready for rendering.
///
/// Geometry, materials and lights are fixed once built; cameras can still
/// be moved between renders.
#[derive(Clone, Debug)]
pub struct Scene {
    /// Scene name (for logging)
    pub name: String,
    geometry: Geometry,
    materials: Vec<Arc<Material>>,
    lights: Vec<Light>,
    cameras: Vec<Camera>,
}

impl Scene {
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn materials(&self) -> &[Arc<Material>] {
        &self.materials
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn cameras(&self) -> &[Camera] {
        &self.cameras
    }

    /// Get a camera by index.
    pub fn camera(&self, id: usize) -> Option<&Camera> {
        self.cameras.get(id)
    }

    /// Get a camera by index for repositioning.
    pub fn camera_mut(&mut self, id: usize) -> Option<&mut Camera> {
        self.cameras.get_mut(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plane::{box_room, Plane};
    use crate::texture::Texture;
    use boxcast_math::Vec3;

    fn grey() -> Material {
        Material::new("grey", Arc::new(Texture::solid_color(Vec3::splat(0.5))), 1.0)
    }

    #[test]
    fn test_build_box_room() {
        let mut builder = SceneBuilder::new("room");
        let material = builder.add_material(grey());
        for plane in box_room(200.0, 200.0, 150.0) {
            builder.add_object(&plane, material).unwrap();
        }
        let camera = builder.add_camera(Camera::new());
        builder.add_light(Light::new(Vec3::new(0.0, 140.0, 0.0), Vec3::ONE, Vec3::ZERO, 1.0));

        let scene = builder.build();
        assert_eq!(scene.geometry().len(), 10);
        assert_eq!(scene.materials().len(), 1);
        assert_eq!(scene.lights().len(), 1);
        assert!(scene.camera(camera).is_some());
        assert!(scene.camera(camera + 1).is_none());
    }

    #[test]
    fn test_unknown_material_fails_at_build_time() {
        let mut builder = SceneBuilder::new("broken");
        builder.add_material(grey());

        let plane = Plane::new(Vec3::ZERO, Vec3::X, Vec3::Y);
        let err = builder.add_object(&plane, 1).unwrap_err();
        assert!(matches!(err, SceneError::UnknownMaterial { index: 1, count: 1 }));
    }

    #[test]
    fn test_capacity_bound_applies() {
        let mut builder = SceneBuilder::new("small").with_triangle_capacity(3);
        let material = builder.add_material(grey());
        let plane = Plane::new(Vec3::ZERO, Vec3::X, Vec3::Y);

        builder.add_object(&plane, material).unwrap();
        let err = builder.add_object(&plane, material).unwrap_err();
        assert!(matches!(err, SceneError::CapacityExceeded { .. }));
        assert_eq!(builder.build().geometry().len(), 2);
    }

    #[test]
    fn test_camera_can_move_after_build() {
        let mut builder = SceneBuilder::new("moving");
        let id = builder.add_camera(Camera::new());
        let mut scene = builder.build();

        scene
            .camera_mut(id)
            .unwrap()
            .set_pose(Vec3::new(1.0, 2.0, 3.0), Vec3::X, Vec3::Y);
        assert_eq!(scene.camera(id).unwrap().position(), Vec3::new(1.0, 2.0, 3.0));
    }
}
