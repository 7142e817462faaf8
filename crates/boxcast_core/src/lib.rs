//! boxcast core - scene data for the ray caster.
//!
//! This crate provides:
//!
//! - **Geometry store**: `GeometryBuilder`, `Geometry`, `TriangleSource`
//! - **Scene objects**: `Plane` and the five-plane `box_room`
//! - **Shading inputs**: `Texture`, `Material`, `Light`
//! - **Cameras**: pinhole and spherical `Camera`, `Trajectory`
//!
//! # Example
//!
//! ```ignore
//! use boxcast_core::{box_room, Camera, Material, SceneBuilder, Texture};
//!
//! let mut builder = SceneBuilder::new("room");
//! let wall = builder.add_material(Material::new("wall", texture, 4.0));
//! for plane in box_room(200.0, 200.0, 150.0) {
//!     builder.add_object(&plane, wall)?;
//! }
//! let camera = builder.add_camera(Camera::new());
//! let scene = builder.build();
//! ```

pub mod camera;
pub mod error;
pub mod geometry;
pub mod light;
pub mod material;
pub mod plane;
pub mod scene;
pub mod texture;

// Re-export commonly used types
pub use camera::{Camera, CameraPose, Projection, Trajectory};
pub use error::{SceneError, SceneResult, TextureError, TextureResult};
pub use geometry::{
    Geometry, GeometryBuilder, TriangleBatch, TriangleSource, DEFAULT_TRIANGLE_CAPACITY,
};
pub use light::Light;
pub use material::Material;
pub use plane::{box_room, Plane};
pub use scene::{Scene, SceneBuilder};
pub use texture::Texture;
