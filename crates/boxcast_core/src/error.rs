//! Errors raised while building a scene.
//!
//! Rendering itself never fails on geometry: degenerate triangles and rays
//! that hit nothing are part of normal operation. Everything here is a
//! build-time integrity problem and is fatal to the scene being built.

use thiserror::Error;

/// Errors that can occur while building a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Geometry store full: {requested} triangles requested, capacity is {capacity}")]
    CapacityExceeded { requested: usize, capacity: usize },

    #[error("Triangle batch is inconsistent: {field} has {actual} entries, expected {expected}")]
    BatchLengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Unknown material index {index} (scene has {count} materials)")]
    UnknownMaterial { index: usize, count: usize },

    #[error("Texture error: {0}")]
    Texture(#[from] TextureError),
}

/// Errors that can occur during texture creation or loading.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("Failed to load texture {path}: {source}")]
    Load {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Texture must be at least 1x1, got {width}x{height}")]
    Empty { width: u32, height: u32 },

    #[error("Texture {width}x{height} needs {expected} texels, got {actual}")]
    SizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

pub type SceneResult<T> = Result<T, SceneError>;
pub type TextureResult<T> = Result<T, TextureError>;
