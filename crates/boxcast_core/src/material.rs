//! Materials: a texture plus the density it tiles at.

use std::path::Path;
use std::sync::Arc;

use crate::error::SceneResult;
use crate::texture::Texture;

/// A textured surface material.
///
/// Textures are shared, so several materials can tile the same image at
/// different densities.
#[derive(Clone, Debug)]
pub struct Material {
    /// Material name (for logging)
    pub name: String,

    /// Albedo texture
    pub texture: Arc<Texture>,

    /// Texture repetitions across the [0, 1] texture coordinate range
    pub scale: f32,
}

impl Material {
    /// Create a material from a texture and tiling scale.
    pub fn new(name: impl Into<String>, texture: Arc<Texture>, scale: f32) -> Self {
        Self {
            name: name.into(),
            texture,
            scale,
        }
    }

    /// Create a material from an image file.
    pub fn from_file(
        name: impl Into<String>,
        path: impl AsRef<Path>,
        scale: f32,
    ) -> SceneResult<Self> {
        let texture = Texture::load(path)?;
        Ok(Self::new(name, Arc::new(texture), scale))
    }
}
