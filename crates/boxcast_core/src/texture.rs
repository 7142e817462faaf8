//! RGB textures with nearest-texel, tiling lookup.

use std::path::Path;

use boxcast_math::Vec3;

use crate::error::{TextureError, TextureResult};

/// A texture with linear RGB texels.
///
/// Texels are stored row-major; row 0 is the first row of the source image.
#[derive(Clone, Debug)]
pub struct Texture {
    /// Texture width in pixels
    width: u32,

    /// Texture height in pixels
    height: u32,

    /// RGB texels in row-major order
    texels: Vec<Vec3>,

    /// Original file path (for debugging)
    pub path: String,
}

impl Texture {
    /// Create a new texture from texel data.
    pub fn new(
        width: u32,
        height: u32,
        texels: Vec<Vec3>,
        path: impl Into<String>,
    ) -> TextureResult<Self> {
        if width == 0 || height == 0 {
            return Err(TextureError::Empty { width, height });
        }

        let expected = width as usize * height as usize;
        if texels.len() != expected {
            return Err(TextureError::SizeMismatch {
                width,
                height,
                expected,
                actual: texels.len(),
            });
        }

        Ok(Self {
            width,
            height,
            texels,
            path: path.into(),
        })
    }

    /// Create a solid color texture (1x1).
    pub fn solid_color(color: Vec3) -> Self {
        Self {
            width: 1,
            height: 1,
            texels: vec![color],
            path: "<solid>".to_string(),
        }
    }

    /// Create a checkerboard of `cells x cells` squares, each `cell_size`
    /// texels wide.
    pub fn checkerboard(cells: u32, cell_size: u32, a: Vec3, b: Vec3) -> Self {
        let side = (cells * cell_size).max(1);
        let cell_size = cell_size.max(1);

        let texels = (0..side)
            .flat_map(|row| (0..side).map(move |col| (row, col)))
            .map(|(row, col)| {
                if (row / cell_size + col / cell_size) % 2 == 0 {
                    a
                } else {
                    b
                }
            })
            .collect();

        Self {
            width: side,
            height: side,
            texels,
            path: "<checkerboard>".to_string(),
        }
    }

    /// Load a texture from an image file.
    pub fn load(path: impl AsRef<Path>) -> TextureResult<Self> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|source| TextureError::Load {
            path: path.display().to_string(),
            source,
        })?;

        let rgb = img.to_rgb8();
        let (width, height) = rgb.dimensions();
        let texels = rgb
            .pixels()
            .map(|p| Vec3::new(p[0] as f32, p[1] as f32, p[2] as f32) / 255.0)
            .collect();

        let texture = Self::new(width, height, texels, path.to_string_lossy())?;

        log::debug!(
            "Loaded texture: {} ({}x{}, {:.1} KB)",
            texture.path,
            width,
            height,
            texture.size_bytes() as f32 / 1024.0
        );

        Ok(texture)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Look up the texel covering texture coordinate (u, v).
    ///
    /// The coordinate is stretched by `scale`, floored to a texel index and
    /// wrapped so the texture tiles in both directions.
    pub fn lookup(&self, u: f32, v: f32, scale: f32) -> Vec3 {
        let row = wrap_index(scale * v * self.height as f32, self.height);
        let col = wrap_index(scale * u * self.width as f32, self.width);
        self.texel(row, col)
    }

    /// Get the texel at integer coordinates.
    pub fn texel(&self, row: u32, col: u32) -> Vec3 {
        self.texels[row as usize * self.width as usize + col as usize]
    }

    /// Get total size in bytes (approximate).
    pub fn size_bytes(&self) -> usize {
        self.texels.len() * std::mem::size_of::<Vec3>()
    }
}

/// Floor `coord` and wrap it into `[0, extent)`.
#[inline]
fn wrap_index(coord: f32, extent: u32) -> u32 {
    let index = coord.floor() as i64;
    index.rem_euclid(extent as i64) as u32
}
