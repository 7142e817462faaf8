//! Render output: color image and depth map in raster order.

use boxcast_math::Vec3;

/// Color type alias (RGB, not clamped)
pub type Color = Vec3;

/// Row-major RGB image, row 0 at the top.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; raster_len(width, height)],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[raster_index(self.width, x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[raster_index(self.width, x, y)] = color;
    }

    /// Iterate over image rows.
    pub fn rows(&self) -> impl Iterator<Item = &[Color]> {
        self.pixels.chunks(self.width.max(1) as usize)
    }

    /// Nested `[row][column][channel]` copy of the image.
    pub fn to_array(&self) -> Vec<Vec<[f32; 3]>> {
        self.rows()
            .map(|row| row.iter().map(|c| c.to_array()).collect())
            .collect()
    }

    /// Convert to RGBA bytes (for display or saving).
    pub fn to_rgba(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| color_to_rgba(*c)).collect()
    }
}

/// Row-major depth along the camera axis; 0 where nothing was hit.
#[derive(Debug, Clone, PartialEq)]
pub struct DepthBuffer {
    pub width: u32,
    pub height: u32,
    pub values: Vec<f32>,
}

impl DepthBuffer {
    /// Create a new depth buffer filled with zeros.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            values: vec![0.0; raster_len(width, height)],
        }
    }

    /// Get the depth at (x, y).
    pub fn get(&self, x: u32, y: u32) -> f32 {
        self.values[raster_index(self.width, x, y)]
    }

    /// Largest depth in the buffer.
    pub fn max_depth(&self) -> f32 {
        self.values.iter().copied().fold(0.0, f32::max)
    }

    /// Depth normalized to the farthest pixel as 8-bit gray, far is white.
    pub fn to_gray(&self) -> Vec<u8> {
        let max = self.max_depth();
        if max <= 0.0 {
            return vec![0; self.values.len()];
        }
        self.values
            .iter()
            .map(|d| (255.0 * (d / max).clamp(0.0, 1.0)) as u8)
            .collect()
    }
}

/// Result of one render call.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub image: ImageBuffer,
    pub depth: DepthBuffer,
}

/// Number of pixels in a `width x height` raster.
#[inline]
fn raster_len(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

/// Row-major offset of pixel (x, y).
#[inline]
fn raster_index(width: u32, x: u32, y: u32) -> usize {
    y as usize * width as usize + x as usize
}

/// Clamp a color to [0, 1] and convert to 8-bit RGBA.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let c = color.clamp(Vec3::ZERO, Vec3::ONE) * 255.0;
    [c.x as u8, c.y as u8, c.z as u8, 255]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_get_set() {
        let mut image = ImageBuffer::new(3, 2);
        image.set(2, 1, Color::new(0.1, 0.2, 0.3));

        assert_eq!(image.get(2, 1), Color::new(0.1, 0.2, 0.3));
        assert_eq!(image.pixels[5], Color::new(0.1, 0.2, 0.3));
        assert_eq!(image.rows().count(), 2);

        let nested = image.to_array();
        assert_eq!(nested.len(), 2);
        assert_eq!(nested[1].len(), 3);
        assert_eq!(nested[1][2], [0.1, 0.2, 0.3]);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_raster_index_past_u32() {
        // 70000 * 70000 does not fit in u32
        assert_eq!(raster_index(70_000, 69_999, 69_999), 70_000 * 69_999 + 69_999);
        assert_eq!(raster_len(70_000, 70_000), 4_900_000_000);
        assert_eq!(raster_index(3, 2, 1), 5);
    }

    #[test]
    fn test_color_to_rgba_clamps() {
        assert_eq!(color_to_rgba(Color::new(2.0, -1.0, 1.0)), [255, 0, 255, 255]);
        assert_eq!(color_to_rgba(Color::ZERO), [0, 0, 0, 255]);
    }

    #[test]
    fn test_depth_to_gray() {
        let mut depth = DepthBuffer::new(2, 1);
        depth.values = vec![50.0, 100.0];

        assert_eq!(depth.max_depth(), 100.0);
        assert_eq!(depth.to_gray(), vec![127, 255]);
        assert_eq!(DepthBuffer::new(2, 2).to_gray(), vec![0; 4]);
    }
}
