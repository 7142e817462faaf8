use std::path::Path;

use anyhow::{Context, Result};
use boxcast_renderer::Frame;
use image::{GrayImage, RgbaImage};

/// Convert the color buffer to an 8-bit image (clamped, no gamma).
pub fn color_image(frame: &Frame) -> Result<RgbaImage> {
    let image = &frame.image;
    RgbaImage::from_raw(image.width, image.height, image.to_rgba())
        .context("color buffer does not match its dimensions")
}

/// Convert the depth buffer to an 8-bit gray image, farthest depth white.
pub fn depth_image(frame: &Frame) -> Result<GrayImage> {
    let depth = &frame.depth;
    GrayImage::from_raw(depth.width, depth.height, depth.to_gray())
        .context("depth buffer does not match its dimensions")
}

/// Save `color_NNNN.png` and `depth_NNNN.png` into `dir`.
pub fn save_frame(frame: &Frame, dir: &Path, index: usize) -> Result<()> {
    let color_path = dir.join(format!("color_{:04}.png", index));
    color_image(frame)?
        .save(&color_path)
        .with_context(|| format!("failed to write {}", color_path.display()))?;

    let depth_path = dir.join(format!("depth_{:04}.png", index));
    depth_image(frame)?
        .save(&depth_path)
        .with_context(|| format!("failed to write {}", depth_path.display()))?;

    log::info!("Saved {} and {}", color_path.display(), depth_path.display());
    Ok(())
}
