//! Frame rendering: one intersect + shade pass per antialiasing sample.
//!
//! Implements:
//! - Nearest-hit ray casting against every triangle
//! - Additive texture + Phong shading
//! - Supersampling by averaging camera jitter samples
//! - Depth along the camera's optical axis

use std::time::Instant;

use boxcast_core::{Camera, Scene};
use boxcast_math::{Ray, Vec2, Vec3};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{RenderError, RenderResult};
use crate::frame::{Color, DepthBuffer, Frame, ImageBuffer};
use crate::intersect::{intersect_all, Hit, DETERMINANT_EPSILON};
use crate::shade::{shade, NORMALIZE_EPSILON};

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Added to the ray/triangle determinant before dividing
    pub determinant_epsilon: f32,
    /// Added to vector lengths before normalizing
    pub normalize_epsilon: f32,
    /// Spread per-pixel work over the rayon thread pool
    pub parallel: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            determinant_epsilon: DETERMINANT_EPSILON,
            normalize_epsilon: NORMALIZE_EPSILON,
            parallel: true,
        }
    }
}

impl RenderConfig {
    /// Run on the calling thread only.
    pub fn serial(mut self) -> Self {
        self.parallel = false;
        self
    }
}

/// Running per-pixel sums for one render call.
struct Accumulator {
    color: Vec<Color>,
    depth: Vec<f32>,
}

impl Accumulator {
    fn new(pixels: usize) -> Self {
        Self {
            color: vec![Color::ZERO; pixels],
            depth: vec![0.0; pixels],
        }
    }

    /// Divide by the sample count and shape into the camera raster.
    fn resolve(mut self, camera: &Camera, samples: usize) -> Frame {
        let scale = 1.0 / samples.max(1) as f32;
        self.color.iter_mut().for_each(|c| *c *= scale);
        self.depth.iter_mut().for_each(|d| *d *= scale);

        Frame {
            image: ImageBuffer {
                width: camera.image_width,
                height: camera.image_height,
                pixels: self.color,
            },
            depth: DepthBuffer {
                width: camera.image_width,
                height: camera.image_height,
                values: self.depth,
            },
        }
    }
}

/// Render the scene through one of its cameras.
pub fn render(scene: &Scene, camera_id: usize, config: &RenderConfig) -> RenderResult<Frame> {
    let camera = scene.camera(camera_id).ok_or_else(|| RenderError::UnknownCamera {
        id: camera_id,
        count: scene.cameras().len(),
    })?;

    Ok(render_camera(scene, camera, config))
}

/// Render the scene through a camera that need not belong to it.
pub fn render_camera(scene: &Scene, camera: &Camera, config: &RenderConfig) -> Frame {
    let start = Instant::now();
    let jitter = camera.jitter();

    log::info!(
        "Rendering {}x{} {:?} @ {} samples against {} triangles",
        camera.image_width,
        camera.image_height,
        camera.projection(),
        jitter.len(),
        scene.geometry().len()
    );

    let mut acc = Accumulator::new(camera.pixel_count());
    for (i, offset) in jitter.iter().enumerate() {
        let hits = render_sample(scene, camera, *offset, config, &mut acc);
        log::debug!("Sample {}/{} ({:?}): {} pixels hit", i + 1, jitter.len(), offset, hits);
    }

    let frame = acc.resolve(camera, jitter.len());
    log::info!("Rendered in {:?}", start.elapsed());
    frame
}

/// Trace and shade one antialiasing sample into the running sums.
///
/// Returns the number of pixels that hit geometry.
fn render_sample(
    scene: &Scene,
    camera: &Camera,
    offset: Vec2,
    config: &RenderConfig,
    acc: &mut Accumulator,
) -> usize {
    let origin = camera.position();
    let directions = camera.ray_directions(offset);
    let hits = intersect_all(
        origin,
        &directions,
        scene.geometry(),
        camera.range(),
        config.determinant_epsilon,
        config.parallel,
    );

    let pixel = |((color, depth), (hit, direction)): (
        (&mut Color, &mut f32),
        (&Option<Hit>, &Vec3),
    )| {
        if let Some(hit) = hit {
            let ray = Ray::new(origin, *direction);
            accumulate_hit(scene, camera, config, hit, ray, color, depth);
        }
    };

    let Accumulator { color, depth } = acc;
    if config.parallel {
        color
            .par_iter_mut()
            .zip(depth.par_iter_mut())
            .zip(hits.par_iter().zip(directions.par_iter()))
            .for_each(pixel);
    } else {
        color
            .iter_mut()
            .zip(depth.iter_mut())
            .zip(hits.iter().zip(directions.iter()))
            .for_each(pixel);
    }

    hits.iter().filter(|hit| hit.is_some()).count()
}

#[inline]
fn accumulate_hit(
    scene: &Scene,
    camera: &Camera,
    config: &RenderConfig,
    hit: &Hit,
    ray: Ray,
    color: &mut Color,
    depth: &mut f32,
) {
    *depth += ray.depth_along(hit.t, camera.forward());
    *color += shade(
        hit,
        &ray,
        scene.geometry(),
        scene.materials(),
        scene.lights(),
        config.normalize_epsilon,
    );
}
