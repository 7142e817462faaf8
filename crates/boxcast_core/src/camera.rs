//! Cameras: per-pixel ray directions for every antialiasing sample.

use boxcast_math::{Interval, Vec2, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// How screen offsets turn into ray directions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// Flat image plane `focal_length` pixels in front of the camera.
    Pinhole { focal_length: f32 },
    /// Equal-angle grid; `fov` is the horizontal field of view in radians.
    Spherical { fov: f32 },
}

/// Camera for generating rays into the scene.
///
/// Screen offsets are stored per pixel in row-major order, row 0 at the
/// top of the image. Pinhole offsets are in pixels; spherical offsets are
/// azimuth/elevation angles in radians.
#[derive(Debug, Clone)]
pub struct Camera {
    // Image settings
    pub image_width: u32,
    pub image_height: u32,

    // Camera positioning (orthonormal basis)
    position: Vec3,
    forward: Vec3,
    up: Vec3,
    right: Vec3,

    projection: Projection,

    // Valid ray parameter range [t0, t1]
    range: Interval,

    // Antialiasing sub-pixel offsets, in pixels
    jitter: Vec<Vec2>,

    // Cached per-pixel screen offsets (rebuilt when resolution/projection changes)
    screen: Vec<Vec2>,
}

impl Camera {
    /// Create a new camera with default settings.
    ///
    /// 160x120 pinhole with a 60 degree vertical field of view, at the origin
    /// looking down +Z with +Y up, one sample per pixel.
    pub fn new() -> Self {
        let camera = Self {
            image_width: 160,
            image_height: 120,
            position: Vec3::ZERO,
            forward: Vec3::Z,
            up: Vec3::Y,
            right: -Vec3::X,
            projection: Projection::Pinhole { focal_length: 1.0 },
            range: Interval::FORWARD,
            jitter: vec![Vec2::ZERO],
            screen: Vec::new(),
        };
        camera.with_fov(60.0)
    }

    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self.update_screen();
        self
    }

    /// Set camera position and orientation.
    pub fn with_pose(mut self, position: Vec3, forward: Vec3, up: Vec3) -> Self {
        self.set_pose(position, forward, up);
        self
    }

    /// Pinhole projection with the focal length given in pixels.
    pub fn with_focal_length(mut self, focal_length: f32) -> Self {
        self.projection = Projection::Pinhole { focal_length };
        self.update_screen();
        self
    }

    /// Pinhole projection from a vertical field of view in degrees.
    ///
    /// The focal length is derived from the current image height, so set the
    /// resolution first.
    pub fn with_fov(self, vfov: f32) -> Self {
        let half_height = self.image_height as f32 / 2.0;
        let focal_length = half_height / (vfov.to_radians() / 2.0).tan();
        self.with_focal_length(focal_length)
    }

    /// Spherical projection covering `fov` degrees horizontally.
    pub fn with_spherical(mut self, fov: f32) -> Self {
        self.projection = Projection::Spherical {
            fov: fov.to_radians(),
        };
        self.update_screen();
        self
    }

    /// Set the valid ray parameter range.
    pub fn with_range(mut self, t0: f32, t1: f32) -> Self {
        self.range = Interval::new(t0, t1);
        if self.range.is_empty() {
            log::warn!("Camera range [{}, {}] is empty, nothing will be hit", t0, t1);
        }
        self
    }

    /// Use explicit antialiasing offsets (pixels, typically in [-0.5, 0.5]).
    ///
    /// An empty list falls back to a single centered sample.
    pub fn with_jitter(mut self, jitter: Vec<Vec2>) -> Self {
        self.jitter = if jitter.is_empty() {
            vec![Vec2::ZERO]
        } else {
            jitter
        };
        self
    }

    /// Regular `grid x grid` sub-pixel sample pattern.
    pub fn with_supersampling(self, grid: u32) -> Self {
        let grid = grid.max(1);
        let step = 1.0 / grid as f32;
        let jitter = (0..grid)
            .flat_map(|j| (0..grid).map(move |i| (i, j)))
            .map(|(i, j)| {
                Vec2::new(
                    (i as f32 + 0.5) * step - 0.5,
                    (j as f32 + 0.5) * step - 0.5,
                )
            })
            .collect();
        self.with_jitter(jitter)
    }

    /// `count` uniformly random sub-pixel offsets from a seeded generator.
    pub fn with_random_jitter(self, count: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let jitter = (0..count).map(|_| sample_square(&mut rng)).collect();
        self.with_jitter(jitter)
    }

    /// Move and re-orient the camera.
    ///
    /// `forward` and `up` need not be unit length or perpendicular; the
    /// basis is re-orthonormalized with `right = forward x up`.
    pub fn set_pose(&mut self, position: Vec3, forward: Vec3, up: Vec3) {
        let forward = forward.normalize_or_zero();
        let forward = if forward == Vec3::ZERO {
            log::warn!("Camera forward vector is zero, keeping previous direction");
            self.forward
        } else {
            forward
        };

        let mut right = forward.cross(up).normalize_or_zero();
        if right == Vec3::ZERO {
            log::warn!("Camera up vector is parallel to forward, picking an arbitrary one");
            right = forward.any_orthonormal_vector();
        }

        self.position = position;
        self.forward = forward;
        self.right = right;
        self.up = right.cross(forward);
    }

    /// Point the camera at `target`.
    pub fn look_at(&mut self, position: Vec3, target: Vec3, up: Vec3) {
        self.set_pose(position, target - position, up);
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    /// Valid ray parameter range [t0, t1].
    pub fn range(&self) -> Interval {
        self.range
    }

    /// Antialiasing offsets, one per sample.
    pub fn jitter(&self) -> &[Vec2] {
        &self.jitter
    }

    /// Per-pixel screen offsets in row-major order.
    pub fn screen_offsets(&self) -> &[Vec2] {
        &self.screen
    }

    /// Forward component of every ray direction.
    ///
    /// Constant for the pinhole model. Spherical directions are unit length
    /// and their forward component varies per pixel, so this reports 1.
    pub fn z_scale(&self) -> f32 {
        match self.projection {
            Projection::Pinhole { focal_length } => focal_length,
            Projection::Spherical { .. } => 1.0,
        }
    }

    /// Number of pixels in the raster.
    pub fn pixel_count(&self) -> usize {
        self.image_width as usize * self.image_height as usize
    }

    /// Ray direction for one pixel and one sub-pixel offset.
    pub fn ray_direction(&self, pixel: usize, jitter: Vec2) -> Vec3 {
        let offset = self.screen[pixel];

        match self.projection {
            Projection::Pinhole { focal_length } => {
                // Jitter lives in raster space where y grows downwards
                self.right * (offset.x + jitter.x)
                    + self.up * (offset.y - jitter.y)
                    + self.forward * focal_length
            }
            Projection::Spherical { fov } => {
                let step = fov / self.image_width.max(1) as f32;
                let azimuth = offset.x + jitter.x * step;
                let elevation = offset.y - jitter.y * step;
                let (sin_az, cos_az) = azimuth.sin_cos();
                let (sin_el, cos_el) = elevation.sin_cos();

                self.forward * (cos_el * cos_az) + self.right * (cos_el * sin_az) + self.up * sin_el
            }
        }
    }

    /// Ray directions for the full raster for one sub-pixel offset.
    pub fn ray_directions(&self, jitter: Vec2) -> Vec<Vec3> {
        (0..self.pixel_count())
            .map(|pixel| self.ray_direction(pixel, jitter))
            .collect()
    }

    fn update_screen(&mut self) {
        let width = self.image_width as f32;
        let height = self.image_height as f32;
        let scale = match self.projection {
            Projection::Pinhole { .. } => 1.0,
            Projection::Spherical { fov } => fov / width.max(1.0),
        };

        self.screen = (0..self.image_height)
            .flat_map(|row| (0..self.image_width).map(move |col| (row, col)))
            .map(|(row, col)| {
                let x = col as f32 + 0.5 - width / 2.0;
                let y = height / 2.0 - row as f32 - 0.5;
                Vec2::new(x, y) * scale
            })
            .collect();
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

/// Sample a random point in the unit square [-0.5, 0.5] x [-0.5, 0.5].
fn sample_square(rng: &mut impl Rng) -> Vec2 {
    Vec2::new(rng.gen::<f32>() - 0.5, rng.gen::<f32>() - 0.5)
}

/// A camera position and viewing target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub target: Vec3,
}

impl CameraPose {
    pub fn new(position: Vec3, target: Vec3) -> Self {
        Self { position, target }
    }
}

/// Piecewise linear camera path through a list of keyframes.
#[derive(Debug, Clone, Default)]
pub struct Trajectory {
    keyframes: Vec<CameraPose>,
}

impl Trajectory {
    pub fn new(keyframes: Vec<CameraPose>) -> Self {
        Self { keyframes }
    }

    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    /// Pose at `s` in [0, 1] along the path (clamped).
    pub fn sample(&self, s: f32) -> Option<CameraPose> {
        let last = self.keyframes.len().checked_sub(1)?;
        if last == 0 {
            return self.keyframes.first().copied();
        }

        let x = s.clamp(0.0, 1.0) * last as f32;
        let i = (x.floor() as usize).min(last - 1);
        let f = x - i as f32;
        let a = self.keyframes[i];
        let b = self.keyframes[i + 1];

        Some(CameraPose {
            position: a.position.lerp(b.position, f),
            target: a.target.lerp(b.target, f),
        })
    }

    /// `frames` evenly spaced poses from the first to the last keyframe.
    pub fn frames(&self, frames: usize) -> Vec<CameraPose> {
        match frames {
            0 => Vec::new(),
            1 => self.sample(0.0).into_iter().collect(),
            n => (0..n)
                .filter_map(|i| self.sample(i as f32 / (n - 1) as f32))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basis_looking_down_z() {
        let camera = Camera::new().with_pose(Vec3::new(0.0, 20.0, -80.0), Vec3::Z, Vec3::Y);

        assert_eq!(camera.position(), Vec3::new(0.0, 20.0, -80.0));
        assert!((camera.forward() - Vec3::Z).length() < 1e-6);
        assert!((camera.up() - Vec3::Y).length() < 1e-6);
        assert!((camera.right() + Vec3::X).length() < 1e-6);
    }

    #[test]
    fn test_basis_is_orthonormalized() {
        let camera = Camera::new().with_pose(
            Vec3::ZERO,
            Vec3::new(1.0, 1.0, 2.0),
            Vec3::new(0.0, 3.0, 0.5),
        );

        assert!((camera.forward().length() - 1.0).abs() < 1e-5);
        assert!((camera.up().length() - 1.0).abs() < 1e-5);
        assert!((camera.right().length() - 1.0).abs() < 1e-5);
        assert!(camera.forward().dot(camera.up()).abs() < 1e-5);
        assert!(camera.forward().dot(camera.right()).abs() < 1e-5);
    }

    #[test]
    fn test_parallel_up_still_gives_basis() {
        let camera = Camera::new().with_pose(Vec3::ZERO, Vec3::Y, Vec3::Y);

        assert!((camera.right().length() - 1.0).abs() < 1e-5);
        assert!(camera.right().dot(camera.forward()).abs() < 1e-5);
    }

    #[test]
    fn test_pinhole_center_pixel_looks_forward() {
        let camera = Camera::new()
            .with_resolution(21, 15)
            .with_focal_length(10.0);

        let center = 7 * 21 + 10;
        assert_eq!(camera.screen_offsets()[center], Vec2::ZERO);
        assert_eq!(camera.ray_direction(center, Vec2::ZERO), Vec3::new(0.0, 0.0, 10.0));
        assert_eq!(camera.z_scale(), 10.0);
    }

    #[test]
    fn test_range_and_projection_builders() {
        let camera = Camera::new().with_range(1.0, 50.0).with_spherical(90.0);
        assert_eq!(camera.range(), Interval::new(1.0, 50.0));
        assert!(matches!(camera.projection(), Projection::Spherical { .. }));

        // Inverted range is kept but rejects every hit
        let camera = camera.with_range(5.0, 1.0);
        assert!(camera.range().is_empty());
        assert!(!camera.range().contains(3.0));
    }

    #[test]
    fn test_pinhole_raster_orientation() {
        let camera = Camera::new().with_resolution(4, 2).with_focal_length(1.0);
        let offsets = camera.screen_offsets();

        assert_eq!(offsets.len(), 8);
        // Top-left pixel is left of and above the optical axis
        assert_eq!(offsets[0], Vec2::new(-1.5, 0.5));
        assert_eq!(offsets[7], Vec2::new(1.5, -0.5));

        let top_left = camera.ray_direction(0, Vec2::ZERO);
        assert!(top_left.dot(camera.up()) > 0.0);
        assert!(top_left.dot(camera.right()) < 0.0);
    }

    #[test]
    fn test_fov_sets_focal_length() {
        let camera = Camera::new().with_resolution(100, 100).with_fov(90.0);
        assert!((camera.z_scale() - 50.0).abs() < 1e-3);
    }

    #[test]
    fn test_spherical_center_and_edge() {
        let camera = Camera::new()
            .with_resolution(3, 1)
            .with_spherical(90.0);

        let center = camera.ray_direction(1, Vec2::ZERO);
        assert!((center - Vec3::Z).length() < 1e-6);

        // Right-most pixel center sits 30 degrees off axis
        let edge = camera.ray_direction(2, Vec2::ZERO);
        assert!((edge.length() - 1.0).abs() < 1e-5);
        assert!((edge.dot(camera.forward()) - 30f32.to_radians().cos()).abs() < 1e-5);
        assert!(edge.dot(camera.right()) > 0.0);
    }

    #[test]
    fn test_supersampling_grid() {
        let camera = Camera::new().with_supersampling(2);
        let jitter = camera.jitter();

        assert_eq!(jitter.len(), 4);
        assert_eq!(jitter[0], Vec2::new(-0.25, -0.25));
        assert_eq!(jitter[3], Vec2::new(0.25, 0.25));

        let single = Camera::new().with_supersampling(1);
        assert_eq!(single.jitter(), &[Vec2::ZERO]);
    }

    #[test]
    fn test_random_jitter_is_seeded() {
        let a = Camera::new().with_random_jitter(8, 42);
        let b = Camera::new().with_random_jitter(8, 42);

        assert_eq!(a.jitter(), b.jitter());
        assert_eq!(a.jitter().len(), 8);
        assert!(a
            .jitter()
            .iter()
            .all(|j| j.x.abs() <= 0.5 && j.y.abs() <= 0.5));
    }

    #[test]
    fn test_empty_jitter_falls_back_to_center() {
        let camera = Camera::new().with_jitter(Vec::new());
        assert_eq!(camera.jitter(), &[Vec2::ZERO]);
    }

    #[test]
    fn test_trajectory_interpolates() {
        let trajectory = Trajectory::new(vec![
            CameraPose::new(Vec3::ZERO, Vec3::Z),
            CameraPose::new(Vec3::new(0.0, 0.0, 10.0), Vec3::new(0.0, 0.0, 11.0)),
            CameraPose::new(Vec3::new(10.0, 0.0, 10.0), Vec3::new(11.0, 0.0, 10.0)),
        ]);

        let mid = trajectory.sample(0.25).unwrap();
        assert_eq!(mid.position, Vec3::new(0.0, 0.0, 5.0));

        let end = trajectory.sample(1.0).unwrap();
        assert_eq!(end.position, Vec3::new(10.0, 0.0, 10.0));

        let frames = trajectory.frames(5);
        assert_eq!(frames.len(), 5);
        assert_eq!(frames[0].position, Vec3::ZERO);
        assert_eq!(frames[2].position, Vec3::new(0.0, 0.0, 10.0));

        assert!(Trajectory::default().sample(0.5).is_none());
    }
}
