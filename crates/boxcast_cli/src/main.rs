use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use boxcast_core::{
    box_room, Camera, CameraPose, Light, Material, Scene, SceneBuilder, Texture, Trajectory,
};
use boxcast_math::Vec3;
use boxcast_renderer::{render, RenderConfig};
use clap::Parser;

mod cli;
mod output;

use cli::Args;

const ROOM_WIDTH: f32 = 200.0;
const ROOM_LENGTH: f32 = 200.0;
const ROOM_HEIGHT: f32 = 150.0;
const EYE_HEIGHT: f32 = 40.0;

fn load_config(path: Option<&Path>) -> Result<RenderConfig> {
    let Some(path) = path else {
        return Ok(RenderConfig::default());
    };

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read render config {}", path.display()))?;
    let config = serde_json::from_str(&text)
        .with_context(|| format!("invalid render config {}", path.display()))?;

    log::info!("Loaded render config from {}", path.display());
    Ok(config)
}

fn build_camera(args: &Args) -> Camera {
    let camera = Camera::new()
        .with_resolution(args.width, args.height)
        .with_focal_length(args.focal);

    match args.random_samples {
        Some(count) => camera.with_random_jitter(count, args.seed),
        None => camera.with_supersampling(args.samples),
    }
}

fn build_scene(args: &Args) -> Result<(Scene, usize)> {
    let mut builder = SceneBuilder::new("box_room");

    let floor = match &args.texture {
        Some(path) => Material::from_file("floor", path, 4.0)
            .with_context(|| format!("failed to load floor texture {}", path.display()))?,
        None => Material::new(
            "floor",
            Arc::new(Texture::checkerboard(
                8,
                8,
                Vec3::new(0.3, 0.25, 0.2),
                Vec3::new(0.08, 0.08, 0.1),
            )),
            4.0,
        ),
    };
    let floor = builder.add_material(floor);
    let ceiling = builder.add_material(Material::new(
        "ceiling",
        Arc::new(Texture::solid_color(Vec3::splat(0.15))),
        1.0,
    ));
    let walls = builder.add_material(Material::new(
        "walls",
        Arc::new(Texture::checkerboard(
            4,
            8,
            Vec3::new(0.1, 0.15, 0.25),
            Vec3::new(0.2, 0.1, 0.1),
        )),
        2.0,
    ));

    let [floor_plane, ceiling_plane, left, right, far] =
        box_room(ROOM_WIDTH, ROOM_LENGTH, ROOM_HEIGHT);
    builder.add_object(&floor_plane, floor)?;
    builder.add_object(&ceiling_plane, ceiling)?;
    for wall in [left, right, far] {
        builder.add_object(&wall, walls)?;
    }

    builder.add_light(Light::new(
        Vec3::new(0.0, ROOM_HEIGHT - 10.0, 0.0),
        Vec3::splat(0.35),
        Vec3::splat(0.3),
        32.0,
    ));
    builder.add_light(
        Light::new(
            Vec3::new(-ROOM_WIDTH / 3.0, EYE_HEIGHT, ROOM_LENGTH / 3.0),
            Vec3::splat(0.2),
            Vec3::splat(0.1),
            8.0,
        )
        .with_color(Vec3::new(1.0, 0.85, 0.6)),
    );

    let camera = builder.add_camera(build_camera(args));
    Ok((builder.build(), camera))
}

/// Straight walk along +Z from just inside the open end of the room.
fn fly_through(args: &Args) -> Vec<CameraPose> {
    let start = Vec3::new(0.0, EYE_HEIGHT, -ROOM_LENGTH / 2.0 + 10.0);
    let end = start + Vec3::Z * args.step * args.frames.saturating_sub(1) as f32;
    let look = Vec3::new(0.0, -0.1, 1.0) * ROOM_LENGTH;

    Trajectory::new(vec![
        CameraPose::new(start, start + look),
        CameraPose::new(end, end + look),
    ])
    .frames(args.frames)
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    log::info!("Starting BoxCast");

    let config = load_config(args.config.as_deref())?;
    let (mut scene, camera) = build_scene(&args)?;

    std::fs::create_dir_all(&args.output)
        .with_context(|| format!("failed to create output directory {}", args.output.display()))?;

    let start = Instant::now();
    for (index, pose) in fly_through(&args).into_iter().enumerate() {
        scene
            .camera_mut(camera)
            .context("camera missing from scene")?
            .look_at(pose.position, pose.target, Vec3::Y);

        let frame = render(&scene, camera, &config)?;
        output::save_frame(&frame, &args.output, index)?;
    }

    log::info!("Rendered {} frames in {:?}", args.frames, start.elapsed());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["boxcast"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_fly_through_steps_forward() {
        let poses = fly_through(&args(&["-n", "3", "--step", "5"]));

        assert_eq!(poses.len(), 3);
        assert!((poses[1].position.z - poses[0].position.z - 5.0).abs() < 1e-4);
        assert!((poses[2].position.z - poses[0].position.z - 10.0).abs() < 1e-4);
        assert!(poses.iter().all(|p| p.position.y == EYE_HEIGHT));
    }

    #[test]
    fn test_camera_sampling_choice() {
        assert_eq!(build_camera(&args(&["-s", "3"])).jitter().len(), 9);
        assert_eq!(build_camera(&args(&["--random-samples", "5"])).jitter().len(), 5);
    }

    #[test]
    fn test_scene_renders() {
        let args = args(&["--width", "16", "--height", "12", "--focal", "10", "-s", "1"]);
        let (scene, camera) = build_scene(&args).unwrap();
        assert_eq!(scene.geometry().len(), 10);

        let frame = render(&scene, camera, &RenderConfig::default()).unwrap();
        assert!(frame.depth.max_depth() > 0.0);
    }

    #[test]
    fn test_missing_config_is_an_error() {
        assert!(load_config(Some(Path::new("/nonexistent/boxcast.json"))).is_err());
        assert_eq!(load_config(None).unwrap(), RenderConfig::default());
    }
}
