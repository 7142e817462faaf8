//! Simple ray casting example.
//!
//! Renders a textured box room lit by two lights and saves color and depth
//! to PPM format.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::sync::Arc;

use boxcast_core::{box_room, Camera, Light, Material, Scene, SceneBuilder, Texture};
use boxcast_renderer::{color_to_rgba, render, Frame, RenderConfig, Vec3};

fn main() {
    env_logger::init();

    println!("BoxCast - Simple Example");
    println!("========================");

    let start = std::time::Instant::now();
    let (scene, camera) = build_scene();
    println!("Scene built in {:?}", start.elapsed());

    let config = RenderConfig::default();
    let frame = render(&scene, camera, &config).expect("camera was just added");

    save_color_ppm(&frame, "output.ppm").expect("Failed to save image");
    save_depth_ppm(&frame, "depth.ppm").expect("Failed to save depth");
    println!("Saved to output.ppm and depth.ppm");
}

fn build_scene() -> (Scene, usize) {
    let mut builder = SceneBuilder::new("simple_render");

    let floor = builder.add_material(Material::new(
        "checker",
        Arc::new(Texture::checkerboard(
            8,
            16,
            Vec3::new(0.35, 0.3, 0.25),
            Vec3::new(0.1, 0.1, 0.12),
        )),
        2.0,
    ));
    let walls = builder.add_material(Material::new(
        "plaster",
        Arc::new(Texture::solid_color(Vec3::new(0.2, 0.22, 0.25))),
        1.0,
    ));

    let [floor_plane, rest @ ..] = box_room(200.0, 200.0, 150.0);
    builder.add_object(&floor_plane, floor).expect("material exists");
    for plane in rest {
        builder.add_object(&plane, walls).expect("material exists");
    }

    builder.add_light(Light::new(
        Vec3::new(0.0, 140.0, 0.0),
        Vec3::splat(0.4),
        Vec3::splat(0.3),
        32.0,
    ));
    builder.add_light(
        Light::new(Vec3::new(-80.0, 60.0, 60.0), Vec3::splat(0.2), Vec3::ZERO, 1.0)
            .with_color(Vec3::new(1.0, 0.8, 0.6)),
    );

    let camera = builder.add_camera(
        Camera::new()
            .with_resolution(320, 240)
            .with_fov(70.0)
            .with_pose(Vec3::new(0.0, 40.0, -90.0), Vec3::new(0.0, -0.15, 1.0), Vec3::Y)
            .with_supersampling(2),
    );

    (builder.build(), camera)
}

fn save_color_ppm(frame: &Frame, filename: &str) -> std::io::Result<()> {
    let image = &frame.image;
    let file = File::create(filename)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for color in &image.pixels {
        let [r, g, b, _] = color_to_rgba(*color);
        writeln!(writer, "{} {} {}", r, g, b)?;
    }

    Ok(())
}

fn save_depth_ppm(frame: &Frame, filename: &str) -> std::io::Result<()> {
    let depth = &frame.depth;
    let file = File::create(filename)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "P2")?;
    writeln!(writer, "{} {}", depth.width, depth.height)?;
    writeln!(writer, "255")?;

    for gray in depth.to_gray() {
        writeln!(writer, "{}", gray)?;
    }

    Ok(())
}
