//! Example: Build the box room and inspect its geometry store.
//!
//! Run with: cargo run --example box_room -- 200 200 150

use std::env;
use std::sync::Arc;

use boxcast_core::{box_room, Material, SceneBuilder, Texture};
use boxcast_math::Vec3;

fn main() {
    env_logger::init();

    let args: Vec<f32> = env::args().skip(1).filter_map(|a| a.parse().ok()).collect();
    let (width, length, height) = match args.as_slice() {
        [w, l, h, ..] => (*w, *l, *h),
        _ => (200.0, 200.0, 150.0),
    };

    let mut builder = SceneBuilder::new("box_room");
    let texture = Arc::new(Texture::checkerboard(8, 4, Vec3::splat(0.8), Vec3::splat(0.2)));
    let material = builder.add_material(Material::new("checker", texture, 1.0));

    for plane in box_room(width, length, height) {
        match builder.add_object(&plane, material) {
            Ok(range) => println!("  plane at {:?} -> triangles {:?}", plane.center(), range),
            Err(e) => {
                eprintln!("Failed to add plane: {}", e);
                return;
            }
        }
    }

    let scene = builder.build();
    let geometry = scene.geometry();

    println!("\n=== Scene: {} ===", scene.name);
    println!("Triangles: {}", geometry.len());
    for (i, (normal, area)) in geometry.normals().iter().zip(geometry.areas()).enumerate() {
        println!(
            "  [{}] normal ({:.2}, {:.2}, {:.2}), double area {:.1}",
            i, normal.x, normal.y, normal.z, area
        );
    }
}
