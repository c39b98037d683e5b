//! Example: Load and inspect a scene file.
//!
//! Run with: cargo run --example inspect_scene -- scenes/spheres.txt

use std::env;

use whitted_core::{load_scene, Geometry, Hittable, Light};

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Usage: inspect_scene <path-to-scene-file>");
        println!("\nExample:");
        println!("  cargo run --example inspect_scene -- scenes/spheres.txt");
        return;
    }

    let path = &args[1];
    println!("Loading scene file: {}", path);

    match load_scene(path) {
        Ok(file) => {
            let scene = &file.scene;
            let camera = scene.camera();
            let pos = camera.position();
            let fwd = camera.forward();

            println!("\n=== Scene ===");
            println!("Output: {}", file.output_image.display());
            println!("Resolution: {}x{}", camera.width(), camera.height());
            println!(
                "Camera: ({:.2}, {:.2}, {:.2}) looking ({:.2}, {:.2}, {:.2}), half fov {:.2} x {:.2} deg",
                pos.x(),
                pos.y(),
                pos.z(),
                fwd.x(),
                fwd.y(),
                fwd.z(),
                camera.half_fov_x().to_degrees(),
                camera.half_fov_y().to_degrees()
            );
            println!("Max depth: {}", scene.max_depth());

            println!("\n--- Geometry ({}) ---", scene.geometry().len());
            for (i, object) in scene.geometry().iter().enumerate() {
                let kind = match object {
                    Geometry::Sphere(s) => format!(
                        "sphere at ({:.2}, {:.2}, {:.2}) r={:.2}",
                        s.center().x(),
                        s.center().y(),
                        s.center().z(),
                        s.radius()
                    ),
                    Geometry::Triangle(_) => "triangle".to_string(),
                    Geometry::SmoothTriangle(_) => "smooth triangle".to_string(),
                };
                let material = object.material();
                println!(
                    "  [{}] {} reflective={} transmissive={}",
                    i,
                    kind,
                    material.is_reflective(),
                    material.is_transmissive()
                );
            }

            println!("\n--- Lights ({}) ---", scene.lights().len());
            for (i, light) in scene.lights().iter().enumerate() {
                let kind = match light {
                    Light::Point(_) => "point",
                    Light::Spot(_) => "spot",
                    Light::Directional(_) => "directional",
                };
                let c = light.color();
                println!("  [{}] {} ({:.2}, {:.2}, {:.2})", i, kind, c.r(), c.g(), c.b());
            }
        }
        Err(e) => {
            eprintln!("Error loading scene file: {}", e);
        }
    }
}
