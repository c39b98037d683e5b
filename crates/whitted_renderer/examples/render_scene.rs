//! Example: Render a scene file to an image.
//!
//! Run with: cargo run --release --example render_scene -- scenes/spheres.txt [output.png]
//!
//! Without arguments the built-in demo scene is rendered to `demo.png`.

use std::env;
use std::path::PathBuf;

use anyhow::Context;
use log::LevelFilter;
use whitted_core::{load_scene, Scene};
use whitted_renderer::{RenderConfig, Renderer};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(LevelFilter::Info)
        .init();

    let args: Vec<String> = env::args().collect();

    let (scene, output) = match args.get(1) {
        Some(path) => {
            let file = load_scene(path).with_context(|| format!("Failed to load scene {}", path))?;
            let output = args.get(2).map(PathBuf::from).unwrap_or(file.output_image);
            (file.scene, output)
        }
        None => {
            log::info!("No scene file given, rendering the demo scene");
            (Scene::demo(400, 300), PathBuf::from("demo.png"))
        }
    };

    let renderer = Renderer::new(RenderConfig::default());
    let image = renderer.render_with_progress(&scene, |done, total| {
        log::info!("{:5.1}% ({}/{})", 100.0 * done as f64 / total as f64, done, total);
    });

    image
        .save(&output)
        .with_context(|| format!("Failed to save {}", output.display()))?;
    println!("Saved to {}", output.display());

    Ok(())
}
