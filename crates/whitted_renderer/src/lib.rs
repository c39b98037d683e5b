//! Whitted Renderer - parallel supersampling for Whitted scenes.
//!
//! Turns an immutable [`Scene`] into a clamped [`ImageBuffer`]. Buckets are
//! rendered concurrently with rayon; progress is reported through a
//! lock-free counter owned by each render call.

mod bucket;
mod progress;
mod renderer;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketContext, BucketResult, DEFAULT_BUCKET_SIZE};
pub use progress::ProgressCounter;
pub use renderer::{render_pixel, ImageBuffer, RenderConfig, Renderer, SamplingMode};

use whitted_core::Scene;

/// Render `scene` with the default configuration.
pub fn render(scene: &Scene) -> ImageBuffer {
    Renderer::default().render(scene)
}

/// Render the built-in demo scene: one sphere lit from far above.
pub fn render_demo(width: u32, height: u32) -> ImageBuffer {
    render(&Scene::demo(width, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use whitted_math::RayColor;

    #[test]
    fn test_render_demo_dimensions() {
        let image = render_demo(6, 4);
        assert_eq!((image.width, image.height), (6, 4));
        assert_eq!(image.pixels.len(), 24);
    }

    #[test]
    fn test_render_demo_hits_sphere() {
        let scene = Scene::demo(4, 4);
        let image = render(&scene);
        // The sphere covers the whole narrow view
        assert!(image.pixels.iter().all(|c| *c != scene.background()));
    }

    #[test]
    fn test_render_parsed_scene() {
        let scene = whitted_core::parse_scene(
            "camera 0 0 0 0 0 1 0 1 0 30\n\
             film_resolution 8 6\n\
             background 0 0 1\n\
             max_vertices 3\n\
             vertex -1 -1 5\nvertex 1 -1 5\nvertex 0 1 5\n\
             triangle 0 1 2\n\
             ambient_light 1 1 1\n",
        )
        .unwrap();

        let image = render(&scene);
        // Default material ambient is black, so the triangle renders black
        // against the blue background
        assert_eq!(image.get(4, 3), RayColor::BLACK);
        assert_eq!(image.get(0, 0), RayColor::new(0.0, 0.0, 1.0));
    }
}
