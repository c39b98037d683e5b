//! Supersampling renderer.
//!
//! Each pixel averages a 3×3 grid of sub-samples at quarter-pixel offsets.
//! In adaptive mode only the four corner sub-samples are taken first; the
//! remaining five are added when any corner strays from the corner mean by
//! more than the adaptive threshold.

use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use whitted_core::Scene;
use whitted_math::RayColor;

use crate::bucket::{generate_buckets, render_bucket, BucketContext, BucketResult, DEFAULT_BUCKET_SIZE};
use crate::progress::ProgressCounter;

/// How sub-samples are chosen within a pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SamplingMode {
    /// Always the full 3×3 grid.
    Fixed,
    /// Four corners first, full grid only where they disagree.
    #[default]
    Adaptive,
}

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub sampling: SamplingMode,
    /// Replace the fixed grid with nine uniformly random sub-samples.
    /// Jittered pixels are never adaptive.
    pub jitter: bool,
    /// Base seed for jitter; combined with pixel coordinates so results do
    /// not depend on thread scheduling.
    pub jitter_seed: u64,
    pub bucket_size: u32,
    /// Summed per-channel deviation above which adaptive sampling expands.
    pub adaptive_threshold: f64,
    /// Completed pixels between progress notifications.
    pub progress_interval: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            sampling: SamplingMode::Adaptive,
            jitter: false,
            jitter_seed: 0,
            bucket_size: DEFAULT_BUCKET_SIZE,
            adaptive_threshold: 0.01,
            progress_interval: 100,
        }
    }
}

impl RenderConfig {
    pub fn with_sampling(mut self, sampling: SamplingMode) -> Self {
        self.sampling = sampling;
        self
    }

    pub fn with_jitter(mut self, seed: u64) -> Self {
        self.jitter = true;
        self.jitter_seed = seed;
        self
    }

    pub fn with_bucket_size(mut self, bucket_size: u32) -> Self {
        self.bucket_size = bucket_size;
        self
    }

    pub fn with_adaptive_threshold(mut self, threshold: f64) -> Self {
        self.adaptive_threshold = threshold;
        self
    }

    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval;
        self
    }
}

const CORNER_OFFSETS: [(f64, f64); 4] = [(0.25, 0.25), (0.75, 0.25), (0.25, 0.75), (0.75, 0.75)];

const EDGE_OFFSETS: [(f64, f64); 5] = [(0.5, 0.25), (0.25, 0.5), (0.5, 0.5), (0.75, 0.5), (0.5, 0.75)];

const SAMPLES_PER_PIXEL: usize = 9;

fn pixel_rng(seed: u64, x: u32, y: u32) -> StdRng {
    let coords = (u64::from(y) << 32) | u64::from(x);
    StdRng::seed_from_u64(seed ^ coords.wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Render a single pixel. The result is the unclamped mean of the samples
/// actually taken.
pub fn render_pixel(scene: &Scene, x: u32, y: u32, config: &RenderConfig) -> RayColor {
    let camera = scene.camera();
    let (w, h) = (camera.width() as f64, camera.height() as f64);
    let sample = |dx: f64, dy: f64| {
        let ray = scene.construct_ray((x as f64 + dx) / w, (y as f64 + dy) / h);
        scene.find_intersection_color(&ray)
    };

    if config.jitter {
        let mut rng = pixel_rng(config.jitter_seed, x, y);
        let sum: RayColor = (0..SAMPLES_PER_PIXEL)
            .map(|_| sample(rng.gen(), rng.gen()))
            .sum();
        return sum / SAMPLES_PER_PIXEL as f64;
    }

    let corners = CORNER_OFFSETS.map(|(dx, dy)| sample(dx, dy));
    let corner_sum: RayColor = corners.iter().copied().sum();

    if config.sampling == SamplingMode::Adaptive {
        let mean = corner_sum / corners.len() as f64;
        let uniform = corners
            .iter()
            .all(|&c| (c - mean).abs_channel_sum() <= config.adaptive_threshold);
        if uniform {
            return mean;
        }
    }

    let edge_sum: RayColor = EDGE_OFFSETS.iter().map(|&(dx, dy)| sample(dx, dy)).sum();
    (corner_sum + edge_sum) / SAMPLES_PER_PIXEL as f64
}

/// Clamped RGB pixels of a finished render.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<RayColor>,
}

impl ImageBuffer {
    /// Create a buffer with every pixel set to `color`.
    pub fn filled(width: u32, height: u32, color: RayColor) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    pub fn get(&self, x: u32, y: u32) -> RayColor {
        self.pixels[self.offset(x, y)]
    }

    pub fn set(&mut self, x: u32, y: u32, color: RayColor) {
        let offset = self.offset(x, y);
        self.pixels[offset] = color;
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Copy a rendered bucket into place.
    pub fn write_bucket(&mut self, result: &BucketResult) {
        let b = &result.bucket;
        for (i, &color) in result.pixels.iter().enumerate() {
            let local_x = (i % b.width as usize) as u32;
            let local_y = (i / b.width as usize) as u32;
            self.set(b.x + local_x, b.y + local_y, color);
        }
    }

    /// Convert to 8-bit RGBA bytes (for display or saving).
    pub fn to_rgba(&self) -> Vec<u8> {
        let texels: Vec<[u8; 4]> = self
            .pixels
            .iter()
            .map(|c| {
                let [r, g, b] = c.to_rgb8();
                [r, g, b, 255]
            })
            .collect();
        bytemuck::cast_slice(&texels).to_vec()
    }

    /// Write the image; the format follows the file extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> image::ImageResult<()> {
        image::save_buffer(
            path,
            &self.to_rgba(),
            self.width,
            self.height,
            image::ColorType::Rgba8,
        )
    }
}

/// Renders scenes bucket by bucket on the rayon thread pool.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    config: RenderConfig,
    cancel: Option<Arc<AtomicBool>>,
}

impl Renderer {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            config,
            cancel: None,
        }
    }

    /// Stop rendering at the next pixel row once `flag` becomes true.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn render(&self, scene: &Scene) -> ImageBuffer {
        self.render_with_progress(scene, |_, _| {})
    }

    /// Render, calling `on_progress(completed, total)` from worker threads
    /// every `progress_interval` pixels. `(total, total)` is delivered
    /// exactly once, by a worker or after the pool drains.
    ///
    /// A cancelled render leaves unrendered pixels at the background color
    /// and skips the final notification.
    pub fn render_with_progress<F>(&self, scene: &Scene, on_progress: F) -> ImageBuffer
    where
        F: Fn(usize, usize) + Sync,
    {
        let camera = scene.camera();
        let (width, height) = (camera.width(), camera.height());
        let total = width as usize * height as usize;

        let buckets = generate_buckets(width, height, self.config.bucket_size);
        log::info!(
            "Rendering {}x{} ({:?}{}) in {} buckets",
            width,
            height,
            self.config.sampling,
            if self.config.jitter { ", jittered" } else { "" },
            buckets.len()
        );
        log::debug!("Bucket size {}", self.config.bucket_size);

        let progress = ProgressCounter::new(total, self.config.progress_interval);
        let ctx = BucketContext {
            scene,
            config: &self.config,
            progress: &progress,
            on_progress: &on_progress,
            cancel: self.cancel.as_deref(),
        };

        let start = Instant::now();
        let results: Vec<BucketResult> = buckets
            .par_iter()
            .map(|bucket| render_bucket(bucket, &ctx))
            .collect();

        let mut image = ImageBuffer::filled(width, height, scene.background().clamped());
        for result in &results {
            image.write_bucket(result);
        }

        let completed = progress.completed();
        if completed < total {
            log::warn!("Render cancelled after {}/{} pixels", completed, total);
        } else {
            if progress.finish() {
                on_progress(total, total);
            }
            log::info!("Rendered {} pixels in {:.2?}", total, start.elapsed());
        }

        image
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use whitted_core::{Camera, Material, PointLight, Sphere};
    use whitted_math::{Point3, Vector3};

    const EPS: f64 = 1e-9;

    fn red_sphere_scene(forward: Vector3, half_fov: f64, size: u32) -> Scene {
        let red = Material::new(
            RayColor::BLACK,
            RayColor::new(1.0, 0.0, 0.0),
            RayColor::BLACK,
            1.0,
            RayColor::BLACK,
            1.0,
        );
        Scene::new(
            Camera::new(Point3::ORIGIN, forward, Vector3::Y, half_fov, size, size),
            vec![Sphere::new(Point3::new(90.0, 0.0, 0.0), 20.0, red).into()],
            RayColor::gray(0.25),
            vec![PointLight::new(Point3::new(90.0, 300_000.0, 0.0), RayColor::gray(1e12)).into()],
            RayColor::gray(0.5),
            3,
        )
    }

    #[test]
    fn test_sphere_fills_small_view() {
        let scene = red_sphere_scene(Vector3::X, 0.2, 2);
        let image = Renderer::default().render(&scene);

        assert_eq!((image.width, image.height), (2, 2));
        for color in &image.pixels {
            assert!(!color.abs_diff_eq(scene.background(), EPS), "{color:?}");
        }
    }

    #[test]
    fn test_camera_facing_away_sees_background() {
        let scene = red_sphere_scene(-Vector3::X, 0.2, 2);
        let image = Renderer::default().render(&scene);

        for color in &image.pixels {
            assert!(color.abs_diff_eq(scene.background(), EPS), "{color:?}");
        }
    }

    #[test]
    fn test_silhouette_with_fixed_sampling() {
        let scene = red_sphere_scene(Vector3::X, 0.5, 16);
        let config = RenderConfig::default().with_sampling(SamplingMode::Fixed);
        let image = Renderer::new(config).render(&scene);

        for (x, y) in [(0, 0), (15, 0), (0, 15), (15, 15)] {
            assert!(image.get(x, y).abs_diff_eq(scene.background(), EPS));
        }
        assert!(!image.get(8, 8).abs_diff_eq(scene.background(), EPS));
        assert!(!image.get(7, 7).abs_diff_eq(scene.background(), EPS));
    }

    #[test]
    fn test_adaptive_expands_to_full_grid() {
        let scene = red_sphere_scene(Vector3::X, 0.5, 16);
        let fixed = RenderConfig::default().with_sampling(SamplingMode::Fixed);
        // A negative threshold forces every pixel to expand
        let always_expand = RenderConfig::default().with_adaptive_threshold(-1.0);

        for y in 0..16 {
            for x in 0..16 {
                assert_eq!(
                    render_pixel(&scene, x, y, &always_expand),
                    render_pixel(&scene, x, y, &fixed)
                );
            }
        }
    }

    #[test]
    fn test_adaptive_skips_when_corners_agree() {
        let scene = red_sphere_scene(Vector3::X, 0.5, 16);
        let corners_only = RenderConfig::default().with_adaptive_threshold(f64::INFINITY);
        let fixed = RenderConfig::default().with_sampling(SamplingMode::Fixed);

        // Somewhere on the silhouette the skipped samples must matter
        let differs = (0..16).any(|x| {
            render_pixel(&scene, x, 8, &corners_only) != render_pixel(&scene, x, 8, &fixed)
        });
        assert!(differs);
    }

    #[test]
    fn test_adaptive_flat_pixel_uses_corner_mean() {
        let scene = red_sphere_scene(Vector3::X, 0.5, 16);
        let color = render_pixel(&scene, 0, 0, &RenderConfig::default());
        assert!(color.abs_diff_eq(scene.background(), EPS));
    }

    #[test]
    fn test_jitter_is_deterministic() {
        let scene = red_sphere_scene(Vector3::X, 0.5, 12);
        let config = RenderConfig::default().with_jitter(7).with_bucket_size(5);

        let first = Renderer::new(config.clone()).render(&scene);
        let second = Renderer::new(config).render(&scene);
        assert_eq!(first, second);
    }

    #[test]
    fn test_progress_notifications_bounded() {
        let scene = red_sphere_scene(Vector3::X, 0.5, 40);
        let calls = Mutex::new(Vec::new());
        let renderer = Renderer::new(RenderConfig::default().with_bucket_size(8));

        renderer.render_with_progress(&scene, |done, total| {
            calls.lock().unwrap().push((done, total));
        });

        let calls = calls.into_inner().unwrap();
        let total = 40 * 40;
        assert!(calls.len() >= 2);
        assert!(calls.len() <= total / 100 + 1, "{} notifications", calls.len());
        assert_eq!(calls.last(), Some(&(total, total)));
        assert!(calls.iter().all(|&(done, t)| t == total && done <= total));
    }

    #[test]
    fn test_final_notification_not_repeated() {
        // 100 pixels at the default interval: the worker crossing 100 reports total
        let scene = red_sphere_scene(Vector3::X, 0.5, 10);
        let calls = Mutex::new(Vec::new());
        let renderer = Renderer::new(RenderConfig::default());

        renderer.render_with_progress(&scene, |done, total| {
            calls.lock().unwrap().push((done, total));
        });

        let calls = calls.into_inner().unwrap();
        let finals = calls.iter().filter(|&&c| c == (100, 100)).count();
        assert_eq!(finals, 1, "{calls:?}");
        assert_eq!(calls.last(), Some(&(100, 100)));
    }

    #[test]
    fn test_cancelled_render_returns_background() {
        let scene = red_sphere_scene(Vector3::X, 0.2, 8);
        let flag = Arc::new(AtomicBool::new(true));
        let calls = Mutex::new(0);

        let image = Renderer::default()
            .with_cancel_flag(flag)
            .render_with_progress(&scene, |_, _| *calls.lock().unwrap() += 1);

        assert_eq!(*calls.lock().unwrap(), 0);
        assert!(image.pixels.iter().all(|c| *c == scene.background()));
    }

    #[test]
    fn test_pixels_clamped() {
        // The light is bright enough to push the lit side far above 1
        let scene = red_sphere_scene(Vector3::X, 0.2, 4);
        let image = Renderer::default().render(&scene);

        assert!(image.pixels.iter().any(|c| c.r() == 1.0));
        for c in &image.pixels {
            for v in [c.r(), c.g(), c.b()] {
                assert!((0.0..=1.0).contains(&v));
            }
        }
    }

    #[test]
    fn test_to_rgba_layout() {
        let mut image = ImageBuffer::filled(2, 1, RayColor::BLACK);
        image.set(1, 0, RayColor::new(1.0, 0.5, 0.0));

        assert_eq!(image.to_rgba(), vec![0, 0, 0, 255, 255, 128, 0, 255]);
    }

    #[test]
    fn test_save_png() {
        let image = ImageBuffer::filled(3, 2, RayColor::new(0.2, 0.4, 0.6));
        let path = std::env::temp_dir().join(format!("whitted_save_{}.png", std::process::id()));

        image.save(&path).unwrap();
        let metadata = std::fs::metadata(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert!(metadata.len() > 0);
    }
}
