//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that can be rendered
//! independently and in parallel using rayon.

use std::sync::atomic::{AtomicBool, Ordering};

use whitted_core::Scene;
use whitted_math::RayColor;

use crate::progress::ProgressCounter;
use crate::renderer::{render_pixel, RenderConfig};

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// X coordinate of bucket's top-left corner
    pub x: u32,
    /// Y coordinate of bucket's top-left corner
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Index of this bucket in the render order
    pub index: usize,
}

impl Bucket {
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            index,
        }
    }

    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }
}

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// Generate buckets for an image, sorted in spiral order from center.
///
/// Buckets near the middle of the frame are handed to workers first.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let bucket_size = bucket_size.max(1);
    let mut buckets = Vec::new();

    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            let bw = bucket_size.min(width - x);
            let bh = bucket_size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh, buckets.len()));
            x += bucket_size;
        }
        y += bucket_size;
    }

    sort_spiral(&mut buckets, width, height);

    // Update indices after sorting
    for (i, bucket) in buckets.iter_mut().enumerate() {
        bucket.index = i;
    }

    buckets
}

/// Sort buckets by distance from image center. The sort is stable, so ties
/// keep row-major order.
fn sort_spiral(buckets: &mut [Bucket], width: u32, height: u32) {
    let center_x = width as f64 / 2.0;
    let center_y = height as f64 / 2.0;

    let dist = |b: &Bucket| {
        let bx = b.x as f64 + b.width as f64 / 2.0;
        let by = b.y as f64 + b.height as f64 / 2.0;
        (bx - center_x).powi(2) + (by - center_y).powi(2)
    };

    buckets.sort_by(|a, b| dist(a).total_cmp(&dist(b)));
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    pub bucket: Bucket,
    /// Pixel colors in row-major order. Shorter than the bucket when the
    /// render was cancelled part way; only whole rows are ever present.
    pub pixels: Vec<RayColor>,
}

impl BucketResult {
    pub fn new(bucket: Bucket, pixels: Vec<RayColor>) -> Self {
        Self { bucket, pixels }
    }
}

/// Shared state for the buckets of one render invocation.
pub struct BucketContext<'a> {
    pub scene: &'a Scene,
    pub config: &'a RenderConfig,
    pub progress: &'a ProgressCounter,
    pub on_progress: &'a (dyn Fn(usize, usize) + Sync),
    pub cancel: Option<&'a AtomicBool>,
}

impl BucketContext<'_> {
    fn is_cancelled(&self) -> bool {
        self.cancel.is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}

/// Render a single bucket, clamping each pixel at write time.
///
/// The cancel flag is checked before every row.
pub fn render_bucket(bucket: &Bucket, ctx: &BucketContext<'_>) -> BucketResult {
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);

    for local_y in 0..bucket.height {
        if ctx.is_cancelled() {
            break;
        }
        for local_x in 0..bucket.width {
            let color = render_pixel(ctx.scene, bucket.x + local_x, bucket.y + local_y, ctx.config);
            pixels.push(color.clamped());

            if let Some(completed) = ctx.progress.advance(1) {
                (ctx.on_progress)(completed, ctx.progress.total());
            }
        }
    }

    BucketResult::new(*bucket, pixels)
}
