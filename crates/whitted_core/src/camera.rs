//! Pinhole camera and primary ray generation.

use whitted_math::{Point3, Ray, Vector3};

/// Pinhole camera with an image plane measured in pixels.
///
/// The image plane sits at the distance where one world unit spans one
/// pixel vertically, so its half-extents are `width / 2` and `height / 2`.
/// All derived values are computed once in [`Camera::new`].
#[derive(Debug, Clone)]
pub struct Camera {
    position: Point3,
    forward: Vector3,
    up: Vector3,
    right: Vector3,
    half_fov_y: f64,
    half_fov_x: f64,
    width: u32,
    height: u32,

    // Cached image plane
    distance: f64,
    center_point: Point3,
    left_point: Point3,
    right_point: Point3,
    up_point: Point3,
    down_point: Point3,
}

impl Camera {
    /// Create a camera.
    ///
    /// `half_fov_y` is the vertical half-angle in radians. `forward` and `up`
    /// must be non-zero and not parallel.
    pub fn new(
        position: Point3,
        forward: Vector3,
        up: Vector3,
        half_fov_y: f64,
        width: u32,
        height: u32,
    ) -> Self {
        let forward = forward.normalize();
        let up = up.normalize();
        let right = forward.cross(up).normalize();

        let distance = (height as f64 / 2.0) / half_fov_y.tan();
        let half_fov_x = (width as f64 / 2.0).atan2(distance);

        let center_point = position + distance * forward;
        let half_width = distance * half_fov_x.tan();
        let half_height = distance * half_fov_y.tan();

        Self {
            position,
            forward,
            up,
            right,
            half_fov_y,
            half_fov_x,
            width,
            height,
            distance,
            center_point,
            left_point: center_point - half_width * right,
            right_point: center_point + half_width * right,
            up_point: center_point + half_height * up,
            down_point: center_point - half_height * up,
        }
    }

    /// Generate the depth-0 ray through normalized image coordinates.
    ///
    /// `u` runs from the `forward × up` edge (0) to the opposite edge (1);
    /// `v` runs from the top edge (0) to the bottom edge (1).
    pub fn construct_ray(&self, u: f64, v: f64) -> Ray {
        let horizontal = self.right_point.lerp(self.left_point, u) - self.center_point;
        let vertical = self.up_point.lerp(self.down_point, v) - self.center_point;
        let point = self.center_point + horizontal + vertical;

        Ray::new(self.position, (point - self.position).normalize())
    }

    pub fn position(&self) -> Point3 {
        self.position
    }

    /// Unit viewing direction.
    pub fn forward(&self) -> Vector3 {
        self.forward
    }

    pub fn up(&self) -> Vector3 {
        self.up
    }

    /// Unit `forward × up`.
    pub fn right(&self) -> Vector3 {
        self.right
    }

    pub fn half_fov_y(&self) -> f64 {
        self.half_fov_y
    }

    pub fn half_fov_x(&self) -> f64 {
        self.half_fov_x
    }

    /// Distance from the camera position to the image plane.
    pub fn image_plane_distance(&self) -> f64 {
        self.distance
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}
