use crate::{Point3, Vector3};

/// A ray with origin, unit direction, and bounce depth.
///
/// `depth` counts the reflection/refraction bounces already taken; primary
/// and shadow rays start at 0.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Point3,
    pub direction: Vector3,
    pub depth: u32,
}

impl Ray {
    /// Create a depth-0 ray.
    pub fn new(origin: Point3, direction: Vector3) -> Self {
        Self {
            origin,
            direction,
            depth: 0,
        }
    }

    /// Create a secondary ray one bounce deeper than `self`.
    pub fn bounce(&self, origin: Point3, direction: Vector3) -> Ray {
        Ray {
            origin,
            direction,
            depth: self.depth + 1,
        }
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + t * self.direction
    }
}
