//! Sphere primitive for ray tracing.

use crate::{Hittable, Material};
use whitted_math::{Interval, Point3, Ray, Vector3};

/// A sphere primitive.
#[derive(Clone, Debug)]
pub struct Sphere {
    center: Point3,
    radius: f64,
    material: Material,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Point3, radius: f64, material: Material) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }

    pub fn center(&self) -> Point3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Hittable for Sphere {
    /// Solves `|d|²t² + 2d·(o−c)t + |o−c|² − r² = 0` and keeps the nearest
    /// non-negative root.
    fn intersect(&self, ray: &Ray) -> Option<Point3> {
        let oc = ray.origin - self.center;
        let a = ray.direction.length_squared();
        let b = 2.0 * ray.direction.dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();
        let t1 = (-b + sqrtd) / (2.0 * a);
        let t2 = (-b - sqrtd) / (2.0 * a);

        let t = match (Interval::FORWARD.contains(t1), Interval::FORWARD.contains(t2)) {
            (true, true) => t1.min(t2),
            (true, false) => t1,
            (false, true) => t2,
            (false, false) => return None,
        };

        Some(ray.at(t))
    }

    fn normal_at(&self, point: Point3) -> Vector3 {
        (point - self.center).normalize()
    }

    fn material(&self) -> &Material {
        &self.material
    }
}
