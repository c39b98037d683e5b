//! Intersection contract shared by all primitives.

use crate::{Material, SmoothTriangle, Sphere, Triangle};
use whitted_math::{Point3, Ray, RayColor, Vector3};

/// Trait for primitives that can be hit by rays and shaded.
pub trait Hittable: Send + Sync {
    /// Nearest intersection in front of the ray origin, if any.
    fn intersect(&self, ray: &Ray) -> Option<Point3>;

    /// Unit shading normal at a point on the surface.
    fn normal_at(&self, point: Point3) -> Vector3;

    /// The surface material.
    fn material(&self) -> &Material;

    fn ambient_at(&self, _point: Point3) -> RayColor {
        self.material().ambient
    }

    fn diffuse_at(&self, _point: Point3) -> RayColor {
        self.material().diffuse
    }

    fn specular_at(&self, _point: Point3) -> RayColor {
        self.material().specular
    }

    fn transmissive_at(&self, _point: Point3) -> RayColor {
        self.material().transmissive
    }

    fn phong_exponent_at(&self, _point: Point3) -> f64 {
        self.material().phong_exponent
    }

    fn refractive_index_at(&self, _point: Point3) -> f64 {
        self.material().refractive_index
    }
}

/// Closed set of scene primitives.
#[derive(Clone, Debug)]
pub enum Geometry {
    Sphere(Sphere),
    Triangle(Triangle),
    SmoothTriangle(SmoothTriangle),
}

impl Geometry {
    /// True for surfaces lit from both faces.
    ///
    /// Flat triangles flip their normal toward whichever side is being
    /// shaded; spheres and smooth triangles are lit from the front only.
    pub fn is_two_sided(&self) -> bool {
        matches!(self, Geometry::Triangle(_))
    }

    /// Normal used to push secondary ray origins off the surface.
    ///
    /// Equals `shading_normal` except on smooth triangles, where the
    /// interpolated normal can tilt away from the true surface; there the
    /// plane normal, signed to agree with `shading_normal`, is returned.
    pub fn offset_normal(&self, shading_normal: Vector3) -> Vector3 {
        match self {
            Geometry::SmoothTriangle(tri) => {
                let plane = tri.plane_normal();
                if plane.dot(shading_normal) < 0.0 {
                    -plane
                } else {
                    plane
                }
            }
            Geometry::Sphere(_) | Geometry::Triangle(_) => shading_normal,
        }
    }
}

impl Hittable for Geometry {
    fn intersect(&self, ray: &Ray) -> Option<Point3> {
        match self {
            Geometry::Sphere(s) => s.intersect(ray),
            Geometry::Triangle(t) => t.intersect(ray),
            Geometry::SmoothTriangle(t) => t.intersect(ray),
        }
    }

    fn normal_at(&self, point: Point3) -> Vector3 {
        match self {
            Geometry::Sphere(s) => s.normal_at(point),
            Geometry::Triangle(t) => t.normal_at(point),
            Geometry::SmoothTriangle(t) => t.normal_at(point),
        }
    }

    fn material(&self) -> &Material {
        match self {
            Geometry::Sphere(s) => s.material(),
            Geometry::Triangle(t) => t.material(),
            Geometry::SmoothTriangle(t) => t.material(),
        }
    }
}

impl From<Sphere> for Geometry {
    fn from(sphere: Sphere) -> Self {
        Geometry::Sphere(sphere)
    }
}

impl From<Triangle> for Geometry {
    fn from(triangle: Triangle) -> Self {
        Geometry::Triangle(triangle)
    }
}

impl From<SmoothTriangle> for Geometry {
    fn from(triangle: SmoothTriangle) -> Self {
        Geometry::SmoothTriangle(triangle)
    }
}
