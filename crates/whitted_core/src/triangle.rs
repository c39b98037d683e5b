//! Flat and smooth-shaded triangle primitives.
//!
//! Both variants intersect the supporting plane first and then accept the
//! hit only if its barycentric weights lie inside the triangle.

use crate::{Hittable, Material};
use whitted_math::{Interval, Point3, Ray, Vector3};

/// Supporting plane and edge frame shared by both triangle variants.
#[derive(Clone, Debug)]
struct TrianglePlane {
    origin: Point3,
    /// v2 - v1
    edge_a: Vector3,
    /// v3 - v1
    edge_b: Vector3,
    /// Unit `edge_a × edge_b`
    normal: Vector3,
    /// `|edge_a × edge_b|²`
    area_sq: f64,
}

impl TrianglePlane {
    fn new(v1: Point3, v2: Point3, v3: Point3) -> Self {
        let edge_a = v2 - v1;
        let edge_b = v3 - v1;
        let cross = edge_a.cross(edge_b);

        Self {
            origin: v1,
            edge_a,
            edge_b,
            normal: cross.normalize(),
            area_sq: cross.length_squared(),
        }
    }

    /// Plane hit for a ray, using the normal orientation that opposes the
    /// ray so either face can be struck.
    fn intersect_plane(&self, ray: &Ray) -> Option<Point3> {
        let normal = if self.normal.dot(ray.direction) < 0.0 {
            self.normal
        } else {
            -self.normal
        };

        let t = (self.origin - ray.origin).dot(normal) / normal.dot(ray.direction);
        if !Interval::FORWARD.contains(t) {
            return None;
        }
        Some(ray.at(t))
    }

    /// Area ratios `(beta, gamma)` weighting v2 and v3 for an in-plane point.
    ///
    /// Each ratio is a sub-triangle area over the full area, signed negative
    /// when the point lies on the far side of the corresponding edge.
    fn area_ratios(&self, point: Point3) -> (f64, f64) {
        let v = point - self.origin;
        let beta = self.edge_b.cross(v).dot(self.edge_b.cross(self.edge_a)) / self.area_sq;
        let gamma = self.edge_a.cross(v).dot(self.edge_a.cross(self.edge_b)) / self.area_sq;
        (beta, gamma)
    }

    /// Full barycentric weights `[alpha, beta, gamma]` for v1, v2, v3.
    fn barycentric(&self, point: Point3) -> [f64; 3] {
        let (beta, gamma) = self.area_ratios(point);
        [1.0 - beta - gamma, beta, gamma]
    }

    fn contains(&self, point: Point3) -> bool {
        let (beta, gamma) = self.area_ratios(point);
        beta >= 0.0 && gamma >= 0.0 && beta + gamma <= 1.0
    }

    fn intersect(&self, ray: &Ray) -> Option<Point3> {
        self.intersect_plane(ray).filter(|&p| self.contains(p))
    }
}

/// A flat-shaded, two-sided triangle.
#[derive(Clone, Debug)]
pub struct Triangle {
    vertices: [Point3; 3],
    plane: TrianglePlane,
    material: Material,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    ///
    /// The vertices must not be collinear.
    pub fn new(v1: Point3, v2: Point3, v3: Point3, material: Material) -> Self {
        Self {
            vertices: [v1, v2, v3],
            plane: TrianglePlane::new(v1, v2, v3),
            material,
        }
    }

    pub fn vertices(&self) -> [Point3; 3] {
        self.vertices
    }

    /// Barycentric weights `[alpha, beta, gamma]` of a point in the triangle's plane.
    pub fn barycentric(&self, point: Point3) -> [f64; 3] {
        self.plane.barycentric(point)
    }
}

impl Hittable for Triangle {
    fn intersect(&self, ray: &Ray) -> Option<Point3> {
        self.plane.intersect(ray)
    }

    /// The `(v2 - v1) × (v3 - v1)` face normal; callers flip it per side.
    fn normal_at(&self, _point: Point3) -> Vector3 {
        self.plane.normal
    }

    fn material(&self) -> &Material {
        &self.material
    }
}

/// A triangle whose shading normal interpolates three vertex normals.
#[derive(Clone, Debug)]
pub struct SmoothTriangle {
    vertices: [Point3; 3],
    normals: [Vector3; 3],
    plane: TrianglePlane,
    material: Material,
}

impl SmoothTriangle {
    /// Create a smooth triangle. Vertex normals are normalized here and
    /// must be non-zero.
    pub fn new(vertices: [Point3; 3], normals: [Vector3; 3], material: Material) -> Self {
        let [v1, v2, v3] = vertices;
        Self {
            vertices,
            normals: normals.map(Vector3::normalize),
            plane: TrianglePlane::new(v1, v2, v3),
            material,
        }
    }

    pub fn vertices(&self) -> [Point3; 3] {
        self.vertices
    }

    /// Unit geometric normal of the supporting plane.
    pub fn plane_normal(&self) -> Vector3 {
        self.plane.normal
    }

    /// Barycentric weights `[alpha, beta, gamma]` of a point in the triangle's plane.
    pub fn barycentric(&self, point: Point3) -> [f64; 3] {
        self.plane.barycentric(point)
    }
}

impl Hittable for SmoothTriangle {
    fn intersect(&self, ray: &Ray) -> Option<Point3> {
        self.plane.intersect(ray)
    }

    /// Phong-interpolated normal. Falls back to the plane normal if the
    /// vertex normals cancel out.
    fn normal_at(&self, point: Point3) -> Vector3 {
        let [alpha, beta, gamma] = self.plane.barycentric(point);
        let [n1, n2, n3] = self.normals;
        (alpha * n1 + beta * n2 + gamma * n3)
            .try_normalize()
            .unwrap_or(self.plane.normal)
    }

    fn material(&self) -> &Material {
        &self.material
    }
}
