//! Immutable scene and the recursive Whitted shading algorithm.
//!
//! A [`Scene`] is never mutated after construction, so any number of
//! threads may trace rays through it concurrently without locking.

use crate::{Camera, Geometry, Hittable, Light, Material, PointLight, Sphere};
use whitted_math::{Point3, Ray, RayColor, Vector3};

/// Distance secondary ray origins are pushed off a surface to avoid
/// re-hitting it immediately.
pub const SURFACE_EPSILON: f64 = 1e-10;

/// A primitive struck by a ray, and where.
#[derive(Clone, Copy, Debug)]
pub struct Intersection<'a> {
    pub object: &'a Geometry,
    pub point: Point3,
}

/// Camera, primitives, lights and global shading settings.
#[derive(Clone, Debug)]
pub struct Scene {
    camera: Camera,
    geometry: Vec<Geometry>,
    background: RayColor,
    lights: Vec<Light>,
    ambient: RayColor,
    max_depth: u32,
}

impl Scene {
    pub fn new(
        camera: Camera,
        geometry: Vec<Geometry>,
        background: RayColor,
        lights: Vec<Light>,
        ambient: RayColor,
        max_depth: u32,
    ) -> Self {
        Self {
            camera,
            geometry,
            background,
            lights,
            ambient,
            max_depth,
        }
    }

    /// Fixed smoke-test scene: one sphere at (90, 0, 0) seen by a camera at
    /// the origin looking down +x, lit by a single distant point light.
    pub fn demo(width: u32, height: u32) -> Self {
        let camera = Camera::new(Point3::ORIGIN, Vector3::X, Vector3::Y, 0.2, width, height);
        let material = Material::new(
            RayColor::new(200.0, 100.0, 100.0) / 255.0,
            RayColor::WHITE,
            RayColor::WHITE * 3.0,
            30.0,
            RayColor::BLACK,
            1.0,
        );
        let sphere = Sphere::new(Point3::new(90.0, 0.0, 0.0), 20.0, material);
        let light = PointLight::new(Point3::new(90.0, 300_000.0, 0.0), RayColor::WHITE);

        Self::new(
            camera,
            vec![sphere.into()],
            RayColor::gray(40.0 / 255.0),
            vec![light.into()],
            RayColor::gray(0.15),
            0,
        )
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn geometry(&self) -> &[Geometry] {
        &self.geometry
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn background(&self) -> RayColor {
        self.background
    }

    pub fn ambient(&self) -> RayColor {
        self.ambient
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Primary ray through normalized image coordinates.
    pub fn construct_ray(&self, u: f64, v: f64) -> Ray {
        self.camera.construct_ray(u, v)
    }

    /// Every primitive the ray strikes, in scene order.
    ///
    /// Linear scan; used both for nearest-hit resolution and shadow tests.
    pub fn find_intersections(&self, ray: &Ray) -> Vec<Intersection<'_>> {
        self.geometry
            .iter()
            .filter_map(|object| {
                object
                    .intersect(ray)
                    .map(|point| Intersection { object, point })
            })
            .collect()
    }

    /// The intersection closest to the ray origin.
    pub fn nearest_intersection(&self, ray: &Ray) -> Option<Intersection<'_>> {
        self.find_intersections(ray).into_iter().min_by(|a, b| {
            a.point
                .distance_squared(ray.origin)
                .total_cmp(&b.point.distance_squared(ray.origin))
        })
    }

    /// Radiance arriving along `ray`: direct lighting at the nearest hit plus
    /// reflected and refracted light while `ray.depth < max_depth`.
    pub fn find_intersection_color(&self, ray: &Ray) -> RayColor {
        let Some(hit) = self.nearest_intersection(ray) else {
            return self.background;
        };

        let direct = self.lighting_at(hit.point, hit.object);
        if ray.depth >= self.max_depth {
            return direct;
        }

        direct + self.secondary_color(ray, &hit)
    }

    /// Phong direct illumination with shadows, plus ambient.
    pub fn lighting_at(&self, point: Point3, object: &Geometry) -> RayColor {
        let direct: RayColor = self
            .lights
            .iter()
            .filter_map(|light| self.light_contribution(light, point, object))
            .sum();

        direct + object.ambient_at(point) * self.ambient
    }

    /// Diffuse and specular contribution of one light, or `None` when the
    /// light faces away or is occluded.
    fn light_contribution(&self, light: &Light, point: Point3, object: &Geometry) -> Option<RayColor> {
        let to_light = light.vector_to_point(point);
        let light_dist_sq = to_light.length_squared();
        let light_dir = to_light.try_normalize()?;

        let mut normal = object.normal_at(point);
        if light_dir.dot(normal) < 0.0 {
            if !object.is_two_sided() {
                return None;
            }
            normal = -normal;
        }

        let shadow_ray = Ray::new(point + SURFACE_EPSILON * object.offset_normal(normal), light_dir);
        if self.is_occluded(&shadow_ray, light, light_dist_sq) {
            return None;
        }

        let reflected = -light_dir.reflect(normal);
        let view = (self.camera.position() - point).try_normalize()?;
        // Clamped so fractional exponents never see a negative base
        let highlight = view
            .dot(reflected)
            .max(0.0)
            .powf(object.phong_exponent_at(point));

        let color = light.color();
        let specular = object.specular_at(point) * color * (highlight / light_dist_sq);
        let diffuse = object.diffuse_at(point) * color * (light_dir.dot(normal) / light_dist_sq);

        Some((specular + diffuse) * light.falloff(light_dir))
    }

    fn is_occluded(&self, shadow_ray: &Ray, light: &Light, light_dist_sq: f64) -> bool {
        let blockers = self.find_intersections(shadow_ray);
        if light.is_positional() {
            blockers
                .iter()
                .any(|b| b.point.distance_squared(shadow_ray.origin) <= light_dist_sq)
        } else {
            !blockers.is_empty()
        }
    }

    /// Mirror reflection and refraction at a hit.
    fn secondary_color(&self, ray: &Ray, hit: &Intersection<'_>) -> RayColor {
        let (object, point) = (hit.object, hit.point);

        let mut normal = object.normal_at(point);
        let mut ray_dot = ray.direction.dot(normal);
        if object.is_two_sided() && ray_dot > 0.0 {
            normal = -normal;
            ray_dot = -ray_dot;
        }
        let offset = object.offset_normal(normal);

        let mut bounce = RayColor::BLACK;

        let specular = object.specular_at(point);
        if ray_dot < 0.0 && !specular.is_black() {
            let origin = point + SURFACE_EPSILON * offset;
            let reflected = ray.bounce(origin, ray.direction.reflect(normal));
            bounce += self.find_intersection_color(&reflected) * specular;
        }

        let transmissive = object.transmissive_at(point);
        if !transmissive.is_black() {
            let ior = object.refractive_index_at(point);
            bounce += self.refracted_color(ray, point, normal, offset, ior) * transmissive;
        }

        bounce
    }

    /// Light transmitted through the surface by Snell's law.
    ///
    /// On total internal reflection the ray is mirrored back to the side it
    /// came from instead.
    fn refracted_color(
        &self,
        ray: &Ray,
        point: Point3,
        normal: Vector3,
        offset: Vector3,
        ior: f64,
    ) -> RayColor {
        let entering = ray.direction.dot(normal) < 0.0;

        // Orient the frame toward the incident side
        let (eta, normal, incident_offset) = if entering {
            (1.0 / ior, normal, offset)
        } else {
            (ior, -normal, -offset)
        };
        let cos_dot = ray.direction.dot(normal);

        let direction = if eta == 1.0 || !eta.is_normal() {
            ray.direction
        } else {
            let k = 1.0 - eta * eta * (1.0 - cos_dot * cos_dot);
            if k < 0.0 {
                let origin = point + SURFACE_EPSILON * incident_offset;
                let mirrored = ray.bounce(origin, ray.direction.reflect(normal));
                return self.find_intersection_color(&mirrored);
            }
            eta * ray.direction + (-eta * cos_dot - k.sqrt()) * normal
        };

        let origin = point - SURFACE_EPSILON * incident_offset;
        self.find_intersection_color(&ray.bounce(origin, direction))
    }
}
