//! Light sources.
//!
//! Every light answers two questions for a shaded point: which way (and how
//! far) is the light, and what color does it emit. Spot lights additionally
//! scale their contribution by an angular cone falloff.

use whitted_math::{Point3, RayColor, Vector3};

/// Omnidirectional light at a position, attenuated by `1 / distance²`.
#[derive(Clone, Debug, PartialEq)]
pub struct PointLight {
    pub position: Point3,
    pub color: RayColor,
}

/// Positional light restricted to a cone around `direction`.
#[derive(Clone, Debug, PartialEq)]
pub struct SpotLight {
    position: Point3,
    direction: Vector3,
    cos_inner: f64,
    cos_outer: f64,
    color: RayColor,
}

/// Light arriving from a fixed direction, infinitely far away.
#[derive(Clone, Debug, PartialEq)]
pub struct DirectionalLight {
    direction: Vector3,
    color: RayColor,
}

impl PointLight {
    pub fn new(position: Point3, color: RayColor) -> Self {
        Self { position, color }
    }
}

impl SpotLight {
    /// Create a spot light. Angles are half-angles in radians measured from
    /// `direction`, which must be non-zero.
    pub fn new(
        position: Point3,
        direction: Vector3,
        inner_angle: f64,
        outer_angle: f64,
        color: RayColor,
    ) -> Self {
        Self {
            position,
            direction: direction.normalize(),
            cos_inner: inner_angle.cos(),
            cos_outer: outer_angle.cos(),
            color,
        }
    }

    /// Cone multiplier for a unit vector pointing from the shaded point to the light.
    ///
    /// 1.0 inside the inner cone, 0.0 outside the outer cone. Between the
    /// cones the blend is linear in the cosine of the angle off the axis, not
    /// in the angle itself, so the angular midpoint lands above 0.5.
    pub fn cone_falloff(&self, to_light: Vector3) -> f64 {
        let cos_angle = -to_light.dot(self.direction);
        if cos_angle >= self.cos_inner {
            1.0
        } else if cos_angle >= self.cos_outer {
            (cos_angle - self.cos_outer) / (self.cos_inner - self.cos_outer)
        } else {
            0.0
        }
    }
}

impl DirectionalLight {
    /// Create a directional light shining along `direction` (must be non-zero).
    pub fn new(direction: Vector3, color: RayColor) -> Self {
        Self {
            direction: direction.normalize(),
            color,
        }
    }
}

/// Closed set of light variants.
#[derive(Clone, Debug, PartialEq)]
pub enum Light {
    Point(PointLight),
    Spot(SpotLight),
    Directional(DirectionalLight),
}

impl Light {
    /// Vector from `point` toward the light.
    ///
    /// For positional lights its squared length is the attenuation distance.
    /// For directional lights it is the negated unit direction regardless of
    /// `point`.
    pub fn vector_to_point(&self, point: Point3) -> Vector3 {
        match self {
            Light::Point(light) => light.position - point,
            Light::Spot(light) => light.position - point,
            Light::Directional(light) => -light.direction,
        }
    }

    pub fn color(&self) -> RayColor {
        match self {
            Light::Point(light) => light.color,
            Light::Spot(light) => light.color,
            Light::Directional(light) => light.color,
        }
    }

    /// True for lights at a finite position, whose shadows are bounded by
    /// the distance to the light.
    pub fn is_positional(&self) -> bool {
        !matches!(self, Light::Directional(_))
    }

    /// Angular multiplier for a unit vector pointing from the shaded point
    /// to the light. Only spot lights fall off.
    pub fn falloff(&self, to_light: Vector3) -> f64 {
        match self {
            Light::Spot(light) => light.cone_falloff(to_light),
            Light::Point(_) | Light::Directional(_) => 1.0,
        }
    }
}

impl From<PointLight> for Light {
    fn from(light: PointLight) -> Self {
        Light::Point(light)
    }
}

impl From<SpotLight> for Light {
    fn from(light: SpotLight) -> Self {
        Light::Spot(light)
    }
}

impl From<DirectionalLight> for Light {
    fn from(light: DirectionalLight) -> Self {
        Light::Directional(light)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_point_light_vector() {
        let light = Light::from(PointLight::new(Point3::new(0.0, 10.0, 0.0), RayColor::WHITE));
        let v = light.vector_to_point(Point3::new(0.0, 4.0, 0.0));

        assert_eq!(v, Vector3::new(0.0, 6.0, 0.0));
        assert_eq!(v.length_squared(), 36.0);
        assert!(light.is_positional());
        assert_eq!(light.falloff(Vector3::Y), 1.0);
    }

    #[test]
    fn test_directional_light_ignores_point() {
        let light = Light::from(DirectionalLight::new(Vector3::new(0.0, -5.0, 0.0), RayColor::WHITE));

        assert_eq!(light.vector_to_point(Point3::ORIGIN), Vector3::Y);
        assert_eq!(light.vector_to_point(Point3::new(100.0, -3.0, 7.0)), Vector3::Y);
        assert_eq!(light.vector_to_point(Point3::ORIGIN).length_squared(), 1.0);
        assert!(!light.is_positional());
    }

    #[test]
    fn test_spot_cone_falloff() {
        // Spot pointing straight down from y = 10
        let spot = SpotLight::new(
            Point3::new(0.0, 10.0, 0.0),
            -Vector3::Y,
            20f64.to_radians(),
            40f64.to_radians(),
            RayColor::WHITE,
        );

        let towards = |deg: f64| {
            let a = deg.to_radians();
            // Unit vector from the lit point back up to the light
            Vector3::new(-a.sin(), a.cos(), 0.0)
        };

        assert_eq!(spot.cone_falloff(towards(0.0)), 1.0);
        assert_eq!(spot.cone_falloff(towards(19.0)), 1.0);
        assert_eq!(spot.cone_falloff(towards(45.0)), 0.0);

        let mid = spot.cone_falloff(towards(30.0));
        let expected = (30f64.to_radians().cos() - 40f64.to_radians().cos())
            / (20f64.to_radians().cos() - 40f64.to_radians().cos());
        assert!((mid - expected).abs() < EPS);
        assert!(mid > 0.0 && mid < 1.0);
        // Halfway in angle is not halfway in cosine
        assert!(mid > 0.55, "{mid}");
    }

    #[test]
    fn test_spot_equal_cones_hard_edge() {
        let angle = 15f64.to_radians();
        let spot = SpotLight::new(Point3::ORIGIN, Vector3::X, angle, angle, RayColor::WHITE);

        assert_eq!(spot.cone_falloff(-Vector3::X), 1.0);
        assert_eq!(spot.cone_falloff(Vector3::Y), 0.0);
    }
}
