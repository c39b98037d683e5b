//! Phong surface materials.

use whitted_math::RayColor;

/// Phong material with optional mirror reflection and transmission.
///
/// `specular` doubles as the mirror reflectance and `transmissive` as the
/// refraction filter; a black value disables the corresponding secondary ray.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    /// Reflectance of the scene's ambient light
    pub ambient: RayColor,

    /// Lambertian reflectance
    pub diffuse: RayColor,

    /// Phong highlight and mirror reflectance
    pub specular: RayColor,

    /// Phong highlight exponent
    pub phong_exponent: f64,

    /// Refraction filter
    pub transmissive: RayColor,

    /// Index of refraction (1.0 = air, 1.5 = glass)
    pub refractive_index: f64,
}

impl Default for Material {
    /// White diffuse surface with no ambient, highlight or transmission.
    fn default() -> Self {
        Self {
            ambient: RayColor::BLACK,
            diffuse: RayColor::WHITE,
            specular: RayColor::BLACK,
            phong_exponent: 5.0,
            transmissive: RayColor::BLACK,
            refractive_index: 1.0,
        }
    }
}

impl Material {
    pub fn new(
        ambient: RayColor,
        diffuse: RayColor,
        specular: RayColor,
        phong_exponent: f64,
        transmissive: RayColor,
        refractive_index: f64,
    ) -> Self {
        Self {
            ambient,
            diffuse,
            specular,
            phong_exponent,
            transmissive,
            refractive_index,
        }
    }

    /// Purely diffuse material that also reflects ambient light in the same color.
    pub fn matte(color: RayColor) -> Self {
        Self {
            ambient: color,
            diffuse: color,
            ..Default::default()
        }
    }

    /// True if the material spawns mirror reflection rays.
    pub fn is_reflective(&self) -> bool {
        !self.specular.is_black()
    }

    /// True if the material spawns refraction rays.
    pub fn is_transmissive(&self) -> bool {
        !self.transmissive.is_black()
    }
}
