//! Mutable intermediate records collected while reading a scene file.

use whitted_math::{Point3, RayColor, Vector3};

use super::parser::{ParseError, ParseResult};
use crate::{
    Camera, DirectionalLight, Geometry, Light, Material, PointLight, Scene, SmoothTriangle, Sphere,
    SpotLight, Triangle,
};

/// Camera fields as written in the file. Angles stay in degrees until
/// [`SceneBlueprint::to_scene`].
#[derive(Clone, Debug, PartialEq)]
pub struct CameraBlueprint {
    pub position: Point3,
    pub forward: Vector3,
    pub up: Vector3,
    pub half_angle_degrees: f64,
    pub width: u32,
    pub height: u32,
}

impl Default for CameraBlueprint {
    fn default() -> Self {
        Self {
            position: Point3::ORIGIN,
            forward: Vector3::Z,
            up: Vector3::Y,
            half_angle_degrees: 45.0,
            width: 640,
            height: 480,
        }
    }
}

/// A primitive with the material that was current when it was declared.
#[derive(Clone, Debug, PartialEq)]
pub enum ShapeBlueprint {
    Sphere {
        center: Point3,
        radius: f64,
        material: Material,
    },
    Triangle {
        vertices: [Point3; 3],
        material: Material,
    },
    SmoothTriangle {
        vertices: [Point3; 3],
        normals: [Vector3; 3],
        material: Material,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub enum LightBlueprint {
    Point {
        color: RayColor,
        position: Point3,
    },
    Directional {
        color: RayColor,
        direction: Vector3,
    },
    Spot {
        color: RayColor,
        position: Point3,
        direction: Vector3,
        inner_degrees: f64,
        outer_degrees: f64,
    },
}

/// Everything a scene file declares, before validation.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneBlueprint {
    pub camera: CameraBlueprint,
    pub output_image: String,
    pub background: RayColor,
    pub ambient: RayColor,
    pub shapes: Vec<ShapeBlueprint>,
    pub lights: Vec<LightBlueprint>,
    pub max_depth: u32,
}

impl Default for SceneBlueprint {
    fn default() -> Self {
        Self {
            camera: CameraBlueprint::default(),
            output_image: String::from("raytraced.bmp"),
            background: RayColor::BLACK,
            ambient: RayColor::BLACK,
            shapes: Vec::new(),
            lights: Vec::new(),
            max_depth: 5,
        }
    }
}

impl SceneBlueprint {
    /// Build the immutable scene.
    ///
    /// Directions were already checked for zero length by the parser; this
    /// rejects the whole-file problems only visible once everything is read.
    pub fn to_scene(&self) -> ParseResult<Scene> {
        let cam = &self.camera;
        if cam.width == 0 || cam.height == 0 {
            return Err(ParseError::InvalidResolution {
                width: cam.width,
                height: cam.height,
            });
        }
        if cam.forward.cross(cam.up).try_normalize().is_none() {
            return Err(ParseError::DegenerateCamera);
        }
        let degrees = cam.half_angle_degrees;
        if !(degrees > 0.0 && degrees < 90.0) {
            return Err(ParseError::InvalidFieldOfView { degrees });
        }

        let camera = Camera::new(
            cam.position,
            cam.forward,
            cam.up,
            cam.half_angle_degrees.to_radians(),
            cam.width,
            cam.height,
        );

        let geometry = self.shapes.iter().map(ShapeBlueprint::to_geometry).collect();
        let lights = self.lights.iter().map(LightBlueprint::to_light).collect();

        Ok(Scene::new(
            camera,
            geometry,
            self.background,
            lights,
            self.ambient,
            self.max_depth,
        ))
    }
}

impl ShapeBlueprint {
    fn to_geometry(&self) -> Geometry {
        match self {
            ShapeBlueprint::Sphere {
                center,
                radius,
                material,
            } => Sphere::new(*center, *radius, material.clone()).into(),
            ShapeBlueprint::Triangle { vertices, material } => {
                let [v1, v2, v3] = *vertices;
                Triangle::new(v1, v2, v3, material.clone()).into()
            }
            ShapeBlueprint::SmoothTriangle {
                vertices,
                normals,
                material,
            } => SmoothTriangle::new(*vertices, *normals, material.clone()).into(),
        }
    }
}

impl LightBlueprint {
    fn to_light(&self) -> Light {
        match self {
            LightBlueprint::Point { color, position } => PointLight::new(*position, *color).into(),
            LightBlueprint::Directional { color, direction } => {
                DirectionalLight::new(*direction, *color).into()
            }
            LightBlueprint::Spot {
                color,
                position,
                direction,
                inner_degrees,
                outer_degrees,
            } => SpotLight::new(
                *position,
                *direction,
                inner_degrees.to_radians(),
                outer_degrees.to_radians(),
                *color,
            )
            .into(),
        }
    }
}
