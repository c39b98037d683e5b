//! Line-by-line scene file parser.
//!
//! # Directives
//!
//! - `camera px py pz  dx dy dz  ux uy uz  half_angle_degrees`
//! - `film_resolution w h`, `output_image filename`
//! - `background r g b`, `ambient_light r g b`, `max_depth n`
//! - `material ar ag ab  dr dg db  sr sg sb  phong  tr tg tb  ior`
//! - `sphere x y z r`
//! - `max_vertices n`, `vertex x y z`, `triangle i1 i2 i3`
//! - `max_normals n`, `normal x y z`, `normal_triangle v1 v2 v3 n1 n2 n3`
//! - `point_light r g b x y z`, `directional_light r g b dx dy dz`
//! - `spot_light r g b px py pz dx dy dz inner_degrees outer_degrees`
//!
//! Vertex and normal indices are 0-based. Tokens past a directive's last
//! argument are ignored.

use std::str::FromStr;

use thiserror::Error;
use whitted_math::{Point3, RayColor, Vector3};

use super::blueprint::{LightBlueprint, SceneBlueprint, ShapeBlueprint};
use crate::{Material, Scene};

/// Errors that can occur while parsing a scene file.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("line {line}: unknown directive: {text}")]
    UnknownDirective { line: usize, text: String },

    #[error("line {line}: missing argument: {text}")]
    MissingArgument { line: usize, text: String },

    #[error("line {line}: invalid number '{token}': {text}")]
    InvalidNumber {
        line: usize,
        text: String,
        token: String,
    },

    #[error("line {line}: vertex index {index} out of range ({count} declared): {text}")]
    VertexIndexOutOfRange {
        line: usize,
        text: String,
        index: usize,
        count: usize,
    },

    #[error("line {line}: normal index {index} out of range ({count} declared): {text}")]
    NormalIndexOutOfRange {
        line: usize,
        text: String,
        index: usize,
        count: usize,
    },

    #[error("line {line}: triangle has zero area: {text}")]
    DegenerateTriangle { line: usize, text: String },

    #[error("line {line}: direction has zero length: {text}")]
    ZeroDirection { line: usize, text: String },

    #[error("camera forward and up directions are parallel")]
    DegenerateCamera,

    #[error("invalid film resolution {width}x{height}")]
    InvalidResolution { width: u32, height: u32 },

    #[error("camera half angle {degrees} must be between 0 and 90 degrees")]
    InvalidFieldOfView { degrees: f64 },
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// One non-blank, non-comment line split into a keyword and its arguments.
struct Directive<'a> {
    line: usize,
    text: &'a str,
    keyword: &'a str,
    args: Vec<&'a str>,
}

impl<'a> Directive<'a> {
    fn new(line: usize, text: &'a str) -> Option<Self> {
        let mut tokens = text.split_whitespace();
        let keyword = tokens.next()?;
        if keyword.starts_with('#') {
            return None;
        }
        Some(Self {
            line,
            text,
            keyword,
            args: tokens.collect(),
        })
    }

    fn token(&self, index: usize) -> ParseResult<&'a str> {
        self.args
            .get(index)
            .copied()
            .ok_or_else(|| ParseError::MissingArgument {
                line: self.line,
                text: self.text.to_string(),
            })
    }

    fn parse<T: FromStr>(&self, index: usize) -> ParseResult<T> {
        let token = self.token(index)?;
        token.parse().map_err(|_| self.invalid_number(token))
    }

    fn number(&self, index: usize) -> ParseResult<f64> {
        let value: f64 = self.parse(index)?;
        if !value.is_finite() {
            return Err(self.invalid_number(self.args[index]));
        }
        Ok(value)
    }

    fn triple(&self, index: usize) -> ParseResult<(f64, f64, f64)> {
        Ok((self.number(index)?, self.number(index + 1)?, self.number(index + 2)?))
    }

    fn point(&self, index: usize) -> ParseResult<Point3> {
        let (x, y, z) = self.triple(index)?;
        Ok(Point3::new(x, y, z))
    }

    fn color(&self, index: usize) -> ParseResult<RayColor> {
        let (r, g, b) = self.triple(index)?;
        Ok(RayColor::new(r, g, b))
    }

    /// A direction that must be normalizable.
    fn direction(&self, index: usize) -> ParseResult<Vector3> {
        let (x, y, z) = self.triple(index)?;
        let v = Vector3::new(x, y, z);
        if v.try_normalize().is_none() {
            return Err(ParseError::ZeroDirection {
                line: self.line,
                text: self.text.to_string(),
            });
        }
        Ok(v)
    }

    fn invalid_number(&self, token: &str) -> ParseError {
        ParseError::InvalidNumber {
            line: self.line,
            text: self.text.to_string(),
            token: token.to_string(),
        }
    }
}

/// Fixed-order table filled by `vertex` / `normal` directives.
///
/// `max_*` declares the expected size; filling past it, or without one,
/// grows the table and warns.
/// Upper bound on entries reserved up front from a `max_*` declaration.
const MAX_PRERESERVE: usize = 1 << 16;

struct Table<T> {
    name: &'static str,
    items: Vec<T>,
    declared: Option<usize>,
    warned: bool,
}

impl<T: Copy> Table<T> {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            items: Vec::new(),
            declared: None,
            warned: false,
        }
    }

    fn declare(&mut self, capacity: usize, line: usize) {
        if capacity < self.items.len() {
            log::warn!(
                "line {}: max_{}s {} is smaller than the {} already declared",
                line,
                self.name,
                capacity,
                self.items.len()
            );
        }
        // Declared sizes are hints; never trust them for a large allocation
        let wanted = capacity.min(MAX_PRERESERVE);
        self.items.reserve(wanted.saturating_sub(self.items.len()));
        self.declared = Some(capacity);
    }

    fn push(&mut self, item: T, line: usize) {
        let within = self.declared.is_some_and(|cap| self.items.len() < cap);
        if !within && !self.warned {
            match self.declared {
                Some(cap) => log::warn!(
                    "line {}: more than {} {}s declared, growing table",
                    line,
                    cap,
                    self.name
                ),
                None => log::warn!(
                    "line {}: {} declared without max_{}s, growing table",
                    line,
                    self.name,
                    self.name
                ),
            }
            self.warned = true;
        }
        self.items.push(item);
    }

    fn get(&self, index: usize) -> Option<T> {
        self.items.get(index).copied()
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}

/// Scene file parser.
///
/// Holds the blueprint under construction plus the state directives refer
/// back to: the current material and the vertex and normal tables.
pub struct SceneParser {
    blueprint: SceneBlueprint,
    material: Material,
    vertices: Table<Point3>,
    normals: Table<Vector3>,
}

impl Default for SceneParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneParser {
    pub fn new() -> Self {
        Self {
            blueprint: SceneBlueprint::default(),
            material: Material::default(),
            vertices: Table::new("vertex"),
            normals: Table::new("normal"),
        }
    }

    /// Parse every line of `content`, stopping at the first error.
    pub fn parse(mut self, content: &str) -> ParseResult<SceneBlueprint> {
        for (i, text) in content.lines().enumerate() {
            if let Some(directive) = Directive::new(i + 1, text.trim()) {
                self.apply(&directive)?;
            }
        }
        Ok(self.blueprint)
    }

    fn apply(&mut self, d: &Directive<'_>) -> ParseResult<()> {
        let bp = &mut self.blueprint;
        match d.keyword {
            "camera" => {
                bp.camera.position = d.point(0)?;
                bp.camera.forward = d.direction(3)?;
                bp.camera.up = d.direction(6)?;
                bp.camera.half_angle_degrees = d.number(9)?;
            }
            "film_resolution" => {
                bp.camera.width = d.parse(0)?;
                bp.camera.height = d.parse(1)?;
            }
            "output_image" => bp.output_image = d.token(0)?.to_string(),
            "background" => bp.background = d.color(0)?,
            "ambient_light" => bp.ambient = d.color(0)?,
            "max_depth" => bp.max_depth = d.parse(0)?,
            "material" => {
                self.material = Material::new(
                    d.color(0)?,
                    d.color(3)?,
                    d.color(6)?,
                    d.number(9)?,
                    d.color(10)?,
                    d.number(13)?,
                );
            }
            "sphere" => bp.shapes.push(ShapeBlueprint::Sphere {
                center: d.point(0)?,
                radius: d.number(3)?,
                material: self.material.clone(),
            }),
            "max_vertices" => self.vertices.declare(d.parse(0)?, d.line),
            "vertex" => {
                let vertex = d.point(0)?;
                self.vertices.push(vertex, d.line);
            }
            "max_normals" => self.normals.declare(d.parse(0)?, d.line),
            "normal" => {
                let normal = d.direction(0)?;
                self.normals.push(normal, d.line);
            }
            "triangle" => {
                let vertices = self.triangle_vertices(d)?;
                self.blueprint.shapes.push(ShapeBlueprint::Triangle {
                    vertices,
                    material: self.material.clone(),
                });
            }
            "normal_triangle" => {
                let vertices = self.triangle_vertices(d)?;
                let normals = [
                    self.normal_at(d, 3)?,
                    self.normal_at(d, 4)?,
                    self.normal_at(d, 5)?,
                ];
                self.blueprint.shapes.push(ShapeBlueprint::SmoothTriangle {
                    vertices,
                    normals,
                    material: self.material.clone(),
                });
            }
            "point_light" => bp.lights.push(LightBlueprint::Point {
                color: d.color(0)?,
                position: d.point(3)?,
            }),
            "directional_light" => bp.lights.push(LightBlueprint::Directional {
                color: d.color(0)?,
                direction: d.direction(3)?,
            }),
            "spot_light" => {
                let inner_degrees = d.number(9)?;
                let outer_degrees = d.number(10)?;
                if inner_degrees > outer_degrees {
                    log::warn!(
                        "line {}: spot light inner angle {} exceeds outer angle {}",
                        d.line,
                        inner_degrees,
                        outer_degrees
                    );
                }
                bp.lights.push(LightBlueprint::Spot {
                    color: d.color(0)?,
                    position: d.point(3)?,
                    direction: d.direction(6)?,
                    inner_degrees,
                    outer_degrees,
                });
            }
            _ => {
                return Err(ParseError::UnknownDirective {
                    line: d.line,
                    text: d.text.to_string(),
                })
            }
        }
        Ok(())
    }

    /// Resolve three vertex-table indices starting at argument 0.
    fn triangle_vertices(&self, d: &Directive<'_>) -> ParseResult<[Point3; 3]> {
        let vertices = [
            self.vertex_at(d, 0)?,
            self.vertex_at(d, 1)?,
            self.vertex_at(d, 2)?,
        ];
        let [v1, v2, v3] = vertices;
        if (v2 - v1).cross(v3 - v1).try_normalize().is_none() {
            return Err(ParseError::DegenerateTriangle {
                line: d.line,
                text: d.text.to_string(),
            });
        }
        Ok(vertices)
    }

    fn vertex_at(&self, d: &Directive<'_>, arg: usize) -> ParseResult<Point3> {
        let index: usize = d.parse(arg)?;
        self.vertices
            .get(index)
            .ok_or_else(|| ParseError::VertexIndexOutOfRange {
                line: d.line,
                text: d.text.to_string(),
                index,
                count: self.vertices.len(),
            })
    }

    fn normal_at(&self, d: &Directive<'_>, arg: usize) -> ParseResult<Vector3> {
        let index: usize = d.parse(arg)?;
        self.normals
            .get(index)
            .ok_or_else(|| ParseError::NormalIndexOutOfRange {
                line: d.line,
                text: d.text.to_string(),
                index,
                count: self.normals.len(),
            })
    }
}

/// Parse scene file text into a blueprint without building the scene.
pub fn parse_blueprint(content: &str) -> ParseResult<SceneBlueprint> {
    SceneParser::new().parse(content)
}

/// Parse scene file text straight into an immutable [`Scene`].
pub fn parse_scene(content: &str) -> ParseResult<Scene> {
    parse_blueprint(content)?.to_scene()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Geometry, Hittable, Light};

    const MINIMAL: &str = "\
# minimal scene
camera 0 0 0  1 0 0  0 1 0  20
film_resolution 32 24

material 0.1 0.2 0.3  0.4 0.5 0.6  0.7 0.8 0.9  32  0.05 0.06 0.07  1.5
sphere 90 0 0 20
point_light 1 1 1  90 300 0
";

    #[test]
    fn test_parse_minimal_scene() {
        let scene = parse_scene(MINIMAL).unwrap();

        assert_eq!(scene.geometry().len(), 1);
        assert_eq!(scene.lights().len(), 1);
        assert_eq!(scene.camera().width(), 32);
        assert_eq!(scene.camera().height(), 24);

        let Geometry::Sphere(sphere) = &scene.geometry()[0] else {
            panic!("expected a sphere");
        };
        assert_eq!(sphere.center(), Point3::new(90.0, 0.0, 0.0));
        assert_eq!(sphere.radius(), 20.0);

        let material = sphere.material();
        assert_eq!(material.ambient, RayColor::new(0.1, 0.2, 0.3));
        assert_eq!(material.diffuse, RayColor::new(0.4, 0.5, 0.6));
        assert_eq!(material.specular, RayColor::new(0.7, 0.8, 0.9));
        assert_eq!(material.phong_exponent, 32.0);
        assert_eq!(material.transmissive, RayColor::new(0.05, 0.06, 0.07));
        assert_eq!(material.refractive_index, 1.5);
    }

    #[test]
    fn test_defaults_when_directives_absent() {
        let blueprint = parse_blueprint("").unwrap();
        assert_eq!(blueprint, SceneBlueprint::default());
        assert_eq!(blueprint.output_image, "raytraced.bmp");
    }

    #[test]
    fn test_material_applies_to_later_shapes_only() {
        let blueprint = parse_blueprint(
            "sphere 0 0 5 1\n\
             material 1 0 0  0 0 0  0 0 0  1  0 0 0  1\n\
             sphere 0 0 9 1\n",
        )
        .unwrap();

        let materials: Vec<_> = blueprint
            .shapes
            .iter()
            .map(|s| match s {
                ShapeBlueprint::Sphere { material, .. } => material.clone(),
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(materials[0], Material::default());
        assert_eq!(materials[1].ambient, RayColor::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_scalar_directives() {
        let blueprint = parse_blueprint(
            "output_image out.png\nbackground 0.1 0.2 0.3\nambient_light 0.4 0.4 0.4\nmax_depth 2\n",
        )
        .unwrap();

        assert_eq!(blueprint.output_image, "out.png");
        assert_eq!(blueprint.background, RayColor::new(0.1, 0.2, 0.3));
        assert_eq!(blueprint.ambient, RayColor::gray(0.4));
        assert_eq!(blueprint.max_depth, 2);
    }

    #[test]
    fn test_triangles_from_tables() {
        let scene = parse_scene(
            "max_vertices 3\n\
             vertex 0 0 5\nvertex 1 0 5\nvertex 0 1 5\n\
             max_normals 2\n\
             normal 0 0 -1\nnormal 0 1 -1\n\
             triangle 0 1 2\n\
             normal_triangle 0 1 2  0 0 1\n",
        )
        .unwrap();

        assert_eq!(scene.geometry().len(), 2);
        let Geometry::Triangle(flat) = &scene.geometry()[0] else {
            panic!("expected a flat triangle");
        };
        assert_eq!(flat.vertices()[1], Point3::new(1.0, 0.0, 5.0));
        assert!(matches!(scene.geometry()[1], Geometry::SmoothTriangle(_)));
    }

    #[test]
    fn test_vertex_index_out_of_range() {
        let err = parse_blueprint("max_vertices 3\nvertex 0 0 0\nvertex 1 0 0\ntriangle 0 1 2\n").unwrap_err();
        assert!(matches!(
            err,
            ParseError::VertexIndexOutOfRange { line: 4, index: 2, count: 2, .. }
        ));
    }

    #[test]
    fn test_normal_index_out_of_range() {
        let err = parse_blueprint(
            "vertex 0 0 0\nvertex 1 0 0\nvertex 0 1 0\nnormal 0 0 1\nnormal_triangle 0 1 2 0 0 5\n",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ParseError::NormalIndexOutOfRange { line: 5, index: 5, count: 1, .. }
        ));
    }

    #[test]
    fn test_vertices_without_declaration_grow() {
        let blueprint = parse_blueprint("vertex 0 0 0\nvertex 1 0 0\nvertex 0 1 0\ntriangle 2 1 0\n").unwrap();
        assert_eq!(blueprint.shapes.len(), 1);
    }

    #[test]
    fn test_huge_table_declaration_not_reserved() {
        let blueprint = parse_blueprint("max_vertices 18446744073709551615\nvertex 0 0 0\n").unwrap();
        assert!(blueprint.shapes.is_empty());

        let blueprint = parse_blueprint(
            "max_normals 18446744073709551615\n\
             max_vertices 18446744073709551615\n\
             vertex 0 0 0\nvertex 1 0 0\nvertex 0 1 0\ntriangle 0 1 2\n",
        )
        .unwrap();
        assert_eq!(blueprint.shapes.len(), 1);
    }

    #[test]
    fn test_zero_camera_angle_rejected() {
        let err = parse_scene("camera 0 0 0  1 0 0  0 1 0  0\n").unwrap_err();
        assert!(matches!(err, ParseError::InvalidFieldOfView { degrees } if degrees == 0.0));
    }

    #[test]
    fn test_degenerate_triangle_rejected() {
        let err = parse_blueprint("vertex 0 0 0\nvertex 1 1 1\nvertex 2 2 2\ntriangle 0 1 2\n").unwrap_err();
        assert!(matches!(err, ParseError::DegenerateTriangle { line: 4, .. }));
    }

    #[test]
    fn test_unknown_directive_reports_line() {
        let err = parse_blueprint("# comment\n\nteapot 1 2 3\n").unwrap_err();
        match err {
            ParseError::UnknownDirective { line, text } => {
                assert_eq!(line, 3);
                assert_eq!(text, "teapot 1 2 3");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_and_missing_numbers() {
        let err = parse_blueprint("sphere 0 zero 0 1\n").unwrap_err();
        assert!(matches!(err, ParseError::InvalidNumber { line: 1, ref token, .. } if token == "zero"));

        let err = parse_blueprint("sphere 0 0 0\n").unwrap_err();
        assert!(matches!(err, ParseError::MissingArgument { line: 1, .. }));

        let err = parse_blueprint("background nan 0 0\n").unwrap_err();
        assert!(matches!(err, ParseError::InvalidNumber { .. }));

        let err = parse_blueprint("film_resolution 64.5 32\n").unwrap_err();
        assert!(matches!(err, ParseError::InvalidNumber { .. }));
    }

    #[test]
    fn test_zero_light_direction_rejected() {
        let err = parse_blueprint("directional_light 1 1 1 0 0 0\n").unwrap_err();
        assert!(matches!(err, ParseError::ZeroDirection { line: 1, .. }));
    }

    #[test]
    fn test_spot_light_angles_converted() {
        let scene = parse_scene("spot_light 1 1 1  0 0 0  0 0 1  10 20\n").unwrap();
        let Light::Spot(spot) = &scene.lights()[0] else {
            panic!("expected a spot light");
        };

        // Straight down the axis is fully lit, 15 degrees off is halfway in cosine
        assert_eq!(spot.cone_falloff(-Vector3::Z), 1.0);
        let off = 15f64.to_radians();
        let to_light = -Vector3::new(off.sin(), 0.0, off.cos());
        let expected = (off.cos() - 20f64.to_radians().cos())
            / (10f64.to_radians().cos() - 20f64.to_radians().cos());
        assert!((spot.cone_falloff(to_light) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_extra_tokens_ignored() {
        let blueprint = parse_blueprint("max_depth 3 trailing words\n").unwrap();
        assert_eq!(blueprint.max_depth, 3);
    }

    #[test]
    fn test_error_message_includes_line() {
        let err = parse_blueprint("\nsphere 1 2\n").unwrap_err();
        assert_eq!(err.to_string(), "line 2: missing argument: sphere 1 2");
    }
}
