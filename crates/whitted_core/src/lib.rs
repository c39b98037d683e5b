//! Whitted Core - Scene description and shading for the Whitted ray tracer.
//!
//! This crate provides:
//!
//! - **Scene types**: `Camera`, `Material`, `Geometry` (spheres and flat or
//!   smooth triangles), `Light` (point, spot, directional)
//! - **Shading**: `Scene::find_intersection_color`, recursive Phong shading
//!   with shadows, reflection and refraction
//! - **Scene files**: line-oriented text parsing and loading
//!
//! # Example
//!
//! ```ignore
//! use whitted_core::scene_file::load_scene;
//!
//! let file = load_scene("scene.txt")?;
//! let ray = file.scene.construct_ray(0.5, 0.5);
//! let color = file.scene.find_intersection_color(&ray);
//! ```

pub mod camera;
pub mod geometry;
pub mod light;
pub mod material;
pub mod scene;
pub mod scene_file;
pub mod sphere;
pub mod triangle;

// Re-export commonly used types
pub use camera::Camera;
pub use geometry::{Geometry, Hittable};
pub use light::{DirectionalLight, Light, PointLight, SpotLight};
pub use material::Material;
pub use scene::{Intersection, Scene, SURFACE_EPSILON};
pub use scene_file::{load_scene, load_scene_from_string, parse_scene, SceneFile};
pub use sphere::Sphere;
pub use triangle::{SmoothTriangle, Triangle};
