//! Vector kernel for the Whitted ray tracer.
//!
//! Double precision affine math built on `glam::DVec3`:
//!
//! - [`Point3`] / [`Vector3`]: positions and directions, kept apart so the
//!   affine rules (`Point3 - Point3 = Vector3`, `Point3 + Vector3 = Point3`)
//!   are checked by the compiler
//! - [`RayColor`]: linear, unclamped radiance
//! - [`Ray`]: origin, unit direction and bounce depth
//! - [`Interval`]: closed/open range tests on ray parameters

// Re-export glam for convenience
pub use glam;

mod color;
mod interval;
mod ray;
mod vector;

pub use color::RayColor;
pub use interval::Interval;
pub use ray::Ray;
pub use vector::{Point3, Vector3};
