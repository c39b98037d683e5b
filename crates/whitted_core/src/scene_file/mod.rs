//! Scene description files.
//!
//! The format is line oriented: one directive per line, whitespace separated
//! tokens, `#` comments. Parsing fills a mutable [`SceneBlueprint`] which is
//! converted once into an immutable [`Scene`](crate::Scene).
//!
//! ```text
//! camera 0 0 0  1 0 0  0 1 0  20
//! film_resolution 320 240
//! material 0.1 0 0  1 0 0  0.5 0.5 0.5  32  0 0 0  1
//! sphere 90 0 0 20
//! point_light 1 1 1  90 300 0
//! ```
//!
//! # Example
//!
//! ```ignore
//! use whitted_core::scene_file::load_scene;
//!
//! let file = load_scene("scenes/spheres.txt")?;
//! println!("{} primitives -> {}", file.scene.geometry().len(), file.output_image);
//! ```

mod blueprint;
mod loader;
mod parser;

pub use blueprint::*;
pub use loader::*;
pub use parser::*;
