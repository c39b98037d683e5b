//! Loading scene files from disk.

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::parser::{parse_blueprint, ParseError};
use crate::Scene;

/// Errors that can occur while loading a scene file.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// A parsed scene and where its author asked for the image to be written.
#[derive(Clone, Debug)]
pub struct SceneFile {
    pub scene: Scene,
    /// `output_image` resolved against the scene file's directory.
    pub output_image: PathBuf,
}

/// Load a scene file from disk.
///
/// # Example
///
/// ```ignore
/// use whitted_core::scene_file::load_scene;
///
/// let file = load_scene("scene.txt")?;
/// println!("rendering to {}", file.output_image.display());
/// ```
pub fn load_scene<P: AsRef<Path>>(path: P) -> LoadResult<SceneFile> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let base_dir = path.parent().map(Path::to_path_buf);
    log::debug!("Read {} bytes from {}", content.len(), path.display());
    load_scene_from_string(&content, base_dir)
}

/// Load a scene from text (useful for testing).
pub fn load_scene_from_string(content: &str, base_dir: Option<PathBuf>) -> LoadResult<SceneFile> {
    let blueprint = parse_blueprint(content)?;
    let scene = blueprint.to_scene()?;

    let output_image = match base_dir {
        Some(dir) => dir.join(&blueprint.output_image),
        None => PathBuf::from(&blueprint.output_image),
    };

    log::info!(
        "Loaded scene: {} primitives, {} lights, {}x{}, max depth {}",
        scene.geometry().len(),
        scene.lights().len(),
        scene.camera().width(),
        scene.camera().height(),
        scene.max_depth()
    );

    Ok(SceneFile {
        scene,
        output_image,
    })
}
