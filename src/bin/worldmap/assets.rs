//! Asset embedding and loading utilities.

use rust_embed::RustEmbed;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use thiserror::Error;
use worldmap_navigator::World;

/// Embeds the demo world from the assets/ directory into the binary.
/// In debug mode, assets are loaded from the filesystem for faster iteration.
/// In release mode, assets are compressed and embedded in the binary.
#[derive(RustEmbed)]
#[folder = "assets/"]
pub struct Assets;

/// Name of the world file inside the embedded assets.
pub const EMBEDDED_WORLD: &str = "world.ron";

/// Errors that can occur when loading a world file.
#[derive(Error, Debug)]
pub enum WorldLoadError {
    #[error("{0} not found in embedded assets")]
    NotFound(String),
    #[error("failed to read world file '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid UTF-8 in world file: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
    #[error("failed to parse world file: {0}")]
    ParseError(#[from] ron::de::SpannedError),
}

/// Errors that can occur when loading and decoding images.
#[derive(Error, Debug)]
pub enum ImageLoadError {
    #[error("asset not found: {0}")]
    AssetNotFound(String),
    #[error("failed to decode image '{path}': {source}")]
    DecodeError {
        path: String,
        source: image::ImageError,
    },
}

/// Where image paths of a world are resolved.
#[derive(Debug, Clone)]
pub enum AssetRoot {
    Embedded,
    /// Directory of a world file given on the command line
    Directory(PathBuf),
}

impl AssetRoot {
    fn read(&self, path: &str) -> Option<Vec<u8>> {
        match self {
            AssetRoot::Embedded => Assets::get(path).map(|file| file.data.into_owned()),
            AssetRoot::Directory(dir) => std::fs::read(dir.join(path)).ok(),
        }
    }
}

/// Decoded image data ready for texture creation.
pub struct DecodedImage {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// State of an asset being loaded asynchronously.
pub enum AssetLoadState {
    /// Asset is being loaded in a background thread.
    Loading(mpsc::Receiver<Result<DecodedImage, ImageLoadError>>),
    /// Asset has been decoded and is ready for texture creation.
    Ready(DecodedImage),
    /// Loading failed; stores the error message (already displayed via toast).
    Error(String),
}

/// Loads and decodes an image relative to the asset root.
pub fn load_and_decode_image(root: &AssetRoot, path: &str) -> Result<DecodedImage, ImageLoadError> {
    let data = root
        .read(path)
        .ok_or_else(|| ImageLoadError::AssetNotFound(path.to_string()))?;

    let img = image::load_from_memory(&data).map_err(|source| ImageLoadError::DecodeError {
        path: path.to_string(),
        source,
    })?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(DecodedImage {
        pixels: rgba.into_raw(),
        width,
        height,
    })
}

/// Loads the demo world from embedded assets.
pub fn load_embedded_world() -> Result<(World, AssetRoot), WorldLoadError> {
    let file = Assets::get(EMBEDDED_WORLD)
        .ok_or_else(|| WorldLoadError::NotFound(EMBEDDED_WORLD.to_owned()))?;
    let ron_string = std::str::from_utf8(&file.data)?;
    Ok((ron::from_str(ron_string)?, AssetRoot::Embedded))
}

/// Loads a world file from disk; its images are resolved next to it.
pub fn load_world_file(path: &Path) -> Result<(World, AssetRoot), WorldLoadError> {
    let ron_string = std::fs::read_to_string(path).map_err(|source| WorldLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let dir = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    Ok((ron::from_str(&ron_string)?, AssetRoot::Directory(dir)))
}
