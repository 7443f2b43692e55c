//! Texture pack assets
//!
//! Loading goes filesystem → [`TextureSet`] trees → [`PackRegistry`], with
//! alias declarations applied after each pack's objects are registered.

pub mod alias_parser;
pub mod image_loader;
pub mod pack_registry;
pub mod texture_set;

pub use alias_parser::{AliasError, AliasParser, AliasRule};
pub use image_loader::{DecodeError, DefaultImageDecoder, ImageData, ImageDecoder};
pub use pack_registry::{LoadReport, ObjectRegistration, PackEntry, PackRegistry};
pub use texture_set::{Texture, TextureHandle, TextureSet};

use std::path::PathBuf;
use thiserror::Error;

/// Fatal asset loading errors
///
/// Any of these aborts the whole registry build.
#[derive(Error, Debug)]
pub enum AssetError {
    /// A file or directory could not be read
    #[error("IO error reading {}: {source}", path.display())]
    Io {
        /// Path being read
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// An image file could not be decoded
    #[error("Failed to decode {}: {source}", path.display())]
    Decode {
        /// Image file path
        path: PathBuf,
        /// Decoder error
        source: DecodeError,
    },

    /// Expected a directory
    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
}
