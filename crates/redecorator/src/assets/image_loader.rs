//! Image decoding for pack textures
//!
//! The engine never looks at pixels; it only needs a decoded, immutable
//! image per file. Decoding sits behind [`ImageDecoder`] so hosts can plug
//! in their own codec. [`DefaultImageDecoder`] uses the `image` crate.

use std::path::Path;

use thiserror::Error;

/// Image bytes could not be decoded
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct DecodeError(pub String);

/// Decoded RGBA image data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    /// Raw RGBA pixel data
    pub data: Vec<u8>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Number of color channels (always 4 for RGBA)
    pub channels: u8,
}

impl ImageData {
    /// Load an image from a file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, DecodeError> {
        let path_ref = path.as_ref();

        log::debug!("Loading image from: {:?}", path_ref);

        let img = image::open(path_ref)
            .map_err(|e| DecodeError(format!("Failed to load image: {e}")))?;

        Ok(Self::from_dynamic(&img))
    }

    /// Decode an image from memory
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| DecodeError(format!("Failed to load image from bytes: {e}")))?;

        let decoded = Self::from_dynamic(&img);
        log::trace!("Decoded image {}x{} from memory", decoded.width, decoded.height);
        Ok(decoded)
    }

    fn from_dynamic(img: &image::DynamicImage) -> Self {
        let rgba_img = img.to_rgba8();
        let (width, height) = rgba_img.dimensions();

        Self {
            data: rgba_img.into_raw(),
            width,
            height,
            channels: 4,
        }
    }

    /// Create a solid color image (useful for testing and defaults)
    pub fn solid_color(width: u32, height: u32, color: [u8; 4]) -> Self {
        let pixel_count = (width * height) as usize;
        let mut data = Vec::with_capacity(pixel_count * 4);

        for _ in 0..pixel_count {
            data.extend_from_slice(&color);
        }

        Self {
            data,
            width,
            height,
            channels: 4,
        }
    }

    /// Get the size of the image data in bytes
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }
}

/// Codec seam used by the texture set loader
pub trait ImageDecoder {
    /// Decode raw file bytes into an image
    fn decode(&self, bytes: &[u8]) -> Result<ImageData, DecodeError>;
}

/// Decoder backed by the `image` crate
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultImageDecoder;

impl ImageDecoder for DefaultImageDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<ImageData, DecodeError> {
        ImageData::from_bytes(bytes)
    }
}
