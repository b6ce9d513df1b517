//! Decoded image data as a flat RGBA grid

use image::DynamicImage;

use crate::error::{AnalysisError, Result};

/// A decoded image exposed as width, height and flat RGBA bytes
///
/// The buffer is read-only input to the classification passes; nothing in
/// the crate mutates pixel data after construction.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw RGBA bytes
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidBuffer` when the byte length does
    /// not equal `width * height * 4`.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(AnalysisError::InvalidBuffer {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Convert a decoded image into an RGBA pixel buffer
    pub fn from_image(image: &DynamicImage) -> Self {
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self {
            width,
            height,
            data: rgba.into_raw(),
        }
    }

    /// Image width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of pixels, opaque or not
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }

    /// Raw RGBA bytes, stride 4
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Iterate pixels as `[r, g, b, a]` quadruplets in row-major order
    pub fn pixels(&self) -> impl Iterator<Item = [u8; 4]> + '_ {
        self.data
            .chunks_exact(4)
            .map(|px| [px[0], px[1], px[2], px[3]])
    }
}
