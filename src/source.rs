//! Image source resolution and decoding
//!
//! The analyzer accepts filesystem paths, already-fetched encoded bytes,
//! and embedded `data:` URIs. Whatever the origin, decoding ends in a
//! [`PixelBuffer`]. Remote URLs are not fetched here; the caller
//! downloads the rendering and passes the bytes.

use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::buffer::PixelBuffer;
use crate::error::{AnalysisError, Result};

/// Origin of the image to analyze
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// Read and decode a file on disk
    Path(PathBuf),
    /// Decode already-fetched encoded image bytes (PNG, JPEG, WebP)
    Bytes(Vec<u8>),
    /// Decode an embedded `data:` URI with a base64 payload
    DataUri(String),
}

impl ImageSource {
    /// Build a source from a URI-like string
    ///
    /// `data:` URIs become embedded payloads; anything else is treated as
    /// a filesystem path.
    pub fn from_uri(uri: &str) -> Self {
        if uri.starts_with("data:") {
            Self::DataUri(uri.to_string())
        } else {
            Self::Path(PathBuf::from(uri))
        }
    }

    /// Resolve the source into a decoded RGBA pixel buffer
    ///
    /// The await point is the file read; decoding itself is synchronous.
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::DecodeError` when the source cannot be read
    /// or its bytes are not a decodable image.
    pub async fn decode(&self) -> Result<PixelBuffer> {
        match self {
            Self::Path(path) => {
                let bytes = tokio::fs::read(path).await.map_err(|e| {
                    AnalysisError::decode(
                        format!("failed to read image file {}", path.display()),
                        e,
                    )
                })?;
                decode_bytes(&bytes)
            }
            Self::Bytes(bytes) => decode_bytes(bytes),
            Self::DataUri(uri) => {
                let bytes = decode_data_uri(uri)?;
                decode_bytes(&bytes)
            }
        }
    }
}

impl From<PathBuf> for ImageSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<&Path> for ImageSource {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}

impl From<Vec<u8>> for ImageSource {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

/// Decode encoded image bytes into an RGBA buffer
fn decode_bytes(bytes: &[u8]) -> Result<PixelBuffer> {
    let image = image::load_from_memory(bytes)
        .map_err(|e| AnalysisError::decode("unsupported or corrupt image data", e))?;
    Ok(PixelBuffer::from_image(&image))
}

/// Extract and decode the base64 payload of a `data:` URI
fn decode_data_uri(uri: &str) -> Result<Vec<u8>> {
    let (header, payload) = uri
        .strip_prefix("data:")
        .and_then(|rest| rest.split_once(','))
        .ok_or_else(|| {
            AnalysisError::decode_message("malformed data URI: missing comma separator")
        })?;

    if !header.ends_with(";base64") {
        return Err(AnalysisError::decode_message(
            "data URI payload is not base64-encoded",
        ));
    }

    STANDARD
        .decode(payload.trim())
        .map_err(|e| AnalysisError::decode("invalid base64 payload in data URI", e))
}
