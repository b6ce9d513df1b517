//! # Cropscan
//!
//! A Rust crate for color classification and agronomic interpretation of
//! rendered satellite-index imagery (NDVI, NDMI, SAVI).
//!
//! This library takes a false-color index rendering and:
//! - Classifies every opaque pixel against an ordered reference palette
//! - Falls back to dynamic color clustering when the palette explains
//!   too little of the image
//! - Aggregates the breakdown into semantic buckets and produces a
//!   threshold-based agronomic diagnosis
//!
//! ## Example
//!
//! ```rust,no_run
//! use cropscan::{analyze_and_interpret, ImageSource, IndexKind};
//!
//! # async fn run() -> cropscan::Result<()> {
//! let source = ImageSource::from_uri("parcela_ndvi.png");
//! let (result, diagnosis) = analyze_and_interpret(&source, IndexKind::Ndvi).await?;
//! println!(
//!     "{} categorías, alerta {}: {}",
//!     result.categories.len(),
//!     diagnosis.alert_level,
//!     diagnosis.summary
//! );
//! # Ok(())
//! # }
//! ```

pub mod analyzer;
pub mod buffer;
pub mod classify;
pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod index;
pub mod interpret;
pub mod palettes;
pub mod source;

pub use analyzer::Analyzer;
pub use buffer::PixelBuffer;
pub use classify::{
    AnalysisMetadata, AnalysisType, CategoryCount, ClassificationResult, ColorClusterer,
    PixelClassifier, SemanticClass,
};
pub use config::{AnalyzerConfig, ClusterConfig};
pub use error::{AnalysisError, Result};
pub use index::{IndexInfo, IndexKind};
pub use interpret::{interpret, interpret_named, AlertLevel, Diagnosis, SemanticBreakdown};
pub use palettes::{palette_for, ReferenceColor, NDMI_PALETTE, NDVI_PALETTE, SAVI_PALETTE};
pub use source::ImageSource;

/// Analyze an image source with the built-in palette for `index`
///
/// This is the main entry point for classification. For custom palettes
/// or configuration, use [`Analyzer`] directly.
///
/// # Errors
///
/// Returns `AnalysisError::DecodeError` if the source cannot be read or
/// its bytes are not a decodable image.
pub async fn analyze_image(
    source: &ImageSource,
    index: IndexKind,
) -> Result<ClassificationResult> {
    Analyzer::new().analyze_index(source, index).await
}

/// Analyze an image source and interpret the result in one call
pub async fn analyze_and_interpret(
    source: &ImageSource,
    index: IndexKind,
) -> Result<(ClassificationResult, Diagnosis)> {
    let result = analyze_image(source, index).await?;
    let diagnosis = interpret(&result, index);
    Ok((result, diagnosis))
}
