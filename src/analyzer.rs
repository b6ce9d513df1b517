//! Analysis orchestration
//!
//! Decodes an image source once, runs the reference-palette classifier,
//! and switches to dynamic clustering when the palette explains too small
//! a share of the image. The match percentage is recorded on the result
//! either way, so callers can see how confident the palette pass was.
//!
//! Algorithm tag: `algo-confidence-gated-classification`

use tracing::{debug, warn};

use crate::buffer::PixelBuffer;
use crate::classify::{AnalysisType, ClassificationResult, ColorClusterer, PixelClassifier};
use crate::config::AnalyzerConfig;
use crate::error::Result;
use crate::index::IndexKind;
use crate::palettes::{self, ReferenceColor};
use crate::source::ImageSource;

/// Orchestrates decoding, classification and the clustering fallback
pub struct Analyzer {
    config: AnalyzerConfig,
    classifier: PixelClassifier,
    clusterer: ColorClusterer,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer {
    /// Create an analyzer with the default configuration
    pub fn new() -> Self {
        Self::with_config(AnalyzerConfig::default())
    }

    /// Create an analyzer with a custom configuration
    pub fn with_config(config: AnalyzerConfig) -> Self {
        let clusterer = ColorClusterer::with_config(config.cluster.clone());
        Self {
            config,
            classifier: PixelClassifier::new(),
            clusterer,
        }
    }

    /// Analyze an image source against an explicit reference palette
    ///
    /// The await point is loading the image bytes; classification and
    /// clustering run synchronously on the decoded buffer.
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::DecodeError` when the source cannot be read
    /// or decoded. An empty palette is not an error: analysis recovers
    /// with the built-in NDVI palette and logs a warning.
    pub async fn analyze(
        &self,
        source: &ImageSource,
        palette: &[ReferenceColor],
        index: IndexKind,
    ) -> Result<ClassificationResult> {
        let buffer = source.decode().await?;
        Ok(self.analyze_buffer(&buffer, palette, index))
    }

    /// Analyze an image source with the built-in palette for `index`
    pub async fn analyze_index(
        &self,
        source: &ImageSource,
        index: IndexKind,
    ) -> Result<ClassificationResult> {
        self.analyze(source, palettes::palette_for(index), index).await
    }

    /// Classify an already-decoded buffer (the synchronous core of
    /// [`Analyzer::analyze`])
    pub fn analyze_buffer(
        &self,
        buffer: &PixelBuffer,
        palette: &[ReferenceColor],
        index: IndexKind,
    ) -> ClassificationResult {
        let palette = if palette.is_empty() {
            warn!("empty reference palette supplied, recovering with the built-in NDVI palette");
            palettes::DEFAULT_PALETTE
        } else {
            palette
        };

        let mut result = self.classifier.classify(buffer, palette);

        let analyzed = result.total_pixels;
        let matched = result.classified_pixels();
        let match_percentage = if analyzed > 0 {
            f64::from(matched) / f64::from(analyzed) * 100.0
        } else {
            0.0
        };

        if analyzed > 0 && match_percentage < self.config.fallback_match_threshold {
            debug!(
                match_percentage,
                threshold = self.config.fallback_match_threshold,
                "reference palette explains too few pixels, switching to dynamic clustering"
            );
            result.categories = self.clusterer.cluster(buffer, index);
            result.analysis_type = AnalysisType::Dynamic;
        }

        result.metadata.match_percentage = Some(match_percentage);
        result
    }
}
