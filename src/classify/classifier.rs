//! Reference-palette pixel classification
//!
//! Classifies every opaque pixel of an RGBA buffer against an ordered
//! reference palette:
//! - the tolerance test is per channel, absolute difference
//! - palette order decides overlaps (first matching band wins)
//! - transparent pixels are cloud mask or no-coverage and never count
//!
//! Algorithm tag: `algo-ordered-tolerance-classification`

use chrono::Utc;

use crate::buffer::PixelBuffer;
use crate::classify::{
    percent_string, AnalysisMetadata, AnalysisType, CategoryCount, ClassificationResult,
};
use crate::constants::alpha;
use crate::palettes::ReferenceColor;

/// Palette-driven pixel classifier
pub struct PixelClassifier {
    /// Minimum alpha for a pixel to count as data
    opaque_min: u8,
}

impl Default for PixelClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl PixelClassifier {
    /// Create a classifier with the standard alpha cutoff
    pub fn new() -> Self {
        Self {
            opaque_min: alpha::OPAQUE_MIN,
        }
    }

    /// Classify every opaque pixel of `buffer` against `palette`
    ///
    /// Every palette entry appears in the result, zero-count entries
    /// included, in palette order. Percentages are shares of the analyzed
    /// (opaque) pixels; an image with no opaque pixels keeps them
    /// well-defined by using the full pixel count as denominator.
    pub fn classify(
        &self,
        buffer: &PixelBuffer,
        palette: &[ReferenceColor],
    ) -> ClassificationResult {
        let mut counts = vec![0u32; palette.len()];
        let mut analyzed = 0u32;

        for [r, g, b, a] in buffer.pixels() {
            if a < self.opaque_min {
                continue;
            }
            analyzed += 1;
            if let Some(slot) = palette.iter().position(|entry| entry.matches(r, g, b)) {
                counts[slot] += 1;
            }
        }

        let denominator = if analyzed > 0 {
            analyzed
        } else {
            buffer.pixel_count()
        };

        let categories = palette
            .iter()
            .zip(counts)
            .map(|(entry, count)| CategoryCount {
                name: entry.name.to_string(),
                class: entry.class,
                rgb: Some(entry.rgb),
                count,
                percent: percent_string(count, denominator),
            })
            .collect();

        ClassificationResult {
            total_pixels: analyzed,
            categories,
            analysis_type: AnalysisType::Predefined,
            metadata: AnalysisMetadata {
                image_width: buffer.width(),
                image_height: buffer.height(),
                analysis_date: Utc::now(),
                match_percentage: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::SemanticClass;
    use crate::palettes::NDVI_PALETTE;

    fn uniform_buffer(width: u32, height: u32, rgba: [u8; 4]) -> PixelBuffer {
        let data: Vec<u8> = rgba
            .iter()
            .copied()
            .cycle()
            .take((width * height * 4) as usize)
            .collect();
        PixelBuffer::from_raw(width, height, data).unwrap()
    }

    #[test]
    fn test_uniform_dense_vegetation_image() {
        let buffer = uniform_buffer(2, 2, [46, 125, 50, 255]);
        let result = PixelClassifier::new().classify(&buffer, NDVI_PALETTE);

        assert_eq!(result.total_pixels, 4);
        assert_eq!(result.analysis_type, AnalysisType::Predefined);
        assert_eq!(result.categories.len(), NDVI_PALETTE.len());

        let dense = &result.categories[0];
        assert_eq!(dense.name, "Vegetación densa");
        assert_eq!(dense.class, Some(SemanticClass::DenseVegetation));
        assert_eq!(dense.count, 4);
        assert_eq!(dense.percent, "100.0");
    }

    #[test]
    fn test_first_matching_band_wins() {
        let palette = [
            ReferenceColor {
                name: "ancha",
                rgb: [100, 100, 100],
                tolerance: 50,
                class: None,
            },
            ReferenceColor {
                name: "exacta",
                rgb: [120, 120, 120],
                tolerance: 5,
                class: None,
            },
        ];
        // (120,120,120) sits inside both bands; the earlier one takes it
        let buffer = uniform_buffer(1, 1, [120, 120, 120, 255]);
        let result = PixelClassifier::new().classify(&buffer, &palette);

        assert_eq!(result.categories[0].count, 1);
        assert_eq!(result.categories[1].count, 0);
    }

    #[test]
    fn test_transparent_pixels_are_excluded() {
        let mut data = Vec::new();
        data.extend_from_slice(&[46, 125, 50, 255]); // opaque, matches
        data.extend_from_slice(&[46, 125, 50, 127]); // below cutoff
        data.extend_from_slice(&[46, 125, 50, 128]); // exactly at cutoff, counts
        data.extend_from_slice(&[46, 125, 50, 0]); // fully transparent
        let buffer = PixelBuffer::from_raw(4, 1, data).unwrap();

        let result = PixelClassifier::new().classify(&buffer, NDVI_PALETTE);
        assert_eq!(result.total_pixels, 2);
        assert_eq!(result.categories[0].count, 2);
        assert_eq!(result.categories[0].percent, "100.0");
    }

    #[test]
    fn test_all_transparent_image_keeps_percentages_defined() {
        let buffer = uniform_buffer(3, 3, [46, 125, 50, 0]);
        let result = PixelClassifier::new().classify(&buffer, NDVI_PALETTE);

        assert_eq!(result.total_pixels, 0);
        for category in &result.categories {
            assert_eq!(category.count, 0);
            assert_eq!(category.percent, "0.0");
        }
    }

    #[test]
    fn test_unmatched_pixels_lower_every_share() {
        let mut data = Vec::new();
        data.extend_from_slice(&[46, 125, 50, 255]); // dense vegetation
        data.extend_from_slice(&[0, 0, 255, 255]); // off-palette blue
        let buffer = PixelBuffer::from_raw(2, 1, data).unwrap();

        let result = PixelClassifier::new().classify(&buffer, NDVI_PALETTE);
        assert_eq!(result.total_pixels, 2);
        assert_eq!(result.classified_pixels(), 1);
        assert_eq!(result.categories[0].percent, "50.0");
    }

    #[test]
    fn test_metadata_carries_dimensions() {
        let buffer = uniform_buffer(5, 3, [46, 125, 50, 255]);
        let result = PixelClassifier::new().classify(&buffer, NDVI_PALETTE);
        assert_eq!(result.metadata.image_width, 5);
        assert_eq!(result.metadata.image_height, 3);
        assert_eq!(result.metadata.match_percentage, None);
    }
}
