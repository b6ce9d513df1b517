//! Classification data model shared by the palette and clustering passes

pub mod classifier;
pub mod clusterer;

pub use classifier::PixelClassifier;
pub use clusterer::ColorClusterer;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Aggregate diagnostic bucket a category contributes to
///
/// Categories carry their bucket explicitly so the interpreter never has
/// to guess from display names, which are free-form for dynamic clusters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticClass {
    DenseVegetation,
    ModerateVegetation,
    SparseVegetation,
    BareSoil,
    WaterStress,
}

impl SemanticClass {
    /// Stable snake_case identifier, matching the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DenseVegetation => "dense_vegetation",
            Self::ModerateVegetation => "moderate_vegetation",
            Self::SparseVegetation => "sparse_vegetation",
            Self::BareSoil => "bare_soil",
            Self::WaterStress => "water_stress",
        }
    }
}

/// How the categories of a result were produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisType {
    /// Reference-palette tolerance matching
    Predefined,
    /// Frequency clustering of quantized colors
    Dynamic,
}

/// One classified category with its pixel share
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCount {
    /// Display name of the category
    pub name: String,
    /// Aggregate bucket the category feeds, if any
    pub class: Option<SemanticClass>,
    /// Representative RGB color of the category
    pub rgb: Option<[u8; 3]>,
    /// Number of analyzed pixels attributed to the category
    pub count: u32,
    /// Share of analyzed pixels as a decimal string with one fractional
    /// digit (e.g. "42.5"), ready for display
    pub percent: String,
}

/// Dimensions and provenance attached to a classification result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    /// Source image width in pixels
    pub image_width: u32,
    /// Source image height in pixels
    pub image_height: u32,
    /// When the analysis ran
    pub analysis_date: DateTime<Utc>,
    /// Percentage of analyzed pixels the reference palette explained,
    /// recorded even when the dynamic fallback produced the categories
    pub match_percentage: Option<f64>,
}

/// Complete classification of one index image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Number of opaque pixels that entered the analysis
    pub total_pixels: u32,
    /// Categories in palette order (predefined) or descending frequency
    /// order (dynamic)
    pub categories: Vec<CategoryCount>,
    /// Which pass produced the categories
    pub analysis_type: AnalysisType,
    /// Image dimensions and analysis provenance
    pub metadata: AnalysisMetadata,
}

impl ClassificationResult {
    /// Sum of pixels attributed to any category
    pub fn classified_pixels(&self) -> u32 {
        self.categories.iter().map(|c| c.count).sum()
    }
}

/// Format `count` as a percentage of `total` with one fractional digit
pub(crate) fn percent_string(count: u32, total: u32) -> String {
    if total == 0 {
        return "0.0".to_string();
    }
    format!("{:.1}", f64::from(count) / f64::from(total) * 100.0)
}
