//! Analysis constants and agronomic thresholds
//!
//! This module contains compile-time defaults for pixel classification,
//! the dynamic clustering fallback, and the interpretation rules. The
//! tunable subset is mirrored in [`crate::config::AnalyzerConfig`].

/// Alpha-channel handling
pub mod alpha {
    /// Minimum alpha value for a pixel to count as data
    ///
    /// Index renderings use transparency for cloud masks and areas outside
    /// the field boundary; anything below this cutoff is excluded from the
    /// analysis entirely.
    pub const OPAQUE_MIN: u8 = 128;
}

/// Palette-match confidence gate
pub mod fallback {
    /// Minimum percentage of analyzed pixels the reference palette must
    /// explain; below this the dynamic clustering pass takes over
    pub const MATCH_THRESHOLD_PERCENT: f64 = 20.0;
}

/// Dynamic clustering parameters
pub mod cluster {
    /// Quantization bucket width per RGB channel
    pub const BUCKET_WIDTH: u8 = 15;

    /// Maximum number of clusters reported
    pub const MAX_CLUSTERS: usize = 8;

    /// Minimum percentage of analyzed pixels a cluster needs to survive
    pub const MIN_SHARE_PERCENT: f64 = 1.0;
}

/// Interpretation thresholds, as percentages of analyzed pixels
pub mod interpret {
    /// NDVI: dense vegetation above this reads as an excellent crop state
    pub const NDVI_DENSE_EXCELLENT: f64 = 60.0;

    /// NDVI: dense plus moderate vegetation above this reads as a good state
    pub const NDVI_HEALTHY_GOOD: f64 = 70.0;

    /// NDVI: sparse vegetation above this triggers a low-vigor warning
    pub const NDVI_SPARSE_WARNING: f64 = 40.0;

    /// NDVI: bare soil above this is a critical condition
    pub const NDVI_BARE_CRITICAL: f64 = 40.0;

    /// NDMI: water stress above this is a critical condition
    pub const NDMI_STRESS_CRITICAL: f64 = 40.0;

    /// NDMI: water stress above this triggers an early warning
    pub const NDMI_STRESS_WARNING: f64 = 20.0;

    /// NDMI: bare soil above this adds a moisture-loss alert
    pub const NDMI_BARE_ALERT: f64 = 30.0;

    /// SAVI: bare soil above this warns about emergence uniformity
    pub const SAVI_BARE_WARNING: f64 = 50.0;

    /// SAVI: dense plus moderate cover above this reads as well established
    pub const SAVI_ESTABLISHED_GOOD: f64 = 60.0;

    /// SAVI: sparse cover above this warns about slow establishment
    pub const SAVI_SPARSE_WARNING: f64 = 40.0;
}
