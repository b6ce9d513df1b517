//! Configuration structures for the analysis pipeline.
//!
//! This module defines the tunable parameters for classification and the
//! dynamic clustering fallback. Compile-time defaults live in
//! [`crate::constants`]; this layer exists so batch runs can pin their
//! parameters in a JSON file and stay reproducible.
//!
//! # Configuration Loading
//!
//! Configuration can be loaded from JSON files or constructed programmatically:
//!
//! ```no_run
//! use cropscan::AnalyzerConfig;
//! use std::path::Path;
//!
//! // Load from file
//! let config = AnalyzerConfig::from_json_file(Path::new("config.json"))?;
//!
//! // Or use defaults
//! let config = AnalyzerConfig::default();
//! # Ok::<(), cropscan::AnalysisError>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::{cluster, fallback};
use crate::error::{AnalysisError, Result};

/// Complete analyzer configuration.
///
/// Can be serialized to/from JSON for reproducible batch runs. Missing
/// fields fall back to the built-in defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Minimum percentage of analyzed pixels the reference palette must
    /// explain before the dynamic clustering fallback takes over
    pub fallback_match_threshold: f64,

    /// Dynamic clustering parameters
    pub cluster: ClusterConfig,
}

/// Dynamic clustering parameters.
///
/// Controls how off-palette renderings are grouped into color clusters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    /// Quantization bucket width applied to each RGB channel
    pub bucket_width: u8,

    /// Maximum number of clusters reported
    pub max_clusters: usize,

    /// Minimum percentage of analyzed pixels a cluster needs to survive
    pub min_share_percent: f64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            fallback_match_threshold: fallback::MATCH_THRESHOLD_PERCENT,
            cluster: ClusterConfig::default(),
        }
    }
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            bucket_width: cluster::BUCKET_WIDTH,
            max_clusters: cluster::MAX_CLUSTERS,
            min_share_percent: cluster::MIN_SHARE_PERCENT,
        }
    }
}

impl AnalyzerConfig {
    /// Load configuration from JSON file
    pub fn from_json_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AnalysisError::config(format!("failed to read {}", path.display()), e)
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            AnalysisError::config(format!("failed to parse {}", path.display()), e)
        })?;
        Ok(config)
    }

    /// Save configuration to JSON file
    pub fn to_json_file(&self, path: &std::path::Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            AnalysisError::config("failed to serialize configuration", e)
        })?;
        std::fs::write(path, json).map_err(|e| {
            AnalysisError::config(format!("failed to write {}", path.display()), e)
        })?;
        Ok(())
    }
}
