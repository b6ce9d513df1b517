//! Supported satellite indices and their descriptive metadata

use std::fmt;

use serde::{Deserialize, Serialize};

/// Satellite index whose false-color rendering is being analyzed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexKind {
    /// Normalized Difference Vegetation Index
    Ndvi,
    /// Normalized Difference Moisture Index
    Ndmi,
    /// Soil-Adjusted Vegetation Index
    Savi,
}

impl IndexKind {
    /// All supported indices, in display order
    pub const ALL: [IndexKind; 3] = [IndexKind::Ndvi, IndexKind::Ndmi, IndexKind::Savi];

    /// Resolve an index from its short code ("ndvi", "NDMI", ...)
    ///
    /// Returns `None` for unrecognized codes; callers decide whether that
    /// is an error or a degraded-output situation.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "ndvi" => Some(Self::Ndvi),
            "ndmi" => Some(Self::Ndmi),
            "savi" => Some(Self::Savi),
            _ => None,
        }
    }

    /// Short lowercase code for the index
    pub fn code(&self) -> &'static str {
        match self {
            Self::Ndvi => "ndvi",
            Self::Ndmi => "ndmi",
            Self::Savi => "savi",
        }
    }

    /// Descriptive metadata shown alongside a diagnosis
    pub fn info(&self) -> IndexInfo {
        match self {
            Self::Ndvi => IndexInfo {
                code: "ndvi".to_string(),
                name: "Índice de Vegetación de Diferencia Normalizada (NDVI)".to_string(),
                description: "Mide el vigor y la densidad de la vegetación a partir de la \
                              reflectancia en rojo e infrarrojo cercano."
                    .to_string(),
                typical_range: "-1.0 a 1.0".to_string(),
            },
            Self::Ndmi => IndexInfo {
                code: "ndmi".to_string(),
                name: "Índice de Humedad de Diferencia Normalizada (NDMI)".to_string(),
                description: "Estima el contenido de agua de la vegetación y la disponibilidad \
                              hídrica del cultivo."
                    .to_string(),
                typical_range: "-1.0 a 1.0".to_string(),
            },
            Self::Savi => IndexInfo {
                code: "savi".to_string(),
                name: "Índice de Vegetación Ajustado al Suelo (SAVI)".to_string(),
                description: "Corrige el efecto del brillo del suelo expuesto; indicado para \
                              cultivos con cobertura parcial o en fase temprana."
                    .to_string(),
                typical_range: "-1.5 a 1.5".to_string(),
            },
        }
    }
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Human-readable description of an index, included in diagnoses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexInfo {
    /// Short code ("ndvi", "ndmi", "savi")
    pub code: String,
    /// Full name of the index
    pub name: String,
    /// What the index measures
    pub description: String,
    /// Numeric range of the underlying index values
    pub typical_range: String,
}
