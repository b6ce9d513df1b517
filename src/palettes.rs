//! Built-in reference palettes for the supported indices
//!
//! Each palette lists the named colors a rendering of that index is
//! expected to use, from the most favorable condition to the least.
//! Declaration order is significant: classification tests entries in
//! order and the first tolerance band containing a pixel wins, so
//! overlapping bands resolve toward the earlier, more favorable reading.

use serde::Serialize;

use crate::classify::SemanticClass;
use crate::index::IndexKind;

/// A named reference color with a per-channel matching tolerance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReferenceColor {
    /// Display name of the category
    pub name: &'static str,
    /// Reference RGB value of the category in the rendered image
    pub rgb: [u8; 3],
    /// Absolute per-channel tolerance; a pixel matches when every channel
    /// differs from the reference by at most this much
    pub tolerance: u8,
    /// Aggregate diagnostic bucket this category feeds, if any
    pub class: Option<SemanticClass>,
}

impl ReferenceColor {
    /// Whether a pixel falls inside this entry's tolerance band
    pub fn matches(&self, r: u8, g: u8, b: u8) -> bool {
        r.abs_diff(self.rgb[0]) <= self.tolerance
            && g.abs_diff(self.rgb[1]) <= self.tolerance
            && b.abs_diff(self.rgb[2]) <= self.tolerance
    }
}

/// NDVI reference palette, healthiest vegetation first
pub const NDVI_PALETTE: &[ReferenceColor] = &[
    ReferenceColor {
        name: "Vegetación densa",
        rgb: [46, 125, 50],
        tolerance: 30,
        class: Some(SemanticClass::DenseVegetation),
    },
    ReferenceColor {
        name: "Vegetación moderada",
        rgb: [104, 159, 56],
        tolerance: 30,
        class: Some(SemanticClass::ModerateVegetation),
    },
    ReferenceColor {
        name: "Vegetación clara",
        rgb: [205, 220, 57],
        tolerance: 28,
        class: Some(SemanticClass::SparseVegetation),
    },
    ReferenceColor {
        name: "Vegetación escasa",
        rgb: [255, 235, 59],
        tolerance: 28,
        class: Some(SemanticClass::SparseVegetation),
    },
    ReferenceColor {
        name: "Suelo desnudo",
        rgb: [255, 152, 0],
        tolerance: 32,
        class: Some(SemanticClass::BareSoil),
    },
    ReferenceColor {
        name: "Suelo árido",
        rgb: [183, 28, 28],
        tolerance: 36,
        class: Some(SemanticClass::BareSoil),
    },
    ReferenceColor {
        name: "Agua o sombra",
        rgb: [38, 50, 56],
        tolerance: 40,
        class: None,
    },
];

/// NDMI reference palette, wettest conditions first
pub const NDMI_PALETTE: &[ReferenceColor] = &[
    ReferenceColor {
        name: "Humedad muy alta",
        rgb: [13, 71, 161],
        tolerance: 34,
        class: None,
    },
    ReferenceColor {
        name: "Humedad alta",
        rgb: [33, 150, 243],
        tolerance: 30,
        class: None,
    },
    ReferenceColor {
        name: "Humedad adecuada",
        rgb: [129, 212, 250],
        tolerance: 28,
        class: None,
    },
    ReferenceColor {
        name: "Humedad baja",
        rgb: [255, 241, 118],
        tolerance: 28,
        class: Some(SemanticClass::WaterStress),
    },
    ReferenceColor {
        name: "Estrés hídrico",
        rgb: [255, 152, 0],
        tolerance: 30,
        class: Some(SemanticClass::WaterStress),
    },
    ReferenceColor {
        name: "Estrés hídrico severo",
        rgb: [183, 28, 28],
        tolerance: 36,
        class: Some(SemanticClass::WaterStress),
    },
];

/// SAVI reference palette, for fields with partial canopy cover
pub const SAVI_PALETTE: &[ReferenceColor] = &[
    ReferenceColor {
        name: "Cultivo vigoroso",
        rgb: [27, 94, 32],
        tolerance: 30,
        class: Some(SemanticClass::DenseVegetation),
    },
    ReferenceColor {
        name: "Cultivo en desarrollo",
        rgb: [124, 179, 66],
        tolerance: 30,
        class: Some(SemanticClass::ModerateVegetation),
    },
    ReferenceColor {
        name: "Cultivo emergente",
        rgb: [212, 225, 87],
        tolerance: 28,
        class: Some(SemanticClass::SparseVegetation),
    },
    ReferenceColor {
        name: "Suelo con rastrojo",
        rgb: [215, 204, 200],
        tolerance: 26,
        class: Some(SemanticClass::BareSoil),
    },
    ReferenceColor {
        name: "Suelo desnudo",
        rgb: [141, 110, 99],
        tolerance: 30,
        class: Some(SemanticClass::BareSoil),
    },
    ReferenceColor {
        name: "Suelo muy expuesto",
        rgb: [93, 64, 55],
        tolerance: 32,
        class: Some(SemanticClass::BareSoil),
    },
];

/// Palette used when an empty reference palette is supplied
pub const DEFAULT_PALETTE: &[ReferenceColor] = NDVI_PALETTE;

/// Built-in palette for an index
pub fn palette_for(index: IndexKind) -> &'static [ReferenceColor] {
    match index {
        IndexKind::Ndvi => NDVI_PALETTE,
        IndexKind::Ndmi => NDMI_PALETTE,
        IndexKind::Savi => SAVI_PALETTE,
    }
}
