//! Adaptive color clustering for images the reference palettes cannot read
//!
//! Index providers occasionally render with custom color ramps that miss
//! every tolerance band. When that happens the analysis degrades to
//! frequency clustering: opaque pixels are quantized into fixed-width RGB
//! buckets, buckets are ranked by population, and the survivors are named
//! from an index-specific vocabulary so the breakdown still reads
//! agronomically.
//!
//! Algorithm tag: `algo-quantized-frequency-clustering`

use std::collections::{HashMap, HashSet};

use crate::buffer::PixelBuffer;
use crate::classify::{percent_string, CategoryCount, SemanticClass};
use crate::config::ClusterConfig;
use crate::constants::alpha;
use crate::index::IndexKind;

/// Channel share above which a single channel drives the label
const DOMINANT_RATIO: f32 = 0.40;

/// Red and green share above which a cluster reads as warm/yellow
const WARM_RATIO: f32 = 0.33;

/// Blue share ceiling for the yellow bracket
const YELLOW_BLUE_CEILING: f32 = 0.25;

/// Maximum red/green imbalance for yellow; above it the color is orange
const WARM_BALANCE: f32 = 0.12;

/// Brightness below which a cluster reads as shadow or deep water
const DARK_BRIGHTNESS: f32 = 60.0;

/// Brightness above which a cluster reads as glare or cloud
const GLARE_BRIGHTNESS: f32 = 215.0;

/// Brightness split between dense and moderate vegetation
const DENSE_BRIGHTNESS_CEILING: f32 = 110.0;

/// Brightness split between moderate and light vegetation
const MODERATE_BRIGHTNESS_CEILING: f32 = 170.0;

/// Frequency-ranked color clusterer with index-aware labeling
pub struct ColorClusterer {
    config: ClusterConfig,
    opaque_min: u8,
}

/// Population and channel sums of one quantized bucket
#[derive(Default)]
struct Bucket {
    count: u32,
    r_sum: u64,
    g_sum: u64,
    b_sum: u64,
}

impl Bucket {
    fn mean_rgb(&self) -> [u8; 3] {
        let n = u64::from(self.count.max(1));
        [
            (self.r_sum / n) as u8,
            (self.g_sum / n) as u8,
            (self.b_sum / n) as u8,
        ]
    }
}

impl Default for ColorClusterer {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorClusterer {
    /// Create a clusterer with the default parameters
    pub fn new() -> Self {
        Self::with_config(ClusterConfig::default())
    }

    /// Create a clusterer with custom parameters
    pub fn with_config(config: ClusterConfig) -> Self {
        Self {
            config,
            opaque_min: alpha::OPAQUE_MIN,
        }
    }

    /// Cluster the opaque pixels of `buffer` and label the survivors with
    /// the vocabulary of `index`
    ///
    /// Clusters come back in descending population order, quantized key as
    /// tie-break, so equal inputs always produce equal output. Buckets
    /// below the minimum share are dropped before the cluster cap applies.
    /// An image with no opaque pixels yields no clusters.
    pub fn cluster(&self, buffer: &PixelBuffer, index: IndexKind) -> Vec<CategoryCount> {
        let width = self.config.bucket_width.max(1);
        let mut buckets: HashMap<(u8, u8, u8), Bucket> = HashMap::new();
        let mut analyzed = 0u32;

        for [r, g, b, a] in buffer.pixels() {
            if a < self.opaque_min {
                continue;
            }
            analyzed += 1;
            let bucket = buckets.entry((r / width, g / width, b / width)).or_default();
            bucket.count += 1;
            bucket.r_sum += u64::from(r);
            bucket.g_sum += u64::from(g);
            bucket.b_sum += u64::from(b);
        }

        if analyzed == 0 {
            return Vec::new();
        }

        let mut ranked: Vec<((u8, u8, u8), Bucket)> = buckets.into_iter().collect();
        ranked.sort_by(|a, b| b.1.count.cmp(&a.1.count).then(a.0.cmp(&b.0)));

        let mut labeler = LabelAssigner::new(index);
        ranked
            .into_iter()
            .filter(|(_, bucket)| share_of(bucket.count, analyzed) >= self.config.min_share_percent)
            .take(self.config.max_clusters)
            .map(|(_, bucket)| {
                let rgb = bucket.mean_rgb();
                let (name, class) = labeler.label(rgb);
                CategoryCount {
                    name,
                    class,
                    rgb: Some(rgb),
                    count: bucket.count,
                    percent: percent_string(bucket.count, analyzed),
                }
            })
            .collect()
    }
}

fn share_of(count: u32, total: u32) -> f64 {
    f64::from(count) / f64::from(total) * 100.0
}

/// Brightness and channel balance of a cluster's representative color
#[derive(Debug, Clone, Copy)]
struct ClusterShape {
    brightness: f32,
    red_ratio: f32,
    green_ratio: f32,
    blue_ratio: f32,
}

impl ClusterShape {
    fn from_rgb(rgb: [u8; 3]) -> Self {
        let r = f32::from(rgb[0]);
        let g = f32::from(rgb[1]);
        let b = f32::from(rgb[2]);
        let sum = r + g + b;
        if sum <= f32::EPSILON {
            return Self {
                brightness: 0.0,
                red_ratio: 1.0 / 3.0,
                green_ratio: 1.0 / 3.0,
                blue_ratio: 1.0 / 3.0,
            };
        }
        Self {
            brightness: sum / 3.0,
            red_ratio: r / sum,
            green_ratio: g / sum,
            blue_ratio: b / sum,
        }
    }

    fn green_leads(&self) -> bool {
        self.green_ratio > DOMINANT_RATIO && self.green_ratio >= self.red_ratio
    }

    fn red_leads(&self) -> bool {
        self.red_ratio > DOMINANT_RATIO
    }

    fn blue_leads(&self) -> bool {
        self.blue_ratio > DOMINANT_RATIO
    }

    /// Yellow needs red and green close to each other; orange fails the
    /// balance check and falls through to the red brackets
    fn dry_yellow(&self) -> bool {
        self.red_ratio > WARM_RATIO
            && self.green_ratio > WARM_RATIO
            && self.blue_ratio < YELLOW_BLUE_CEILING
            && (self.red_ratio - self.green_ratio).abs() < WARM_BALANCE
    }

    fn dark(&self) -> bool {
        self.brightness < DARK_BRIGHTNESS
    }

    fn glare(&self) -> bool {
        self.brightness > GLARE_BRIGHTNESS
    }
}

/// Candidate names for one bracket, preferred first
type Vocabulary = (&'static [&'static str], Option<SemanticClass>);

fn vocabulary_for(index: IndexKind, shape: ClusterShape) -> Vocabulary {
    match index {
        IndexKind::Ndvi => ndvi_vocabulary(shape),
        IndexKind::Ndmi => ndmi_vocabulary(shape),
        IndexKind::Savi => savi_vocabulary(shape),
    }
}

fn ndvi_vocabulary(shape: ClusterShape) -> Vocabulary {
    if shape.green_leads() && shape.brightness < DENSE_BRIGHTNESS_CEILING {
        (
            &["Vegetación densa", "Vegetación muy densa", "Masa vegetal cerrada"],
            Some(SemanticClass::DenseVegetation),
        )
    } else if shape.green_leads() && shape.brightness < MODERATE_BRIGHTNESS_CEILING {
        (
            &["Vegetación moderada", "Vegetación en desarrollo", "Cubierta verde media"],
            Some(SemanticClass::ModerateVegetation),
        )
    } else if shape.green_leads() {
        (
            &["Vegetación clara", "Brotes dispersos", "Cubierta verde pálida"],
            Some(SemanticClass::SparseVegetation),
        )
    } else if shape.dry_yellow() {
        (
            &["Vegetación escasa", "Pasto seco", "Cubierta amarillenta"],
            Some(SemanticClass::SparseVegetation),
        )
    } else if shape.red_leads() {
        (
            &["Suelo desnudo", "Superficie sin cubierta", "Zona erosionada"],
            Some(SemanticClass::BareSoil),
        )
    } else if shape.blue_leads() {
        (&["Agua o encharcamiento", "Lámina de agua"], None)
    } else if shape.dark() {
        (&["Agua o sombra", "Zona oscura"], None)
    } else if shape.glare() {
        (&["Reflejo o nube", "Zona sobreexpuesta"], None)
    } else {
        (&["Cobertura mixta", "Superficie heterogénea", "Zona de transición"], None)
    }
}

fn ndmi_vocabulary(shape: ClusterShape) -> Vocabulary {
    if shape.blue_leads() && shape.brightness < DENSE_BRIGHTNESS_CEILING {
        (&["Humedad muy alta", "Saturación hídrica"], None)
    } else if shape.blue_leads() {
        (&["Humedad alta", "Superficie húmeda"], None)
    } else if shape.dry_yellow() {
        (
            &["Humedad baja", "Cubierta deshidratada"],
            Some(SemanticClass::WaterStress),
        )
    } else if shape.red_leads() {
        (
            &["Estrés hídrico", "Déficit hídrico severo"],
            Some(SemanticClass::WaterStress),
        )
    } else if shape.green_leads() {
        (&["Vegetación hidratada", "Cubierta turgente"], None)
    } else if shape.dark() {
        (&["Agua profunda o sombra", "Zona oscura"], None)
    } else if shape.glare() {
        (&["Reflejo o nube", "Zona sobreexpuesta"], None)
    } else {
        (&["Humedad intermedia", "Zona de transición"], None)
    }
}

fn savi_vocabulary(shape: ClusterShape) -> Vocabulary {
    if shape.green_leads() && shape.brightness < DENSE_BRIGHTNESS_CEILING {
        (
            &["Cultivo vigoroso", "Cubierta consolidada"],
            Some(SemanticClass::DenseVegetation),
        )
    } else if shape.green_leads() && shape.brightness < MODERATE_BRIGHTNESS_CEILING {
        (
            &["Cultivo en desarrollo", "Cubierta en expansión"],
            Some(SemanticClass::ModerateVegetation),
        )
    } else if shape.green_leads() {
        (
            &["Cultivo emergente", "Brotes incipientes"],
            Some(SemanticClass::SparseVegetation),
        )
    } else if shape.dry_yellow() {
        (
            &["Cubierta rala", "Rastrojo claro"],
            Some(SemanticClass::SparseVegetation),
        )
    } else if shape.red_leads() && shape.brightness < 130.0 {
        (
            &["Suelo arcilloso expuesto", "Suelo rojizo"],
            Some(SemanticClass::BareSoil),
        )
    } else if shape.red_leads() {
        (
            &["Suelo desnudo", "Superficie expuesta"],
            Some(SemanticClass::BareSoil),
        )
    } else if shape.glare() {
        (
            &["Suelo muy reflectante", "Superficie encalada"],
            Some(SemanticClass::BareSoil),
        )
    } else if shape.dark() {
        (&["Suelo húmedo oscuro", "Sombra sobre suelo"], None)
    } else if shape.blue_leads() {
        (&["Agua o encharcamiento", "Zona anegada"], None)
    } else {
        (&["Mosaico suelo-cultivo", "Cobertura parcial"], None)
    }
}

/// Assigns unique display names to ranked clusters
struct LabelAssigner {
    index: IndexKind,
    used: HashSet<String>,
}

impl LabelAssigner {
    fn new(index: IndexKind) -> Self {
        Self {
            index,
            used: HashSet::new(),
        }
    }

    /// Name one cluster from its representative color
    ///
    /// Takes the first unused candidate of the matching bracket; when the
    /// vocabulary runs dry, numbers the preferred name until it no longer
    /// collides.
    fn label(&mut self, rgb: [u8; 3]) -> (String, Option<SemanticClass>) {
        let shape = ClusterShape::from_rgb(rgb);
        let (candidates, class) = vocabulary_for(self.index, shape);
        (self.claim(candidates), class)
    }

    fn claim(&mut self, candidates: &'static [&'static str]) -> String {
        for candidate in candidates {
            if !self.used.contains(*candidate) {
                self.used.insert(candidate.to_string());
                return candidate.to_string();
            }
        }

        let base = candidates.first().copied().unwrap_or("Grupo de color");
        let mut n = 2;
        loop {
            let name = format!("{} {}", base, n);
            if !self.used.contains(&name) {
                self.used.insert(name.clone());
                return name;
            }
            n += 1;
        }
    }
}
