//! Agronomic interpretation of classification results
//!
//! Aggregates category shares into five semantic buckets and applies
//! fixed per-index thresholds to produce a diagnosis: a summary line, an
//! alert level, the conditions that need attention, and de-duplicated
//! recommended actions. Interpretation is pure; the same result and index
//! always produce the same diagnosis.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::classify::{ClassificationResult, SemanticClass};
use crate::constants::interpret as thresholds;
use crate::index::{IndexInfo, IndexKind};

/// Overall severity of a diagnosis
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Normal,
    Warning,
    Critical,
}

impl AlertLevel {
    /// Stable lowercase identifier, matching the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cumulative percentage of analyzed pixels per aggregate bucket
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SemanticBreakdown {
    pub dense_vegetation: f64,
    pub moderate_vegetation: f64,
    pub sparse_vegetation: f64,
    pub bare_soil: f64,
    pub water_stress: f64,
}

impl SemanticBreakdown {
    /// Dense and moderate vegetation combined
    pub fn healthy_vegetation(&self) -> f64 {
        self.dense_vegetation + self.moderate_vegetation
    }

    fn add(&mut self, class: SemanticClass, percent: f64) {
        match class {
            SemanticClass::DenseVegetation => self.dense_vegetation += percent,
            SemanticClass::ModerateVegetation => self.moderate_vegetation += percent,
            SemanticClass::SparseVegetation => self.sparse_vegetation += percent,
            SemanticClass::BareSoil => self.bare_soil += percent,
            SemanticClass::WaterStress => self.water_stress += percent,
        }
    }
}

/// Structured agronomic reading of one classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnosis {
    /// One-line overall reading of the field
    pub summary: String,
    /// Severity of the most serious finding
    pub alert_level: AlertLevel,
    /// Conditions that need attention, most severe first
    pub alerts: Vec<String>,
    /// Suggested actions, de-duplicated, first occurrence order
    pub recommendations: Vec<String>,
    /// Aggregated shares per semantic bucket
    pub statistics: SemanticBreakdown,
    /// Descriptive metadata of the interpreted index
    pub index_info: IndexInfo,
}

/// Interpret a classification under the rules of `index`
pub fn interpret(result: &ClassificationResult, index: IndexKind) -> Diagnosis {
    let statistics = aggregate(result);
    let mut report = RuleReport::new();

    match index {
        IndexKind::Ndvi => ndvi_rules(&statistics, &mut report),
        IndexKind::Ndmi => ndmi_rules(&statistics, &mut report),
        IndexKind::Savi => savi_rules(&statistics, &mut report),
    }

    Diagnosis {
        summary: report.summary,
        alert_level: report.level,
        alerts: report.alerts,
        recommendations: dedup_preserving_order(report.recommendations),
        statistics,
        index_info: index.info(),
    }
}

/// Interpret with a caller-supplied index code
///
/// Unknown codes degrade to a neutral diagnosis instead of failing, so a
/// rendering caller always has something to display.
pub fn interpret_named(result: &ClassificationResult, index_code: &str) -> Diagnosis {
    match IndexKind::from_code(index_code) {
        Some(index) => interpret(result, index),
        None => Diagnosis {
            summary: "Índice no reconocido".to_string(),
            alert_level: AlertLevel::Normal,
            alerts: Vec::new(),
            recommendations: Vec::new(),
            statistics: aggregate(result),
            index_info: IndexInfo {
                code: index_code.trim().to_ascii_lowercase(),
                name: "Índice desconocido".to_string(),
                description: String::new(),
                typical_range: String::new(),
            },
        },
    }
}

/// Sum category shares into the five aggregate buckets
///
/// Shares are recomputed from pixel counts, never parsed back out of the
/// display strings. Untagged categories stay out of every bucket.
fn aggregate(result: &ClassificationResult) -> SemanticBreakdown {
    let mut stats = SemanticBreakdown::default();
    if result.total_pixels == 0 {
        return stats;
    }
    for category in &result.categories {
        if let Some(class) = category.class {
            let share =
                f64::from(category.count) / f64::from(result.total_pixels) * 100.0;
            stats.add(class, share);
        }
    }
    stats
}

/// Working state while the per-index rules fire
struct RuleReport {
    summary: String,
    level: AlertLevel,
    alerts: Vec<String>,
    recommendations: Vec<String>,
}

impl RuleReport {
    fn new() -> Self {
        Self {
            summary: String::new(),
            level: AlertLevel::Normal,
            alerts: Vec::new(),
            recommendations: Vec::new(),
        }
    }

    /// Record a finding; severity only ever escalates
    fn alert(&mut self, level: AlertLevel, message: &str) {
        if level > self.level {
            self.level = level;
        }
        self.alerts.push(message.to_string());
    }

    fn recommend(&mut self, action: &str) {
        self.recommendations.push(action.to_string());
    }
}

fn ndvi_rules(stats: &SemanticBreakdown, report: &mut RuleReport) {
    if stats.bare_soil > thresholds::NDVI_BARE_CRITICAL {
        report.alert(
            AlertLevel::Critical,
            "Una parte significativa de la parcela no tiene cubierta vegetal",
        );
        report.recommend("Evaluar resiembra en las zonas sin cubierta");
        report.recommend("Revisar la preparación del terreno y la dosis de siembra");
    }
    if stats.sparse_vegetation > thresholds::NDVI_SPARSE_WARNING {
        report.alert(
            AlertLevel::Warning,
            "El vigor vegetativo es bajo en una fracción amplia del cultivo",
        );
        report.recommend("Programar una inspección de campo en las zonas de menor vigor");
        report.recommend("Valorar un aporte de fertilización nitrogenada");
    }

    report.summary = if stats.dense_vegetation > thresholds::NDVI_DENSE_EXCELLENT {
        report.recommend("Mantener el plan de manejo actual");
        "Cultivo en excelente estado: la vegetación densa domina la parcela".to_string()
    } else if stats.healthy_vegetation() > thresholds::NDVI_HEALTHY_GOOD {
        report.recommend("Mantener el plan de manejo actual");
        "Cultivo en buen estado: la mayor parte de la parcela presenta vegetación sana"
            .to_string()
    } else if report.level == AlertLevel::Critical {
        "Estado crítico: predomina el suelo sin cubierta vegetal".to_string()
    } else if report.level == AlertLevel::Warning {
        "Desarrollo vegetativo débil en zonas amplias de la parcela".to_string()
    } else {
        "Desarrollo vegetativo dentro de lo esperado".to_string()
    };
}

fn ndmi_rules(stats: &SemanticBreakdown, report: &mut RuleReport) {
    if stats.water_stress > thresholds::NDMI_STRESS_CRITICAL {
        report.alert(
            AlertLevel::Critical,
            "Estrés hídrico severo en una fracción amplia de la parcela",
        );
        report.recommend("Aumentar la dotación de riego de forma inmediata");
        report.recommend("Revisar el estado de la red de riego en las zonas afectadas");
    } else if stats.water_stress > thresholds::NDMI_STRESS_WARNING {
        report.alert(
            AlertLevel::Warning,
            "Señales de déficit hídrico incipiente",
        );
        report.recommend("Adelantar el próximo riego programado");
        report.recommend("Vigilar la evolución de la humedad en los próximos días");
    }
    if stats.bare_soil > thresholds::NDMI_BARE_ALERT {
        report.alert(
            AlertLevel::Warning,
            "Superficie amplia sin cubierta que acelera la pérdida de humedad",
        );
        report.recommend("Considerar cubiertas o acolchado para conservar la humedad del suelo");
    }

    report.summary = match report.level {
        AlertLevel::Critical => "Déficit hídrico crítico: el cultivo necesita riego urgente",
        AlertLevel::Warning => "Humedad por debajo de lo deseable en parte de la parcela",
        AlertLevel::Normal => "Reserva hídrica adecuada en el conjunto de la parcela",
    }
    .to_string();
}

fn savi_rules(stats: &SemanticBreakdown, report: &mut RuleReport) {
    if stats.bare_soil > thresholds::SAVI_BARE_WARNING {
        report.alert(
            AlertLevel::Warning,
            "La emergencia del cultivo es irregular: domina el suelo expuesto",
        );
        report.recommend("Revisar la uniformidad de la siembra y la profundidad de semilla");
        report.recommend("Comprobar la germinación en las zonas con más suelo visible");
    }
    if stats.sparse_vegetation > thresholds::SAVI_SPARSE_WARNING {
        report.alert(
            AlertLevel::Warning,
            "El establecimiento del cultivo avanza despacio",
        );
        report.recommend("Comprobar la germinación en las zonas con más suelo visible");
    }

    report.summary = if stats.healthy_vegetation() > thresholds::SAVI_ESTABLISHED_GOOD {
        "Buen establecimiento del cultivo sobre el suelo visible".to_string()
    } else if report.level >= AlertLevel::Warning {
        "Cobertura del cultivo irregular para la fase de desarrollo".to_string()
    } else {
        "Cobertura del cultivo acorde a una fase temprana de desarrollo".to_string()
    };
}

/// Drop repeated recommendations, keeping first occurrences in order
fn dedup_preserving_order(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items.into_iter().filter(|item| seen.insert(item.clone())).collect()
}
