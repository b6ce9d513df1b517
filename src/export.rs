//! CSV export of classification tables

use crate::classify::ClassificationResult;
use crate::color::rgb_to_hex;

/// Render a classification as a CSV table
///
/// One row per category, in result order, under the header
/// `categoria,clase,color,pixeles,porcentaje`. The class column holds the
/// semantic bucket identifier and the color column the hex value; both
/// stay empty when the category has none. Names are quoted because the
/// dynamic vocabulary is free-form.
pub fn to_csv(result: &ClassificationResult) -> String {
    let mut out = String::from("categoria,clase,color,pixeles,porcentaje\n");
    for category in &result.categories {
        let class = category.class.map(|c| c.as_str()).unwrap_or("");
        let color = category.rgb.map(rgb_to_hex).unwrap_or_default();
        out.push_str(&format!(
            "\"{}\",{},{},{},{}\n",
            category.name.replace('"', "\"\""),
            class,
            color,
            category.count,
            category.percent,
        ));
    }
    out
}
