//! Integration tests for the complete analysis pipeline
//!
//! These tests validate the end-to-end workflow over synthetic images:
//! - Palette classification (counts, percentages, ordering)
//! - Alpha-channel exclusion
//! - The dynamic clustering fallback and its guarantees
//! - Agronomic interpretation of classification results
//! - Source decoding, including data URIs and error handling

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use cropscan::{
    analyze_and_interpret, analyze_image, export, interpret, AlertLevel, AnalysisError,
    AnalysisType, Analyzer, ImageSource, IndexKind, PixelBuffer, ReferenceColor, SemanticClass,
    NDMI_PALETTE, NDVI_PALETTE,
};
use image::{DynamicImage, Rgba, RgbaImage};
use std::io::Cursor;

fn png_bytes(image: &RgbaImage) -> Vec<u8> {
    let mut cursor = Cursor::new(Vec::new());
    image
        .write_to(&mut cursor, image::ImageFormat::Png)
        .expect("in-memory PNG encoding");
    cursor.into_inner()
}

fn buffer_of(image: RgbaImage) -> PixelBuffer {
    PixelBuffer::from_image(&DynamicImage::ImageRgba8(image))
}

/// Image whose pixels are taken row-major from `colors`, cycling
fn patterned_image(width: u32, height: u32, colors: &[[u8; 4]]) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        let i = (y * width + x) as usize % colors.len();
        Rgba(colors[i])
    })
}

// ============================================================================
// Palette Classification
// ============================================================================

#[test]
fn test_uniform_dense_vegetation_field() {
    let image = RgbaImage::from_pixel(2, 2, Rgba([46, 125, 50, 255]));
    let result = Analyzer::new().analyze_buffer(&buffer_of(image), NDVI_PALETTE, IndexKind::Ndvi);

    assert_eq!(result.total_pixels, 4);
    assert_eq!(result.analysis_type, AnalysisType::Predefined);

    let dense = &result.categories[0];
    assert_eq!(dense.name, "Vegetación densa");
    assert_eq!(dense.count, 4);
    assert_eq!(dense.percent, "100.0");
    assert_eq!(dense.class, Some(SemanticClass::DenseVegetation));

    // Every other palette entry is present with a zero count
    assert_eq!(result.categories.len(), NDVI_PALETTE.len());
    assert!(result.categories[1..].iter().all(|c| c.count == 0));
}

#[test]
fn test_transparent_corner_is_excluded() {
    let mut image = RgbaImage::from_pixel(2, 2, Rgba([46, 125, 50, 255]));
    image.put_pixel(1, 1, Rgba([46, 125, 50, 0]));

    let result = Analyzer::new().analyze_buffer(&buffer_of(image), NDVI_PALETTE, IndexKind::Ndvi);

    assert_eq!(result.total_pixels, 3);
    assert_eq!(result.categories[0].count, 3);
    assert_eq!(result.categories[0].percent, "100.0");
    assert_eq!(result.metadata.image_width, 2);
    assert_eq!(result.metadata.image_height, 2);
}

#[test]
fn test_palette_order_settles_overlapping_bands() {
    let wide_then_tight = [
        ReferenceColor {
            name: "banda ancha",
            rgb: [100, 100, 100],
            tolerance: 60,
            class: None,
        },
        ReferenceColor {
            name: "banda exacta",
            rgb: [130, 130, 130],
            tolerance: 5,
            class: None,
        },
    ];
    let tight_then_wide = [wide_then_tight[1], wide_then_tight[0]];

    let image = RgbaImage::from_pixel(1, 1, Rgba([130, 130, 130, 255]));
    let analyzer = Analyzer::new();

    let first = analyzer.analyze_buffer(&buffer_of(image.clone()), &wide_then_tight, IndexKind::Ndvi);
    assert_eq!(first.categories[0].name, "banda ancha");
    assert_eq!(first.categories[0].count, 1);

    let second = analyzer.analyze_buffer(&buffer_of(image), &tight_then_wide, IndexKind::Ndvi);
    assert_eq!(second.categories[0].name, "banda exacta");
    assert_eq!(second.categories[0].count, 1);
}

#[test]
fn test_mixed_field_shares_sum_to_whole() {
    // 50% dense green, 25% orange soil, 25% off-palette blue
    let image = patterned_image(
        8,
        8,
        &[
            [46, 125, 50, 255],
            [46, 125, 50, 255],
            [255, 152, 0, 255],
            [0, 0, 255, 255],
        ],
    );
    let result = Analyzer::new().analyze_buffer(&buffer_of(image), NDVI_PALETTE, IndexKind::Ndvi);

    assert_eq!(result.total_pixels, 64);
    assert_eq!(result.analysis_type, AnalysisType::Predefined);
    assert_eq!(result.classified_pixels(), 48);

    let dense = result
        .categories
        .iter()
        .find(|c| c.name == "Vegetación densa")
        .unwrap();
    let soil = result
        .categories
        .iter()
        .find(|c| c.name == "Suelo desnudo")
        .unwrap();
    assert_eq!(dense.percent, "50.0");
    assert_eq!(soil.percent, "25.0");

    let match_percentage = result.metadata.match_percentage.unwrap();
    assert!((match_percentage - 75.0).abs() < 1e-9);
}

// ============================================================================
// Dynamic Clustering Fallback
// ============================================================================

#[test]
fn test_off_palette_rendering_switches_to_clustering() {
    let image = RgbaImage::from_pixel(10, 10, Rgba([0, 0, 255, 255]));
    let result = Analyzer::new().analyze_buffer(&buffer_of(image), NDVI_PALETTE, IndexKind::Ndvi);

    assert_eq!(result.analysis_type, AnalysisType::Dynamic);
    assert_eq!(result.metadata.match_percentage, Some(0.0));
    assert_eq!(result.categories.len(), 1);
    assert_eq!(result.categories[0].count, 100);
    assert_eq!(result.categories[0].percent, "100.0");
    assert!(result.categories[0].rgb.is_some());
}

#[test]
fn test_dynamic_clusters_cover_dominant_colors() {
    // Four off-palette colors at 25% each
    let image = patterned_image(
        10,
        10,
        &[
            [0, 0, 250, 255],
            [250, 0, 250, 255],
            [0, 250, 250, 255],
            [120, 0, 190, 255],
        ],
    );
    let result = Analyzer::new().analyze_buffer(&buffer_of(image), NDVI_PALETTE, IndexKind::Ndvi);

    assert_eq!(result.analysis_type, AnalysisType::Dynamic);
    assert_eq!(result.categories.len(), 4);

    // Shares add up to the analyzed surface
    let total: u32 = result.categories.iter().map(|c| c.count).sum();
    assert_eq!(total, 100);

    // Labels never collide, even for similar colors
    let mut names: Vec<&str> = result.categories.iter().map(|c| c.name.as_str()).collect();
    names.sort();
    names.dedup();
    assert_eq!(names.len(), 4);
}

#[test]
fn test_dynamic_result_keeps_image_metadata() {
    let image = RgbaImage::from_pixel(6, 4, Rgba([0, 0, 255, 255]));
    let result = Analyzer::new().analyze_buffer(&buffer_of(image), NDVI_PALETTE, IndexKind::Ndvi);

    assert_eq!(result.metadata.image_width, 6);
    assert_eq!(result.metadata.image_height, 4);
    assert_eq!(result.total_pixels, 24);
}

#[test]
fn test_empty_palette_recovers_with_builtin_ndvi() {
    let image = RgbaImage::from_pixel(2, 2, Rgba([46, 125, 50, 255]));
    let result = Analyzer::new().analyze_buffer(&buffer_of(image), &[], IndexKind::Ndvi);

    assert_eq!(result.analysis_type, AnalysisType::Predefined);
    assert_eq!(result.categories.len(), NDVI_PALETTE.len());
    assert_eq!(result.categories[0].name, "Vegetación densa");
    assert_eq!(result.categories[0].percent, "100.0");
}

// ============================================================================
// Agronomic Interpretation
// ============================================================================

#[test]
fn test_healthy_ndvi_field_reads_as_excellent() {
    // 75% dense vegetation, 25% moderate
    let image = patterned_image(
        10,
        10,
        &[
            [46, 125, 50, 255],
            [46, 125, 50, 255],
            [46, 125, 50, 255],
            [104, 159, 56, 255],
        ],
    );
    let result = Analyzer::new().analyze_buffer(&buffer_of(image), NDVI_PALETTE, IndexKind::Ndvi);
    let diagnosis = interpret(&result, IndexKind::Ndvi);

    assert_eq!(diagnosis.alert_level, AlertLevel::Normal);
    assert!(diagnosis.alerts.is_empty());
    assert!(diagnosis.summary.contains("excelente"));
    assert!((diagnosis.statistics.dense_vegetation - 75.0).abs() < 1e-9);
    assert_eq!(diagnosis.index_info.code, "ndvi");
}

#[test]
fn test_ndmi_water_stress_goes_critical() {
    // 45% orange stress, 55% healthy blue: past the 40% critical gate
    let mut colors = Vec::new();
    for i in 0..20 {
        if i < 9 {
            colors.push([255, 152, 0, 255]);
        } else {
            colors.push([33, 150, 243, 255]);
        }
    }
    let image = patterned_image(20, 5, &colors);
    let result = Analyzer::new().analyze_buffer(&buffer_of(image), NDMI_PALETTE, IndexKind::Ndmi);
    let diagnosis = interpret(&result, IndexKind::Ndmi);

    assert_eq!(diagnosis.alert_level, AlertLevel::Critical);
    assert!(!diagnosis.alerts.is_empty());
    assert!((diagnosis.statistics.water_stress - 45.0).abs() < 1e-9);
    assert!(diagnosis
        .recommendations
        .iter()
        .any(|r| r.contains("riego")));
}

#[test]
fn test_interpretation_is_reproducible() {
    let image = patterned_image(
        10,
        10,
        &[[46, 125, 50, 255], [255, 152, 0, 255]],
    );
    let result = Analyzer::new().analyze_buffer(&buffer_of(image), NDVI_PALETTE, IndexKind::Ndvi);

    let first = interpret(&result, IndexKind::Ndvi);
    let second = interpret(&result, IndexKind::Ndvi);
    assert_eq!(first, second);
}

#[test]
fn test_diagnosis_statistics_come_from_counts() {
    // The percent strings round to one decimal; statistics must not
    // inherit that rounding
    let mut colors = vec![[46, 125, 50, 255]; 1];
    colors.extend(vec![[255, 152, 0, 255]; 2]);
    let image = patterned_image(3, 1, &colors);
    let result = Analyzer::new().analyze_buffer(&buffer_of(image), NDVI_PALETTE, IndexKind::Ndvi);

    assert_eq!(result.categories[0].percent, "33.3");
    let diagnosis = interpret(&result, IndexKind::Ndvi);
    assert!((diagnosis.statistics.dense_vegetation - 100.0 / 3.0).abs() < 1e-9);
}

// ============================================================================
// Source Decoding
// ============================================================================

#[tokio::test]
async fn test_analyze_from_encoded_bytes() {
    let image = RgbaImage::from_pixel(4, 4, Rgba([46, 125, 50, 255]));
    let source = ImageSource::Bytes(png_bytes(&image));

    let (result, diagnosis) = analyze_and_interpret(&source, IndexKind::Ndvi).await.unwrap();

    assert_eq!(result.total_pixels, 16);
    assert_eq!(result.categories[0].name, "Vegetación densa");
    assert_eq!(diagnosis.alert_level, AlertLevel::Normal);
}

#[tokio::test]
async fn test_analyze_from_data_uri() {
    let image = RgbaImage::from_pixel(3, 3, Rgba([46, 125, 50, 255]));
    let uri = format!(
        "data:image/png;base64,{}",
        STANDARD.encode(png_bytes(&image))
    );
    let source = ImageSource::from_uri(&uri);
    assert!(matches!(source, ImageSource::DataUri(_)));

    let result = analyze_image(&source, IndexKind::Ndvi).await.unwrap();
    assert_eq!(result.total_pixels, 9);
    assert_eq!(result.categories[0].percent, "100.0");
}

#[tokio::test]
async fn test_corrupt_bytes_fail_with_decode_error() {
    let source = ImageSource::Bytes(b"not an image at all".to_vec());
    let err = analyze_image(&source, IndexKind::Ndvi).await.unwrap_err();

    assert!(matches!(err, AnalysisError::DecodeError { .. }));
    assert!(!err.user_message().is_empty());
}

#[tokio::test]
async fn test_missing_file_fails_with_decode_error() {
    let source = ImageSource::from_uri("/tmp/cropscan-no-such-file.png");
    let err = analyze_image(&source, IndexKind::Ndvi).await.unwrap_err();
    assert!(matches!(err, AnalysisError::DecodeError { .. }));
}

// ============================================================================
// Export
// ============================================================================

#[test]
fn test_csv_export_of_a_classification() {
    let image = RgbaImage::from_pixel(2, 2, Rgba([46, 125, 50, 255]));
    let result = Analyzer::new().analyze_buffer(&buffer_of(image), NDVI_PALETTE, IndexKind::Ndvi);
    let csv = export::to_csv(&result);

    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("categoria,clase,color,pixeles,porcentaje")
    );
    assert_eq!(
        lines.next(),
        Some("\"Vegetación densa\",dense_vegetation,#2E7D32,4,100.0")
    );
    assert_eq!(csv.lines().count(), NDVI_PALETTE.len() + 1);
}
