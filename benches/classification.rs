use criterion::{black_box, criterion_group, criterion_main, Criterion};
use cropscan::{ColorClusterer, IndexKind, PixelBuffer, PixelClassifier, NDVI_PALETTE};

/// Deterministic mix of palette colors and one off-palette ramp
fn synthetic_field(width: u32, height: u32) -> PixelBuffer {
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            let rgba: [u8; 4] = match (x + y * width) % 4 {
                0 => [46, 125, 50, 255],
                1 => [104, 159, 56, 255],
                2 => [255, 152, 0, 255],
                _ => [17, 34, 204, 255],
            };
            data.extend_from_slice(&rgba);
        }
    }
    PixelBuffer::from_raw(width, height, data).expect("valid synthetic buffer")
}

fn benchmark_classification(c: &mut Criterion) {
    let buffer = synthetic_field(256, 256);

    let classifier = PixelClassifier::new();
    c.bench_function("classify_256x256", |b| {
        b.iter(|| classifier.classify(black_box(&buffer), black_box(NDVI_PALETTE)))
    });

    let clusterer = ColorClusterer::new();
    c.bench_function("cluster_256x256", |b| {
        b.iter(|| clusterer.cluster(black_box(&buffer), black_box(IndexKind::Ndvi)))
    });
}

criterion_group!(benches, benchmark_classification);
criterion_main!(benches);
