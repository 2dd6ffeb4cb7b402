// SPDX-License-Identifier: MPL-2.0
use criterion::{criterion_group, criterion_main, Criterion};
use iced_collage::collage::raster::rasterize;
use iced_collage::collage::{Adjustment, Collage, SourceImage};
use iced_collage::domain::collage::{CollageLayout, ExportQuality, FrameSpec, SpacingSpec};
use iced_collage::media::{export, DecodedImage, ExportFormat};
use std::hint::black_box;

/// 3x4 collage at Instagram width with every cell filled by a 1200x800 photo.
fn full_collage() -> Collage {
    let mut collage = Collage::new(
        CollageLayout::ThreeByFour,
        FrameSpec::new(1080.0, 0.75).expect("valid frame"),
        SpacingSpec::new(10.0, 20.0),
    );

    let (width, height) = (1200u32, 800u32);
    let pixels: Vec<u8> = (0..width * height)
        .flat_map(|i| {
            let v = (i % 251) as u8;
            [v, 255 - v, v / 2, 255]
        })
        .collect();
    let photo = DecodedImage::from_rgba(width, height, pixels).expect("valid image");

    for index in 0..12 {
        let id = collage.add_image(SourceImage::new(format!("photo-{index}")));
        collage.apply_decoded(id, Ok(photo.clone()));
        collage.set_adjustment(id, Adjustment::new(index as f32 * 8.0 - 40.0, 0.0, 1.5));
    }
    collage
}

fn collage_render_benchmark(c: &mut Criterion) {
    let collage = full_collage();
    let mut group = c.benchmark_group("collage_render");

    group.bench_function("rasterize_3x4", |b| {
        b.iter(|| black_box(rasterize(black_box(&collage), None).expect("raster")));
    });

    group.bench_function("rasterize_3x4_with_hover", |b| {
        b.iter(|| black_box(rasterize(black_box(&collage), Some(5)).expect("raster")));
    });

    let (pixmap, _) = rasterize(&collage, None).expect("raster");
    group.bench_function("encode_jpeg_q90", |b| {
        b.iter(|| {
            black_box(
                export::encode(black_box(&pixmap), ExportFormat::Jpeg, ExportQuality::new(90))
                    .expect("encode"),
            )
        });
    });

    group.finish();
}

criterion_group!(benches, collage_render_benchmark);
criterion_main!(benches);
