use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use coffee_ring::center::{locate_center, CenterStrategy, ColorThresholdParams};
use coffee_ring::core::{PixelPoint, RgbImage};
use coffee_ring::profile::{sample_rgb, ProfileCache};

fn ring_image(size: usize) -> RgbImage {
    let c = (size / 2) as i64;
    let (inner, outer) = (size as i64 / 5, size as i64 / 4);
    let mut img = RgbImage::filled(size, size, [240, 240, 240]);
    for y in 0..size {
        for x in 0..size {
            let d2 = (x as i64 - c).pow(2) + (y as i64 - c).pow(2);
            if d2 <= inner * inner {
                img.put_pixel(x, y, [180, 160, 140]);
            } else if d2 <= outer * outer {
                img.put_pixel(x, y, [60, 40, 20]);
            }
        }
    }
    img
}

fn bench_sample_rgb(c: &mut Criterion) {
    let mut group = c.benchmark_group("sample_rgb");
    for size in [256usize, 1024] {
        let img = ring_image(size);
        let center = PixelPoint::new((size / 2) as i32, (size / 2) as i32);
        let radius = (size / 3) as u32;
        group.bench_with_input(BenchmarkId::from_parameter(size), &img, |b, img| {
            b.iter(|| sample_rgb(black_box(&img.view()), center, radius))
        });
    }
    group.finish();
}

fn bench_cached(c: &mut Criterion) {
    let img = ring_image(1024);
    let center = PixelPoint::new(512, 512);
    let mut cache = ProfileCache::new();
    cache.get_or_sample(&img.view(), center, 340);
    c.bench_function("sample_rgb_cached_1024", |b| {
        b.iter(|| cache.get_or_sample(black_box(&img.view()), center, 340))
    });
}

fn bench_locate_center(c: &mut Criterion) {
    let img = ring_image(1024);
    let params = ColorThresholdParams {
        seed: Some(PixelPoint::new(512, 512 - 230)),
        tolerance: 10,
    };
    c.bench_function("locate_center_mask_1024", |b| {
        b.iter(|| {
            let mask = params.build_mask(&img.view()).ok()?;
            locate_center(&CenterStrategy::Mask(black_box(mask))).ok()
        })
    });
}

criterion_group!(benches, bench_sample_rgb, bench_cached, bench_locate_center);
criterion_main!(benches);
