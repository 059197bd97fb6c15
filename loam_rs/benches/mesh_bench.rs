//! Criterion benchmarks for loam meshing throughput.

use loam_core::{
    extrude_to_height_field, mesh_blocks_2d, mesh_blocks_3d, mesh_height_grid,
    mesh_marching_cubes, Interpolation, ScalarField2D, ScalarField3D,
};
use loam_rs::{Algorithm, GenerationProfile, SourceImage, TerrainGenerator};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

const MAX_HEIGHT: u32 = 16;

/// Rolling hills: a product of sines over the grid.
fn make_hills(size: usize) -> ScalarField2D {
    let mut values = Vec::with_capacity(size * size);
    for j in 0..size {
        for i in 0..size {
            let u = i as f32 / size as f32 * std::f32::consts::TAU;
            let v = j as f32 / size as f32 * std::f32::consts::TAU;
            values.push(0.5 + 0.5 * (u * 2.0).sin() * (v * 3.0).cos());
        }
    }
    ScalarField2D::from_values(size, size, values).unwrap()
}

fn make_volume(size: usize) -> ScalarField3D {
    extrude_to_height_field(&make_hills(size), MAX_HEIGHT, false).unwrap()
}

fn bench_extrusion(c: &mut Criterion) {
    let mut group = c.benchmark_group("extrude");

    for size in [32, 64, 128] {
        let field = make_hills(size);
        group.throughput(Throughput::Elements((size * size) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &field, |b, field| {
            b.iter(|| extrude_to_height_field(black_box(field), MAX_HEIGHT, false))
        });
    }

    group.finish();
}

fn bench_blocks(c: &mut Criterion) {
    let mut group = c.benchmark_group("blocks");

    for size in [32, 64, 128] {
        let field = make_hills(size);
        let volume = make_volume(size);
        group.throughput(Throughput::Elements((size * size) as u64));

        group.bench_with_input(BenchmarkId::new("2d", size), &field, |b, field| {
            b.iter(|| mesh_blocks_2d(black_box(field), 0.5))
        });
        group.bench_with_input(BenchmarkId::new("3d", size), &volume, |b, volume| {
            b.iter(|| mesh_blocks_3d(black_box(volume), 0.5, false))
        });
    }

    group.finish();
}

fn bench_marching_cubes(c: &mut Criterion) {
    let mut group = c.benchmark_group("marching_cubes");

    for size in [32, 64, 128] {
        let volume = make_volume(size);
        group.throughput(Throughput::Elements(volume.len() as u64));

        for (name, interpolation) in [
            ("midpoint", Interpolation::Midpoint),
            ("linear", Interpolation::Linear),
        ] {
            group.bench_with_input(BenchmarkId::new(name, size), &volume, |b, volume| {
                b.iter(|| {
                    mesh_marching_cubes(black_box(volume), 0.5, interpolation, MAX_HEIGHT, false)
                })
            });
        }
    }

    group.finish();
}

fn bench_heightmap(c: &mut Criterion) {
    let mut group = c.benchmark_group("heightmap");

    for size in [64, 256, 512] {
        let field = make_hills(size);
        group.throughput(Throughput::Elements((size * size) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &field, |b, field| {
            b.iter(|| mesh_height_grid(black_box(field), MAX_HEIGHT as f32))
        });
    }

    group.finish();
}

fn bench_generator(c: &mut Criterion) {
    let size = 64;
    let field = make_hills(size);
    let data = field.values().iter().flat_map(|&v| [v, v, v]).collect();
    let image = SourceImage::from_rgb(size, size, data).unwrap();

    let mut group = c.benchmark_group("generate");

    for algorithm in Algorithm::ALL {
        let profile = GenerationProfile {
            algorithm,
            max_height: MAX_HEIGHT,
            ..Default::default()
        };
        let mut generator = TerrainGenerator::new(profile)
            .unwrap()
            .with_image(image.clone());

        // first run fills the field caches
        generator.generate().unwrap();

        group.bench_function(BenchmarkId::new("warm", algorithm.name()), |b| {
            b.iter(|| black_box(generator.generate().unwrap()))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_extrusion,
    bench_blocks,
    bench_marching_cubes,
    bench_heightmap,
    bench_generator,
);

criterion_main!(benches);
