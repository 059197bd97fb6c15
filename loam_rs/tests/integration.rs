//! Integration tests for end-to-end scenarios.

use loam_core::{CubeFace, PixelSource};
use loam_rs::{
    export_mesh_to_file, load_profile, save_profile, Algorithm, GenerationProfile, Gradient,
    LoamError, MeshStats, SourceImage, TerrainGenerator,
};

/// A round hill: bright in the middle, dark at the rim.
fn hill_image(size: usize) -> SourceImage {
    let center = (size as f32 - 1.0) * 0.5;
    let mut data = Vec::with_capacity(size * size * 3);
    for y in 0..size {
        for x in 0..size {
            let dx = x as f32 - center;
            let dy = y as f32 - center;
            let v = (1.0 - (dx * dx + dy * dy).sqrt() / center).clamp(0.0, 1.0);
            data.extend_from_slice(&[v, v, v]);
        }
    }
    SourceImage::from_rgb(size, size, data).unwrap()
}

fn generator(algorithm: Algorithm) -> TerrainGenerator {
    let profile = GenerationProfile {
        algorithm,
        max_height: 6,
        threshold: 0.3,
        ..Default::default()
    };
    TerrainGenerator::new(profile)
        .unwrap()
        .with_image(hill_image(9))
}

#[test]
fn every_algorithm_produces_a_valid_colored_mesh() {
    for algorithm in Algorithm::ALL {
        let mesh = generator(algorithm).generate().unwrap();
        assert!(!mesh.is_empty(), "{} produced nothing", algorithm);
        assert!(mesh.is_valid(), "{} produced an invalid mesh", algorithm);
        assert_eq!(
            mesh.colors.as_ref().map(Vec::len),
            Some(mesh.vertex_count()),
            "{} colors",
            algorithm
        );
    }
}

#[test]
fn meshes_share_the_same_footprint() {
    for algorithm in Algorithm::ALL {
        let stats = MeshStats::from_mesh(&generator(algorithm).generate().unwrap());
        assert!(stats.bbox_min.x >= -4.5 && stats.bbox_max.x <= 4.5, "{}", algorithm);
        assert!(stats.bbox_min.z >= -4.5 && stats.bbox_max.z <= 4.5, "{}", algorithm);
    }
}

#[test]
fn hill_is_taller_in_the_middle() {
    let mut generator = generator(Algorithm::Heightmap);
    let mesh = generator.generate().unwrap();

    let peak = mesh
        .positions
        .iter()
        .max_by(|a, b| a.y.total_cmp(&b.y))
        .unwrap();
    assert!(peak.x.abs() < 1e-6 && peak.z.abs() < 1e-6, "peak at {:?}", peak);
    assert!((peak.y - 6.0).abs() < 1e-4);
}

#[test]
fn every_volume_mesh_peaks_over_the_origin() {
    for algorithm in [
        Algorithm::Heightmap,
        Algorithm::Block3D,
        Algorithm::MarchingCubesSimple,
        Algorithm::MarchingCubesAdvanced,
    ] {
        let mesh = generator(algorithm).generate().unwrap();
        let top = mesh
            .positions
            .iter()
            .map(|p| p.y)
            .fold(f32::MIN, f32::max);

        let mut peak: Vec<_> = mesh
            .positions
            .iter()
            .filter(|p| (p.y - top).abs() < 1e-4)
            .map(|p| ((p.x * 1e4).round() as i64, (p.z * 1e4).round() as i64))
            .collect();
        peak.sort_unstable();
        peak.dedup();

        let n = peak.len() as f32;
        let x = peak.iter().map(|&(x, _)| x as f32 * 1e-4).sum::<f32>() / n;
        let z = peak.iter().map(|&(_, z)| z as f32 * 1e-4).sum::<f32>() / n;
        assert!(x.abs() < 1e-3 && z.abs() < 1e-3, "{} peak at x={} z={}", algorithm, x, z);
    }
}

#[test]
fn inverted_hill_is_a_valley() {
    let profile = GenerationProfile {
        algorithm: Algorithm::Heightmap,
        invert: true,
        ..Default::default()
    };
    let mut generator = TerrainGenerator::new(profile)
        .unwrap()
        .with_image(hill_image(9));
    let mesh = generator.generate().unwrap();

    let lowest = mesh
        .positions
        .iter()
        .min_by(|a, b| a.y.total_cmp(&b.y))
        .unwrap();
    assert!(lowest.x.abs() < 1e-6 && lowest.z.abs() < 1e-6);
}

#[test]
fn block_volume_hides_interior_faces() {
    let mut generator = generator(Algorithm::Block3D);
    let volume = generator.height_field().unwrap().clone();
    let spawns = loam_core::plan_blocks_3d(&volume, 0.3, false);
    let mesh = generator.generate().unwrap();

    let visible: usize = spawns.iter().map(|s| s.mask.visible_count()).sum();
    assert_eq!(mesh.triangle_count(), visible * 2);
    assert!(spawns
        .iter()
        .filter(|s| s.center.y == 0.0)
        .all(|s| s.mask.is_culled(CubeFace::Bottom)));
}

#[test]
fn blur_smooths_the_field() {
    let sharp = {
        let mut g = generator(Algorithm::Heightmap);
        g.luminance_field().unwrap().clone()
    };
    let soft = {
        let profile = GenerationProfile {
            blur_strength: 2.0,
            ..Default::default()
        };
        let mut g = TerrainGenerator::new(profile)
            .unwrap()
            .with_image(hill_image(9));
        g.luminance_field().unwrap().clone()
    };

    let peak = |f: &loam_core::ScalarField2D| f.values().iter().cloned().fold(0.0, f32::max);
    assert!(peak(&soft) < peak(&sharp));
}

#[test]
fn profile_file_drives_generation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("terrain.json");

    let profile = GenerationProfile {
        name: "hill".to_string(),
        algorithm: Algorithm::MarchingCubesSimple,
        gradient: Gradient::terrain(),
        max_height: 5,
        ..Default::default()
    };
    save_profile(&profile, &path).unwrap();

    let loaded = load_profile(&path).unwrap();
    assert_eq!(loaded, profile);

    let mut generator = TerrainGenerator::new(loaded)
        .unwrap()
        .with_image(hill_image(7));
    assert!(!generator.generate().unwrap().is_empty());
}

#[test]
fn export_writes_obj_and_stl() {
    let dir = tempfile::tempdir().unwrap();
    let mesh = generator(Algorithm::Block2D).generate().unwrap();

    let obj = dir.path().join("terrain.obj");
    let stl = dir.path().join("terrain.stl");
    let obj_stats = export_mesh_to_file(&mesh, &obj).unwrap();
    export_mesh_to_file(&mesh, &stl).unwrap();

    let text = std::fs::read_to_string(&obj).unwrap();
    let colored_vertices = text
        .lines()
        .filter(|l| l.starts_with("v ") && l.split_whitespace().count() == 7)
        .count();
    assert_eq!(colored_vertices, obj_stats.vertex_count);

    let stl_len = std::fs::metadata(&stl).unwrap().len() as usize;
    assert_eq!(stl_len, 84 + 50 * mesh.triangle_count());
}

#[test]
fn image_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hill.png");

    let mut png = image::RgbImage::new(4, 4);
    for (x, y, px) in png.enumerate_pixels_mut() {
        let v = if x >= 2 && y < 2 { 255 } else { 0 };
        *px = image::Rgb([v, v, v]);
    }
    png.save(&path).unwrap();

    let source = SourceImage::open(&path).unwrap();
    assert_eq!(source.width(), 4);

    let profile = GenerationProfile {
        algorithm: Algorithm::Block2D,
        ..Default::default()
    };
    let mut generator = TerrainGenerator::new(profile).unwrap().with_image(source);
    let mesh = generator.generate().unwrap();
    let stats = MeshStats::from_mesh(&mesh);

    // bright quadrant is top-right in the file: +x, +z in the world
    assert_eq!(stats.bbox_min.x, 0.0);
    assert_eq!(stats.bbox_min.z, 0.0);
    assert_eq!(stats.bbox_max.x, 2.0);
    assert_eq!(stats.bbox_max.z, 2.0);
}

#[test]
fn generating_without_image_fails_cleanly() {
    let mut generator = TerrainGenerator::new(GenerationProfile::default()).unwrap();
    let err = generator.generate().unwrap_err();
    assert!(matches!(err, LoamError::Configuration { .. }));
    assert!(err.to_string().contains("no source image"));
}
