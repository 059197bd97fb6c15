//! Property-based tests verifying generator output against direct loam_core calls.

use loam_core::{
    build_luminance_field, extrude_to_height_field, mesh_blocks_2d, mesh_blocks_3d,
    mesh_marching_cubes, Interpolation, Point3,
};
use loam_rs::{Algorithm, GenerationProfile, SourceImage, TerrainGenerator};
use proptest::prelude::*;

/// Random grayscale image strategy.
fn gray_image() -> impl Strategy<Value = SourceImage> {
    (1usize..7, 1usize..7).prop_flat_map(|(w, h)| {
        proptest::collection::vec(0.0f32..1.0, w * h).prop_map(move |values| {
            let data = values.iter().flat_map(|&v| [v, v, v]).collect();
            SourceImage::from_rgb(w, h, data).unwrap()
        })
    })
}

fn algorithm() -> impl Strategy<Value = Algorithm> {
    proptest::sample::select(Algorithm::ALL.to_vec())
}

fn profile() -> impl Strategy<Value = GenerationProfile> {
    (algorithm(), 1u32..8, 0.0f32..1.0, any::<bool>(), any::<bool>()).prop_map(
        |(algorithm, max_height, threshold, invert, always_fill_bottom)| GenerationProfile {
            algorithm,
            max_height,
            threshold,
            invert,
            always_fill_bottom,
            ..Default::default()
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The generator dispatches to the same core functions a caller would use.
    #[test]
    fn generator_matches_core_pipeline(image in gray_image(), profile in profile()) {
        let field = build_luminance_field(&image, profile.invert);
        let volume =
            extrude_to_height_field(&field, profile.max_height, profile.always_fill_bottom)
                .unwrap();

        let expected = match profile.algorithm {
            Algorithm::Block2D => mesh_blocks_2d(&field, profile.threshold),
            Algorithm::Block3D => {
                mesh_blocks_3d(&volume, profile.threshold, profile.always_fill_bottom)
            }
            Algorithm::Heightmap => {
                loam_core::mesh_height_grid(&field, profile.max_height as f32)
            }
            Algorithm::MarchingCubesSimple => mesh_marching_cubes(
                &volume,
                profile.threshold,
                Interpolation::Midpoint,
                profile.max_height,
                profile.always_fill_bottom,
            ),
            Algorithm::MarchingCubesAdvanced => mesh_marching_cubes(
                &volume,
                profile.threshold,
                Interpolation::Linear,
                profile.max_height,
                profile.always_fill_bottom,
            ),
        };

        let mut generator = TerrainGenerator::new(profile).unwrap().with_image(image);
        let mesh = generator.generate().unwrap();

        prop_assert_eq!(&mesh.positions, &expected.positions);
        prop_assert_eq!(&mesh.triangles, &expected.triangles);
    }

    /// Changing the profile on a warm generator gives the same mesh as a fresh one.
    #[test]
    fn cache_invalidation_is_transparent(
        image in gray_image(),
        first in profile(),
        second in profile(),
    ) {
        let mut warm = TerrainGenerator::new(first).unwrap().with_image(image.clone());
        warm.generate().unwrap();
        warm.set_profile(second.clone()).unwrap();
        let reused = warm.generate().unwrap();

        let mut fresh = TerrainGenerator::new(second).unwrap().with_image(image);
        prop_assert_eq!(reused, fresh.generate().unwrap());
    }

    /// Every block triangle faces away from the cube it belongs to.
    #[test]
    fn block_faces_point_outward(image in gray_image(), threshold in 0.0f32..1.0) {
        let field = build_luminance_field(&image, false);
        let mesh = mesh_blocks_2d(&field, threshold);

        // each visible face is 4 vertices / 2 triangles; its cube center is
        // half a block behind the face along the normal
        for t in 0..mesh.triangle_count() {
            let normal = mesh.face_normal(t).normalize();
            let [a, b, c] = mesh.triangle(t);
            let centroid = (a + b + c) / 3.0;
            let quad = &mesh.positions[(t / 2) * 4..(t / 2) * 4 + 4];
            let face_center = quad.iter().fold(Point3::default(), |acc, &p| acc + p) / 4.0;
            let cube_center = face_center - normal * 0.5;

            prop_assert!(normal.dot(centroid - cube_center) > 0.0);
            prop_assert!((cube_center.y - 0.5).abs() < 1e-5);
        }
    }

    /// Generation is deterministic, colors included.
    #[test]
    fn generation_is_deterministic(image in gray_image(), profile in profile()) {
        let mut a = TerrainGenerator::new(profile.clone()).unwrap().with_image(image.clone());
        let mut b = TerrainGenerator::new(profile).unwrap().with_image(image);
        prop_assert_eq!(a.generate().unwrap(), b.generate().unwrap());
    }
}
