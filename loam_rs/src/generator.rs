//! Terrain generation runtime.
//!
//! [`TerrainGenerator`] owns a [`GenerationProfile`] and a source image and
//! turns them into a colored [`Mesh`]. The luminance field and the extruded
//! height field are cached between runs and only rebuilt when an input that
//! feeds them changes:
//!
//! | change                         | luminance | height field |
//! |--------------------------------|-----------|--------------|
//! | source image                   | rebuilt   | rebuilt      |
//! | `invert`, `blur_strength`      | rebuilt   | rebuilt      |
//! | `max_height`, `always_fill_bottom` | kept  | rebuilt      |
//! | anything else                  | kept      | kept         |

use loam_core::{
    build_luminance_field, color_by_height, extrude_to_height_field, mesh_blocks_2d,
    mesh_blocks_3d, mesh_height_grid, mesh_marching_cubes, Algorithm,
    Interpolation, Mesh, MeshStats, ScalarField2D, ScalarField3D,
};
use loam_io::{GenerationProfile, SourceImage};

use crate::error::{LoamError, Result};

/// Image to terrain mesh generator with field caching.
///
/// # Example
///
/// ```ignore
/// use loam_rs::TerrainGenerator;
/// use loam_io::{GenerationProfile, SourceImage};
///
/// let mut generator = TerrainGenerator::new(GenerationProfile::default())?
///     .with_image(SourceImage::open("height.png")?);
/// let mesh = generator.generate()?;
/// ```
#[derive(Debug, Clone)]
pub struct TerrainGenerator {
    profile: GenerationProfile,
    source: Option<SourceImage>,
    luminance: Option<ScalarField2D>,
    height_field: Option<ScalarField3D>,
}

fn check_profile(profile: &GenerationProfile) -> Result<()> {
    profile
        .validate()
        .map_err(|err| LoamError::configuration(err.to_string()))
}

impl TerrainGenerator {
    /// Create a generator without a source image.
    ///
    /// # Errors
    /// Returns `Configuration` if the profile does not validate.
    pub fn new(profile: GenerationProfile) -> Result<Self> {
        check_profile(&profile)?;
        Ok(Self {
            profile,
            source: None,
            luminance: None,
            height_field: None,
        })
    }

    /// Set the source image (builder style).
    pub fn with_image(mut self, image: SourceImage) -> Self {
        self.set_image(image);
        self
    }

    /// Replace the source image, dropping every cached field.
    pub fn set_image(&mut self, image: SourceImage) {
        self.source = Some(image);
        self.invalidate_luminance();
    }

    /// Remove the source image.
    pub fn clear_image(&mut self) {
        self.source = None;
        self.invalidate_luminance();
    }

    /// The current source image, if any.
    pub fn image(&self) -> Option<&SourceImage> {
        self.source.as_ref()
    }

    /// The active profile.
    pub fn profile(&self) -> &GenerationProfile {
        &self.profile
    }

    /// Replace the profile as a unit.
    ///
    /// Only the caches fed by changed parameters are dropped. An invalid
    /// profile is rejected and the previous one stays active.
    pub fn set_profile(&mut self, profile: GenerationProfile) -> Result<()> {
        check_profile(&profile)?;

        let old = &self.profile;
        let luminance_changed =
            old.invert != profile.invert || old.blur_strength != profile.blur_strength;
        let extrusion_changed = old.max_height != profile.max_height
            || old.always_fill_bottom != profile.always_fill_bottom;

        if luminance_changed {
            self.invalidate_luminance();
        } else if extrusion_changed {
            self.height_field = None;
        }

        self.profile = profile;
        Ok(())
    }

    /// Whether the luminance field is cached.
    pub fn has_luminance_field(&self) -> bool {
        self.luminance.is_some()
    }

    /// Whether the extruded height field is cached.
    pub fn has_height_field(&self) -> bool {
        self.height_field.is_some()
    }

    fn invalidate_luminance(&mut self) {
        self.luminance = None;
        self.height_field = None;
    }

    fn ensure_luminance(&mut self) -> Result<()> {
        if self.luminance.is_some() {
            return Ok(());
        }
        let source = self
            .source
            .as_ref()
            .ok_or_else(|| LoamError::configuration("no source image set"))?;

        let blurred;
        let image = if self.profile.blur_strength > 0.0 {
            blurred = source.blurred(self.profile.blur_strength);
            &blurred
        } else {
            source
        };

        let field = build_luminance_field(image, self.profile.invert);
        log::debug!(
            "built {}x{} luminance field (invert: {}, blur: {})",
            field.width(),
            field.height(),
            self.profile.invert,
            self.profile.blur_strength
        );
        self.luminance = Some(field);
        Ok(())
    }

    fn ensure_height_field(&mut self) -> Result<()> {
        self.ensure_luminance()?;
        if self.height_field.is_some() {
            return Ok(());
        }
        let Some(luminance) = self.luminance.as_ref() else {
            return Err(LoamError::configuration("luminance field unavailable"));
        };

        let field = extrude_to_height_field(
            luminance,
            self.profile.max_height,
            self.profile.always_fill_bottom,
        )?;
        log::debug!(
            "extruded height field to {}x{}x{}",
            field.width(),
            field.height(),
            field.depth()
        );
        self.height_field = Some(field);
        Ok(())
    }

    /// The luminance field, built on first use.
    pub fn luminance_field(&mut self) -> Result<&ScalarField2D> {
        self.ensure_luminance()?;
        self.luminance
            .as_ref()
            .ok_or_else(|| LoamError::configuration("luminance field unavailable"))
    }

    /// The extruded height field, built on first use.
    pub fn height_field(&mut self) -> Result<&ScalarField3D> {
        self.ensure_height_field()?;
        self.height_field
            .as_ref()
            .ok_or_else(|| LoamError::configuration("height field unavailable"))
    }

    /// Run the configured algorithm and color the result.
    ///
    /// # Errors
    /// Returns `Configuration` when no source image is set.
    pub fn generate(&mut self) -> Result<Mesh> {
        let algorithm = self.profile.algorithm;
        let threshold = self.profile.threshold;
        let max_height = self.profile.max_height;
        let fill = self.profile.always_fill_bottom;

        let mut mesh = match algorithm {
            Algorithm::Block2D => mesh_blocks_2d(self.luminance_field()?, threshold),
            Algorithm::Heightmap => mesh_height_grid(self.luminance_field()?, max_height as f32),
            Algorithm::Block3D => mesh_blocks_3d(self.height_field()?, threshold, fill),
            Algorithm::MarchingCubesSimple => mesh_marching_cubes(
                self.height_field()?,
                threshold,
                Interpolation::Midpoint,
                max_height,
                fill,
            ),
            Algorithm::MarchingCubesAdvanced => mesh_marching_cubes(
                self.height_field()?,
                threshold,
                Interpolation::Linear,
                max_height,
                fill,
            ),
        };

        if mesh.is_empty() {
            log::debug!("{} produced an empty mesh", algorithm);
        }

        color_by_height(
            &mut mesh,
            &self.profile.gradient,
            max_height as f32,
            self.profile.color_offset,
            self.profile.color_scale,
        );

        let stats = MeshStats::from_mesh(&mesh);
        log::info!(
            "generated {} mesh: {} vertices, {} triangles",
            algorithm,
            stats.vertex_count,
            stats.triangle_count
        );
        Ok(mesh)
    }
}
