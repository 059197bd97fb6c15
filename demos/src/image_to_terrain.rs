//! Image to Terrain
//!
//! Turns a grayscale (or color) image into a 3D terrain mesh:
//! 1. Load a generation profile (or start from the defaults)
//! 2. Apply command-line overrides
//! 3. Load the source image
//! 4. Generate and color the mesh
//! 5. Export to OBJ or STL, picked from the output extension
//!
//! # Usage
//!
//! ```bash
//! cargo run --release --bin image_to_terrain -- input/height.png -o output/terrain.obj \
//!     --algorithm block3d --max-height 24 --threshold 0.4
//! ```
//!
//! Set `RUST_LOG=debug` for per-stage logging.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use loam_core::Algorithm;
use loam_io::{load_profile, save_profile, GenerationProfile, SourceImage};
use loam_rs::{export_mesh_to_file, TerrainGenerator};

#[derive(Parser, Debug)]
#[command(name = "image_to_terrain")]
#[command(about = "Generate a terrain mesh (OBJ or STL) from an image")]
struct Args {
    /// Source image (PNG, JPEG, BMP, GIF or TGA)
    image: PathBuf,

    /// Output mesh path; `.obj` or `.stl`
    #[arg(short, long, default_value = "terrain.obj")]
    output: PathBuf,

    /// Generation profile (JSON) to start from
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Meshing algorithm: block2d, block3d, heightmap, marching_cubes_simple,
    /// marching_cubes_advanced
    #[arg(long)]
    algorithm: Option<Algorithm>,

    /// Solidity threshold in [0, 1]
    #[arg(long)]
    threshold: Option<f32>,

    /// Height of a white pixel in blocks
    #[arg(long)]
    max_height: Option<u32>,

    /// Treat dark pixels as high ground
    #[arg(long)]
    invert: bool,

    /// Keep the bottom layers solid everywhere
    #[arg(long)]
    fill_bottom: bool,

    /// Gaussian blur sigma applied to the image before meshing
    #[arg(long)]
    blur: Option<f32>,

    /// Write the effective profile to this path
    #[arg(long)]
    save_profile: Option<PathBuf>,
}

impl Args {
    /// Resolve the effective profile: file (or defaults) plus flag overrides.
    fn profile(&self) -> Result<GenerationProfile> {
        let mut profile = match &self.profile {
            Some(path) => load_profile(path)
                .with_context(|| format!("failed to load profile {}", path.display()))?,
            None => GenerationProfile::default(),
        };

        if let Some(algorithm) = self.algorithm {
            profile.algorithm = algorithm;
        }
        if let Some(threshold) = self.threshold {
            profile.threshold = threshold;
        }
        if let Some(max_height) = self.max_height {
            profile.max_height = max_height;
        }
        if let Some(blur) = self.blur {
            profile.blur_strength = blur;
        }
        profile.invert |= self.invert;
        profile.always_fill_bottom |= self.fill_bottom;

        Ok(profile)
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let profile = args.profile()?;

    if let Some(path) = &args.save_profile {
        save_profile(&profile, path)
            .with_context(|| format!("failed to save profile {}", path.display()))?;
        info!("saved profile to {}", path.display());
    }

    let start = Instant::now();
    let image = SourceImage::open(&args.image)
        .with_context(|| format!("failed to open image {}", args.image.display()))?;
    info!(
        "loaded {}x{} image in {:.2?}",
        image.pixels().width(),
        image.pixels().height(),
        start.elapsed()
    );

    let algorithm = profile.algorithm;
    let mut generator = TerrainGenerator::new(profile)
        .context("invalid generation profile")?
        .with_image(image);

    let start = Instant::now();
    let mesh = generator.generate().context("terrain generation failed")?;
    let generation_time = start.elapsed();

    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    let stats = export_mesh_to_file(&mesh, &args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    println!("algorithm:  {}", algorithm);
    println!("vertices:   {}", stats.vertex_count);
    println!("triangles:  {}", stats.triangle_count);
    println!(
        "bounds:     ({:.2}, {:.2}, {:.2}) .. ({:.2}, {:.2}, {:.2})",
        stats.bbox_min.x,
        stats.bbox_min.y,
        stats.bbox_min.z,
        stats.bbox_max.x,
        stats.bbox_max.y,
        stats.bbox_max.z
    );
    println!("area:       {:.2}", stats.surface_area);
    println!("generated:  {:.2?}", generation_time);
    println!("written to: {}", args.output.display());

    Ok(())
}
