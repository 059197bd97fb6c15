//! # loam_rs
//!
//! Image to terrain generation runtime.
//!
//! This crate ties the loam workspace together: it takes a
//! [`GenerationProfile`] and a [`SourceImage`], builds and caches the scalar
//! fields from `loam_core`, dispatches to the selected meshing algorithm and
//! colors the result.
//!
//! ## Quick Start
//!
//! ```ignore
//! use loam_rs::{TerrainGenerator, GenerationProfile, SourceImage, Algorithm};
//!
//! let profile = GenerationProfile {
//!     algorithm: Algorithm::Block3D,
//!     max_height: 16,
//!     ..Default::default()
//! };
//!
//! let mut generator = TerrainGenerator::new(profile)?
//!     .with_image(SourceImage::open("height.png")?);
//! let mesh = generator.generate()?;
//! loam_rs::export_mesh_to_file(&mesh, "terrain.stl")?;
//! ```
//!
//! ## Algorithms
//!
//! | Algorithm               | Input field | Output                          |
//! |-------------------------|-------------|---------------------------------|
//! | `Block2D`               | luminance   | one layer of culled cubes       |
//! | `Block3D`               | height      | stacked culled cubes            |
//! | `Heightmap`             | luminance   | displaced grid sheet            |
//! | `MarchingCubesSimple`   | height      | isosurface, midpoint edges      |
//! | `MarchingCubesAdvanced` | height      | isosurface, interpolated edges  |
//!
//! ## Logging
//!
//! Progress is reported through the `log` facade. Install a logger (for
//! example `env_logger`) in the binary to see it.

#![warn(missing_docs)]

pub mod error;
pub mod generator;

pub use error::{LoamError, Result};
pub use generator::TerrainGenerator;

// Re-export commonly used types
pub use loam_core::{Algorithm, Color, Gradient, GradientKey, Interpolation, Mesh, MeshStats, Point3};
pub use loam_io::{
    export_mesh_to_file, export_obj, export_obj_to_file, load_profile, save_profile,
    write_binary_stl, GenerationProfile, MeshFormat, ObjExportConfig, SourceImage,
};
