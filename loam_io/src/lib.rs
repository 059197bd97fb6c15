//! loam_io - image loading, generation profiles and mesh export.
//!
//! This crate is the I/O layer of the loam workspace. It turns files into
//! inputs for `loam_core` and the resulting meshes back into files.
//!
//! # Core Types
//!
//! - [`SourceImage`]: Decoded RGB image implementing `PixelSource`
//! - [`GenerationProfile`]: JSON-persisted generation parameters
//! - [`ObjExportConfig`]: OBJ writer options
//!
//! # Example
//!
//! ```ignore
//! use loam_io::{load_profile, export_mesh_to_file, SourceImage};
//! use loam_core::{build_luminance_field, mesh_height_grid};
//!
//! let profile = load_profile("profile.json")?;
//! let image = SourceImage::open("height.png")?.blurred(profile.blur_strength);
//! let field = build_luminance_field(&image, profile.invert);
//! let mesh = mesh_height_grid(&field, profile.max_height as f32);
//! export_mesh_to_file(&mesh, "terrain.obj")?;
//! ```

pub mod config;
pub mod convert;
pub mod error;
pub mod source;

// Re-export core types from loam_core
pub use loam_core::{Algorithm, Color, Gradient, GradientKey, Mesh, MeshStats, PixelSource, Point3};

// Re-export main types
pub use config::{load_profile, save_profile, GenerationProfile};
pub use convert::{
    export_mesh_to_file, export_obj, export_obj_to_file, mesh_to_binary_stl_bytes,
    write_binary_stl, MeshFormat, ObjExportConfig,
};
pub use error::{LoamIoError, Result};
pub use source::SourceImage;
