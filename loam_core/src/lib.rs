//! # loam_core
//!
//! Pure algorithms for turning images into terrain meshes.
//!
//! This crate holds the field and meshing layer of the loam workspace. It does
//! no I/O: images come in through the [`PixelSource`] trait and geometry goes
//! out as a [`Mesh`]. Decoding, profiles and export live in `loam_io`.
//!
//! ## Features
//!
//! - **Scalar fields**: dense, bounds-checked 2D and 3D grids
//! - **Block meshing**: unit cubes with neighbor face culling
//! - **Heightmap meshing**: one displaced sheet per field
//! - **Marching cubes**: compile-time lookup tables, midpoint or linear edges
//! - **Vertex coloring**: height driven gradients
//!
//! ## Feature Flags
//!
//! - `serde`: derives `Serialize`/`Deserialize` for [`Algorithm`], [`Color`],
//!   [`Gradient`] and [`GradientKey`]
//!
//! ## Modules
//!
//! - [`types`]: Core data types (Point3, Color)
//! - [`field`]: Scalar fields (ScalarField2D, ScalarField3D)
//! - [`traits`]: Input abstraction (PixelSource)
//! - [`builder`]: Luminance fields and height extrusion
//! - [`blocks`]: Cube meshing with face culling
//! - [`heightmap`]: Displaced grid meshing
//! - [`marching_cubes`]: Isosurface extraction
//! - [`mesh`]: Mesh buffers, assembly and statistics
//! - [`color`]: Gradients and height coloring
//! - [`algorithm`]: Algorithm selection
//! - [`error`]: Error types
//!
//! ## Usage
//!
//! ```ignore
//! use loam_core::prelude::*;
//!
//! let field = build_luminance_field(&image, false);
//! let volume = extrude_to_height_field(&field, 10, false)?;
//! let mut mesh = mesh_marching_cubes(&volume, 0.5, Interpolation::Linear, 10, false);
//! color_by_height(&mut mesh, &Gradient::terrain(), 10.0, 0.0, 1.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algorithm;
pub mod blocks;
pub mod builder;
pub mod color;
pub mod error;
pub mod field;
pub mod heightmap;
pub mod marching_cubes;
pub mod mesh;
pub mod traits;
pub mod types;

/// Prelude module for convenient imports.
///
/// Provides the most commonly used types and functions.
pub mod prelude {
    pub use crate::algorithm::Algorithm;
    pub use crate::blocks::{
        emit_cube, mesh_blocks_2d, mesh_blocks_3d, plan_blocks_2d, plan_blocks_3d, CubeFace,
        CubeSpawn, FaceMask,
    };
    pub use crate::builder::{build_luminance_field, extrude_to_height_field, luma};
    pub use crate::color::{color_by_height, Gradient, GradientKey};
    pub use crate::error::LoamCoreError;
    pub use crate::field::{ScalarField2D, ScalarField3D};
    pub use crate::heightmap::mesh_height_grid;
    pub use crate::marching_cubes::{edge_parameter, mesh_marching_cubes, Interpolation};
    pub use crate::mesh::{Mesh, MeshAssembler, MeshStats, Triangle};
    pub use crate::traits::PixelSource;
    pub use crate::types::{Color, Point3};
}

// Re-export everything at crate root for convenience
pub use algorithm::{Algorithm, ParseAlgorithmError};
pub use blocks::{
    centered_coord, emit_cube, is_solid, mesh_blocks_2d, mesh_blocks_3d, plan_blocks_2d,
    plan_blocks_3d, CubeFace, CubeSpawn, FaceMask, HALF_BLOCK,
};
pub use builder::{
    build_luminance_field, extrude_to_height_field, extruded_depth, luma, LUMA_B, LUMA_G, LUMA_R,
};
pub use color::{clamp01, color_by_height, Gradient, GradientKey};
pub use error::LoamCoreError;
pub use field::{ScalarField2D, ScalarField3D};
pub use heightmap::mesh_height_grid;
pub use marching_cubes::{
    compute_cube_index, edge_parameter, interpolate_vertex, mesh_marching_cubes,
    triangulate_cube, vertical_offset, Interpolation,
};
pub use mesh::{Mesh, MeshAssembler, MeshStats, Triangle};
pub use traits::PixelSource;
pub use types::{Color, Point3};
