//! Marching Cubes mesh extraction.
//!
//! This module provides the marching cubes algorithm for extracting triangle
//! meshes from 3D scalar fields. It includes:
//!
//! - Compile-time lookup tables for cube configurations
//! - Per-cube triangulation with midpoint or linear edge placement
//! - Whole-field extraction into a [`Mesh`](crate::mesh::Mesh)
//!
//! # Example
//!
//! ```ignore
//! use loam_core::marching_cubes::{mesh_marching_cubes, Interpolation};
//!
//! let mesh = mesh_marching_cubes(&volume, 0.5, Interpolation::Linear, 10, false);
//! ```

mod algorithm;
mod tables;

pub use algorithm::{
    compute_cube_index, edge_parameter, interpolate_vertex, mesh_marching_cubes,
    triangulate_cube, vertical_offset, Interpolation,
};
pub use tables::{CORNER_OFFSETS, EDGE_TABLE, EDGE_VERTICES, TRI_TABLE};
