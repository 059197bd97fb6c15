//! Format conversion utilities.
//!
//! This module provides export to common mesh formats (OBJ and binary STL).

pub mod obj;
pub mod stl;

use std::path::Path;

use loam_core::{Mesh, MeshStats};

use crate::error::{LoamIoError, Result};

pub use obj::{export_obj, export_obj_to_file, ObjExportConfig};
pub use stl::{mesh_to_binary_stl_bytes, write_binary_stl};

/// Mesh file formats supported by [`export_mesh_to_file`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshFormat {
    /// Wavefront OBJ (text, keeps vertex colors).
    Obj,
    /// Binary STL (geometry only).
    Stl,
}

impl MeshFormat {
    /// Pick a format from a path's extension.
    ///
    /// Unknown extensions fall back to OBJ with a warning.
    ///
    /// # Errors
    /// Returns `UnknownFormat` when the path has no extension at all.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| LoamIoError::UnknownFormat {
                path: path.to_path_buf(),
            })?;

        Ok(match ext.to_ascii_lowercase().as_str() {
            "obj" => MeshFormat::Obj,
            "stl" => MeshFormat::Stl,
            other => {
                log::warn!("unknown mesh extension '.{}', writing OBJ", other);
                MeshFormat::Obj
            }
        })
    }
}

/// Export a mesh, choosing the format from the file extension.
pub fn export_mesh_to_file(mesh: &Mesh, path: impl AsRef<Path>) -> Result<MeshStats> {
    let path = path.as_ref();
    let format = MeshFormat::from_path(path)?;

    let stats = match format {
        MeshFormat::Obj => export_obj_to_file(mesh, path, &ObjExportConfig::default())?,
        MeshFormat::Stl => {
            write_binary_stl(path, mesh, "loam terrain")?;
            MeshStats::from_mesh(mesh)
        }
    };

    log::info!(
        "wrote {} ({} vertices, {} triangles)",
        path.display(),
        stats.vertex_count,
        stats.triangle_count
    );
    Ok(stats)
}
