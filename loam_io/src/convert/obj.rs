//! OBJ export for terrain meshes.
//!
//! Writes a standard Wavefront OBJ file. When the mesh carries vertex colors
//! they are appended to each `v` line (`v x y z r g b`), the extension most
//! viewers understand.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use loam_core::{Mesh, MeshStats};

use crate::error::Result;

/// Configuration for OBJ export.
#[derive(Debug, Clone)]
pub struct ObjExportConfig {
    /// Write vertex colors when the mesh has them (default: true).
    pub include_colors: bool,
    /// Optional `o` object name.
    pub object_name: Option<String>,
}

impl Default for ObjExportConfig {
    fn default() -> Self {
        Self {
            include_colors: true,
            object_name: None,
        }
    }
}

/// Export a mesh as OBJ.
///
/// # Example
///
/// ```ignore
/// use loam_io::{export_obj, ObjExportConfig};
/// use std::fs::File;
///
/// let mut file = File::create("terrain.obj")?;
/// export_obj(&mesh, &mut file, &ObjExportConfig::default())?;
/// ```
pub fn export_obj<W: Write>(
    mesh: &Mesh,
    writer: &mut W,
    config: &ObjExportConfig,
) -> Result<MeshStats> {
    let stats = MeshStats::from_mesh(mesh);
    if mesh.is_empty() {
        log::warn!("exporting an empty mesh");
    }

    writeln!(writer, "# loam OBJ Export")?;
    writeln!(
        writer,
        "# Bounds: ({}, {}, {}) .. ({}, {}, {})",
        stats.bbox_min.x,
        stats.bbox_min.y,
        stats.bbox_min.z,
        stats.bbox_max.x,
        stats.bbox_max.y,
        stats.bbox_max.z
    )?;
    writeln!(writer)?;

    if let Some(name) = &config.object_name {
        writeln!(writer, "o {}", name)?;
    }

    let colors = mesh
        .colors
        .as_deref()
        .filter(|c| config.include_colors && c.len() == mesh.positions.len());

    // Write vertices
    writeln!(writer, "# {} vertices", mesh.vertex_count())?;
    match colors {
        Some(colors) => {
            for (p, c) in mesh.positions.iter().zip(colors) {
                writeln!(writer, "v {} {} {} {} {} {}", p.x, p.y, p.z, c.r, c.g, c.b)?;
            }
        }
        None => {
            for p in &mesh.positions {
                writeln!(writer, "v {} {} {}", p.x, p.y, p.z)?;
            }
        }
    }

    writeln!(writer)?;

    // Write faces (OBJ uses 1-based indexing)
    writeln!(writer, "# {} faces", mesh.triangle_count())?;
    for [a, b, c] in &mesh.triangles {
        writeln!(writer, "f {} {} {}", a + 1, b + 1, c + 1)?;
    }

    writer.flush()?;
    Ok(stats)
}

/// Export a mesh to an OBJ file.
pub fn export_obj_to_file<P: AsRef<Path>>(
    mesh: &Mesh,
    path: P,
    config: &ObjExportConfig,
) -> Result<MeshStats> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    export_obj(mesh, &mut writer, config)
}
