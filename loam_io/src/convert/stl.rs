//! Binary STL export.
//!
//! Layout: an 80-byte header, a little-endian `u32` triangle count, then per
//! triangle a unit normal, three vertices and a zero attribute word (50 bytes).

use std::fs;
use std::path::Path;

use loam_core::{Mesh, Triangle};

use crate::error::Result;

/// Bytes per triangle record.
pub const STL_TRIANGLE_SIZE: usize = 50;

/// Bytes before the first triangle record.
pub const STL_HEADER_SIZE: usize = 84;

fn triangle_normal(tri: &Triangle) -> [f32; 3] {
    let n = (tri[1] - tri[0]).cross(tri[2] - tri[0]);
    let len2 = n.length_squared();
    if len2 <= f32::EPSILON {
        return [0.0; 3];
    }
    (n / len2.sqrt()).as_array()
}

/// Encode a mesh as binary STL.
pub fn mesh_to_binary_stl_bytes(mesh: &Mesh, header_name: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(STL_HEADER_SIZE + mesh.triangle_count() * STL_TRIANGLE_SIZE);

    let mut header = [0u8; 80];
    let name_bytes = header_name.as_bytes();
    let copy_n = name_bytes.len().min(header.len());
    header[..copy_n].copy_from_slice(&name_bytes[..copy_n]);
    out.extend_from_slice(&header);

    out.extend_from_slice(&(mesh.triangle_count() as u32).to_le_bytes());

    for tri in mesh.iter_triangles() {
        for component in triangle_normal(&tri) {
            out.extend_from_slice(&component.to_le_bytes());
        }

        for vertex in &tri {
            for component in vertex.as_array() {
                out.extend_from_slice(&component.to_le_bytes());
            }
        }

        out.extend_from_slice(&0u16.to_le_bytes());
    }

    out
}

/// Write a mesh to a binary STL file.
pub fn write_binary_stl(path: impl AsRef<Path>, mesh: &Mesh, header_name: &str) -> Result<()> {
    let bytes = mesh_to_binary_stl_bytes(mesh, header_name);
    fs::write(path, bytes)?;
    Ok(())
}
