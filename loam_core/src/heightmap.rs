//! Heightmap grid meshing.
//!
//! Produces one continuous sheet: a vertex per field sample raised to
//! `value * max_height`, and two triangles per 2x2 block of samples. Values
//! are used as-is, without thresholding or culling.

use crate::blocks::centered_coord;
use crate::field::ScalarField2D;
use crate::mesh::{Mesh, MeshAssembler};
use crate::types::Point3;

/// Mesh a 2D field as a displaced grid.
///
/// Vertices are shared between neighboring quads. Triangles wind
/// counter-clockwise seen from above.
pub fn mesh_height_grid(field: &ScalarField2D, max_height: f32) -> Mesh {
    let (width, height) = field.dims();
    let quads = width.saturating_sub(1) * height.saturating_sub(1);
    let mut assembler = MeshAssembler::with_capacity(width * height, quads * 2);

    for (i, j, value) in field.iter() {
        assembler.push_vertex(Point3::new(
            centered_coord(i, width),
            value * max_height,
            centered_coord(j, height),
        ));
    }

    if width < 2 || height < 2 {
        return assembler.build();
    }

    let index = |i: usize, j: usize| (i + j * width) as u32;
    for j in 0..height - 1 {
        for i in 0..width - 1 {
            let a = index(i, j);
            let b = index(i + 1, j);
            let c = index(i, j + 1);
            let d = index(i + 1, j + 1);
            assembler.push_indices(a, c, b);
            assembler.push_indices(b, c, d);
        }
    }

    assembler.build()
}
