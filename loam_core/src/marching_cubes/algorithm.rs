//! Marching cubes surface extraction over a 3D scalar field.
//!
//! Every unit cube of eight adjacent samples is classified against the
//! threshold and triangulated from the case table. Cubes lie entirely inside
//! the field, so a field with fewer than two samples along any axis produces
//! nothing.

use crate::blocks::centered_coord;
use crate::field::ScalarField3D;
use crate::mesh::{Mesh, MeshAssembler, Triangle};
use crate::types::Point3;

use super::tables::{CORNER_OFFSETS, EDGE_TABLE, EDGE_VERTICES, TRI_TABLE};

/// Placement of the surface vertex along a crossing edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Interpolation {
    /// Always the edge midpoint. Blocky, value independent slopes.
    Midpoint,
    /// Linear interpolation of the threshold crossing.
    #[default]
    Linear,
}

/// Edges whose corner values differ by less than this are treated as flat.
const DEGENERATE_EPSILON: f32 = 1e-10;

/// Parameter `t` in `[0, 1]` of the threshold crossing on an edge from a
/// corner of value `v0` to a corner of value `v1`.
///
/// Flat edges (`v0 == v1`) return `0.5`. For any other edge,
/// `edge_parameter(a, b, th) + edge_parameter(b, a, th) == 1`.
#[inline]
pub fn edge_parameter(v0: f32, v1: f32, threshold: f32) -> f32 {
    let denom = v1 - v0;
    if denom.abs() < DEGENERATE_EPSILON {
        return 0.5;
    }
    ((threshold - v0) / denom).clamp(0.0, 1.0)
}

/// Interpolate vertex position along an edge where the field crosses the
/// threshold.
#[inline]
pub fn interpolate_vertex(p0: Point3, p1: Point3, v0: f32, v1: f32, threshold: f32) -> Point3 {
    p0.lerp(p1, edge_parameter(v0, v1, threshold))
}

/// Compute the cube configuration index from corner values.
///
/// Bit `c` is set when corner `c` is solid (`value > threshold`).
#[inline]
pub fn compute_cube_index(corner_values: &[f32; 8], threshold: f32) -> usize {
    let mut index = 0;
    for (c, &val) in corner_values.iter().enumerate() {
        if val > threshold {
            index |= 1 << c;
        }
    }
    index
}

/// Vertical translation applied to marching cubes output so it shares the
/// world origin with the other meshers.
#[inline]
pub fn vertical_offset(max_height: u32, always_fill_bottom: bool) -> f32 {
    let offset = 0.5 * max_height as f32 + 1.0;
    if always_fill_bottom {
        offset - 0.5
    } else {
        offset
    }
}

/// Triangulate one cube from its corner values and world-space corner
/// positions.
///
/// Returns a fixed array holding up to 5 triangles (the most any
/// configuration produces) and the number of valid entries.
pub fn triangulate_cube(
    corner_values: &[f32; 8],
    corner_positions: &[Point3; 8],
    threshold: f32,
    interpolation: Interpolation,
) -> ([Triangle; 5], usize) {
    let mut triangles = [[Point3::default(); 3]; 5];

    let cube_index = compute_cube_index(corner_values, threshold);
    let edge_flags = EDGE_TABLE[cube_index];
    if edge_flags == 0 {
        return (triangles, 0);
    }

    let mut edge_vertices = [Point3::default(); 12];
    for (edge_idx, &(a, b)) in EDGE_VERTICES.iter().enumerate() {
        if edge_flags & (1 << edge_idx) == 0 {
            continue;
        }
        edge_vertices[edge_idx] = match interpolation {
            Interpolation::Midpoint => corner_positions[a].lerp(corner_positions[b], 0.5),
            Interpolation::Linear => interpolate_vertex(
                corner_positions[a],
                corner_positions[b],
                corner_values[a],
                corner_values[b],
                threshold,
            ),
        };
    }

    let tri_list = &TRI_TABLE[cube_index];
    let mut count = 0;
    let mut i = 0;
    while i < 16 && tri_list[i] != -1 && count < 5 {
        let e0 = tri_list[i] as usize;
        let e1 = tri_list[i + 1] as usize;
        let e2 = tri_list[i + 2] as usize;

        triangles[count] = [edge_vertices[e0], edge_vertices[e1], edge_vertices[e2]];
        count += 1;
        i += 3;
    }

    (triangles, count)
}

/// Extract the threshold isosurface of a 3D field.
///
/// Sample `(i, j, k)` is placed at world
/// `(i + 0.5 - X/2, k - vertical_offset, j + 0.5 - Y/2)`, the same horizontal
/// cell centers the block and heightmap meshers use. Each triangle gets its
/// own three vertices.
pub fn mesh_marching_cubes(
    field: &ScalarField3D,
    threshold: f32,
    interpolation: Interpolation,
    max_height: u32,
    always_fill_bottom: bool,
) -> Mesh {
    let (width, height, depth) = field.dims();
    let mut assembler = MeshAssembler::new();
    if width < 2 || height < 2 || depth < 2 {
        return assembler.build();
    }

    let y_shift = vertical_offset(max_height, always_fill_bottom);

    let mut corner_values = [0.0f32; 8];
    let mut corner_positions = [Point3::default(); 8];

    for k in 0..depth - 1 {
        for j in 0..height - 1 {
            for i in 0..width - 1 {
                for (c, &(di, dj, dk)) in CORNER_OFFSETS.iter().enumerate() {
                    let (ci, cj, ck) = (i + di as usize, j + dj as usize, k + dk as usize);
                    corner_values[c] = field[(ci, cj, ck)];
                    corner_positions[c] = Point3::new(
                        centered_coord(ci, width),
                        ck as f32 - y_shift,
                        centered_coord(cj, height),
                    );
                }

                let (triangles, count) =
                    triangulate_cube(&corner_values, &corner_positions, threshold, interpolation);
                for triangle in &triangles[..count] {
                    assembler.push_triangle(*triangle);
                }
            }
        }
    }

    assembler.build()
}
