//! Block (voxel cube) meshing.
//!
//! Every cell whose value is strictly greater than the threshold becomes a
//! unit cube. Faces shared by two solid cells are culled: no vertices are
//! generated for them at all.
//!
//! Meshing is split in two steps. A planner walks the field and produces
//! [`CubeSpawn`] descriptors (center + [`FaceMask`]), and [`emit_cube`] turns a
//! descriptor into quads. The planners are public so callers can inspect or
//! instance cubes themselves.
//!
//! World layout: field `i` runs along world X, field `j` along world Z, and
//! the 3D layer index `k` along world Y. The X/Z footprint is centered on the
//! origin.

use crate::field::{ScalarField2D, ScalarField3D};
use crate::mesh::{Mesh, MeshAssembler};
use crate::types::Point3;

/// One face of an axis-aligned cube.
///
/// The discriminant is the face's slot in a [`FaceMask`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CubeFace {
    /// Facing -Y.
    Bottom = 0,
    /// Facing +Y.
    Top = 1,
    /// Facing +Z.
    Front = 2,
    /// Facing +X.
    Right = 3,
    /// Facing -Z.
    Back = 4,
    /// Facing -X.
    Left = 5,
}

impl CubeFace {
    /// All faces in mask order.
    pub const ALL: [CubeFace; 6] = [
        CubeFace::Bottom,
        CubeFace::Top,
        CubeFace::Front,
        CubeFace::Right,
        CubeFace::Back,
        CubeFace::Left,
    ];

    /// Slot of this face in a [`FaceMask`].
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Outward unit normal in world space.
    #[inline]
    pub const fn normal(self) -> Point3 {
        match self {
            CubeFace::Bottom => Point3::new(0.0, -1.0, 0.0),
            CubeFace::Top => Point3::new(0.0, 1.0, 0.0),
            CubeFace::Front => Point3::new(0.0, 0.0, 1.0),
            CubeFace::Right => Point3::new(1.0, 0.0, 0.0),
            CubeFace::Back => Point3::new(0.0, 0.0, -1.0),
            CubeFace::Left => Point3::new(-1.0, 0.0, 0.0),
        }
    }

    /// Neighbor step in field coordinates `(di, dj, dk)`.
    #[inline]
    pub const fn field_step(self) -> (i64, i64, i64) {
        match self {
            CubeFace::Bottom => (0, 0, -1),
            CubeFace::Top => (0, 0, 1),
            CubeFace::Front => (0, 1, 0),
            CubeFace::Right => (1, 0, 0),
            CubeFace::Back => (0, -1, 0),
            CubeFace::Left => (-1, 0, 0),
        }
    }

    /// Corner offsets (in half extents) wound counter-clockwise when seen
    /// from outside.
    const fn corners(self) -> [(f32, f32, f32); 4] {
        match self {
            CubeFace::Bottom => [
                (-1.0, -1.0, -1.0),
                (1.0, -1.0, -1.0),
                (1.0, -1.0, 1.0),
                (-1.0, -1.0, 1.0),
            ],
            CubeFace::Top => [
                (-1.0, 1.0, -1.0),
                (-1.0, 1.0, 1.0),
                (1.0, 1.0, 1.0),
                (1.0, 1.0, -1.0),
            ],
            CubeFace::Front => [
                (1.0, -1.0, 1.0),
                (1.0, 1.0, 1.0),
                (-1.0, 1.0, 1.0),
                (-1.0, -1.0, 1.0),
            ],
            CubeFace::Right => [
                (1.0, -1.0, -1.0),
                (1.0, 1.0, -1.0),
                (1.0, 1.0, 1.0),
                (1.0, -1.0, 1.0),
            ],
            CubeFace::Back => [
                (-1.0, -1.0, -1.0),
                (-1.0, 1.0, -1.0),
                (1.0, 1.0, -1.0),
                (1.0, -1.0, -1.0),
            ],
            CubeFace::Left => [
                (-1.0, -1.0, 1.0),
                (-1.0, 1.0, 1.0),
                (-1.0, 1.0, -1.0),
                (-1.0, -1.0, -1.0),
            ],
        }
    }
}

/// Per-face cull flags; `true` means the face is omitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct FaceMask(pub [bool; 6]);

impl FaceMask {
    /// No face culled.
    pub const NONE: Self = Self([false; 6]);

    /// Whether `face` is culled.
    #[inline]
    pub const fn is_culled(&self, face: CubeFace) -> bool {
        self.0[face.index()]
    }

    /// Mark `face` as culled or visible.
    #[inline]
    pub fn set(&mut self, face: CubeFace, culled: bool) {
        self.0[face.index()] = culled;
    }

    /// Number of faces that will be emitted.
    #[inline]
    pub fn visible_count(&self) -> usize {
        self.0.iter().filter(|&&culled| !culled).count()
    }
}

/// A cube to emit: its world-space center and which faces to skip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubeSpawn {
    /// Center of the unit cube.
    pub center: Point3,
    /// Faces to cull.
    pub mask: FaceMask,
}

/// Half the edge length of an emitted cube.
pub const HALF_BLOCK: f32 = 0.5;

/// Whether a cell value counts as solid. Values equal to the threshold do not.
#[inline]
pub fn is_solid(value: f32, threshold: f32) -> bool {
    value > threshold
}

/// World X (or Z) coordinate of the center of cell `index` on an axis of
/// `size` cells, with the axis centered on the origin.
#[inline]
pub fn centered_coord(index: usize, size: usize) -> f32 {
    index as f32 + 0.5 - size as f32 * 0.5
}

/// Emit the visible faces of one unit cube.
///
/// Each visible face becomes a quad of four fresh vertices and two triangles.
/// Culled faces produce nothing.
pub fn emit_cube(assembler: &mut MeshAssembler, center: Point3, mask: FaceMask) {
    for face in CubeFace::ALL {
        if mask.is_culled(face) {
            continue;
        }
        let corners = face.corners().map(|(dx, dy, dz)| {
            center + Point3::new(dx * HALF_BLOCK, dy * HALF_BLOCK, dz * HALF_BLOCK)
        });
        assembler.push_quad(corners);
    }
}

/// Plan the cubes of a single-layer block mesh.
///
/// The four lateral faces are culled against in-bounds solid neighbors, the
/// top is always kept and the bottom always culled.
pub fn plan_blocks_2d(field: &ScalarField2D, threshold: f32) -> Vec<CubeSpawn> {
    let (width, height) = field.dims();
    let solid_at = |i: i64, j: i64| field.get_signed(i, j).is_some_and(|v| is_solid(v, threshold));

    let mut spawns = Vec::new();
    for j in 0..height {
        for i in 0..width {
            if !is_solid(field[(i, j)], threshold) {
                continue;
            }

            let (si, sj) = (i as i64, j as i64);
            let mut mask = FaceMask::NONE;
            mask.set(CubeFace::Bottom, true);
            for face in [CubeFace::Front, CubeFace::Right, CubeFace::Back, CubeFace::Left] {
                let (di, dj, _) = face.field_step();
                mask.set(face, solid_at(si + di, sj + dj));
            }

            spawns.push(CubeSpawn {
                center: Point3::new(
                    centered_coord(i, width),
                    HALF_BLOCK,
                    centered_coord(j, height),
                ),
                mask,
            });
        }
    }
    spawns
}

/// Plan the cubes of a volumetric block mesh.
///
/// All six faces are culled against in-bounds solid neighbors. The bottom
/// face of layer `k == 0` is always culled since the ground is never seen
/// from below. With `always_fill_bottom` the cubes are raised by half a block.
pub fn plan_blocks_3d(
    field: &ScalarField3D,
    threshold: f32,
    always_fill_bottom: bool,
) -> Vec<CubeSpawn> {
    let (width, height, depth) = field.dims();
    let solid_at = |i: i64, j: i64, k: i64| {
        field
            .get_signed(i, j, k)
            .is_some_and(|v| is_solid(v, threshold))
    };
    let y_offset = if always_fill_bottom { HALF_BLOCK } else { 0.0 };

    let mut spawns = Vec::new();
    for k in 0..depth {
        for j in 0..height {
            for i in 0..width {
                if !is_solid(field[(i, j, k)], threshold) {
                    continue;
                }

                let (si, sj, sk) = (i as i64, j as i64, k as i64);
                let mut mask = FaceMask::NONE;
                for face in CubeFace::ALL {
                    let (di, dj, dk) = face.field_step();
                    mask.set(face, solid_at(si + di, sj + dj, sk + dk));
                }
                if k == 0 {
                    mask.set(CubeFace::Bottom, true);
                }

                spawns.push(CubeSpawn {
                    center: Point3::new(
                        centered_coord(i, width),
                        k as f32 + y_offset,
                        centered_coord(j, height),
                    ),
                    mask,
                });
            }
        }
    }
    spawns
}

fn emit_all(spawns: &[CubeSpawn]) -> Mesh {
    let faces: usize = spawns.iter().map(|s| s.mask.visible_count()).sum();
    let mut assembler = MeshAssembler::with_capacity(faces * 4, faces * 2);
    for spawn in spawns {
        emit_cube(&mut assembler, spawn.center, spawn.mask);
    }
    assembler.build()
}

/// Mesh a 2D field as a single layer of cubes.
pub fn mesh_blocks_2d(field: &ScalarField2D, threshold: f32) -> Mesh {
    emit_all(&plan_blocks_2d(field, threshold))
}

/// Mesh a 3D field as stacked cubes.
pub fn mesh_blocks_3d(field: &ScalarField3D, threshold: f32, always_fill_bottom: bool) -> Mesh {
    emit_all(&plan_blocks_3d(field, threshold, always_fill_bottom))
}
