//! Mesh buffers and assembly.
//!
//! Every mesher writes into a [`MeshAssembler`], which concatenates triangles
//! into one [`Mesh`]. Block and isosurface output is never welded: faces that
//! meet at an edge each keep their own vertex copies. Only the height grid
//! shares vertices between neighboring triangles.

use crate::types::{Color, Point3};

/// A triangle represented by three vertices.
pub type Triangle = [Point3; 3];

/// Indexed triangle mesh with optional per-vertex colors.
///
/// Invariants: every index is `< positions.len()`; triangles wind
/// counter-clockwise when seen from outside (right-hand rule); `colors`, when
/// present, is parallel to `positions`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Vertex positions.
    pub positions: Vec<Point3>,
    /// Triangle index triples into `positions`.
    pub triangles: Vec<[u32; 3]>,
    /// Optional per-vertex colors.
    pub colors: Option<Vec<Color>>,
}

impl Mesh {
    /// Create an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// True when the mesh has no triangles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Resolve triangle `index` to its three positions.
    #[inline]
    pub fn triangle(&self, index: usize) -> Triangle {
        let [a, b, c] = self.triangles[index];
        [
            self.positions[a as usize],
            self.positions[b as usize],
            self.positions[c as usize],
        ]
    }

    /// Iterate over resolved triangles.
    pub fn iter_triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        (0..self.triangles.len()).map(move |i| self.triangle(i))
    }

    /// Unnormalized face normal (right-hand rule) of triangle `index`.
    #[inline]
    pub fn face_normal(&self, index: usize) -> Point3 {
        let [a, b, c] = self.triangle(index);
        (b - a).cross(c - a)
    }

    /// Check the index and color invariants.
    pub fn is_valid(&self) -> bool {
        let n = self.positions.len() as u64;
        let indices_ok = self
            .triangles
            .iter()
            .all(|t| t.iter().all(|&i| (i as u64) < n));
        let colors_ok = self
            .colors
            .as_ref()
            .map_or(true, |c| c.len() == self.positions.len());
        indices_ok && colors_ok
    }

    /// Drop any vertex colors.
    pub fn clear_colors(&mut self) {
        self.colors = None;
    }
}

/// Convert a vertex count into the index of the next vertex.
///
/// # Panics
/// Panics when `len` does not fit the `u32` index buffer.
#[inline]
fn vertex_index(len: usize) -> u32 {
    match u32::try_from(len) {
        Ok(index) => index,
        Err(_) => panic!("mesh vertex count {} exceeds the u32 index range", len),
    }
}

/// Accumulates emitted primitives into a single [`Mesh`].
///
/// Indices are `u32`; pushing past `u32::MAX` vertices panics.
#[derive(Debug, Default)]
pub struct MeshAssembler {
    mesh: Mesh,
}

impl MeshAssembler {
    /// Create an empty assembler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an assembler with room for the given number of vertices and
    /// triangles.
    pub fn with_capacity(vertices: usize, triangles: usize) -> Self {
        Self {
            mesh: Mesh {
                positions: Vec::with_capacity(vertices),
                triangles: Vec::with_capacity(triangles),
                colors: None,
            },
        }
    }

    /// Add a vertex and return its index.
    #[inline]
    pub fn push_vertex(&mut self, position: Point3) -> u32 {
        let index = vertex_index(self.mesh.positions.len());
        self.mesh.positions.push(position);
        index
    }

    /// Add a triangle over already-pushed vertices.
    #[inline]
    pub fn push_indices(&mut self, a: u32, b: u32, c: u32) {
        self.mesh.triangles.push([a, b, c]);
    }

    /// Add a free-standing triangle (three fresh vertices).
    #[inline]
    pub fn push_triangle(&mut self, triangle: Triangle) {
        let base = self.push_vertex(triangle[0]);
        self.push_vertex(triangle[1]);
        self.push_vertex(triangle[2]);
        self.mesh.triangles.push([base, base + 1, base + 2]);
    }

    /// Add a planar quad given counter-clockwise corners (four fresh vertices,
    /// two triangles).
    #[inline]
    pub fn push_quad(&mut self, corners: [Point3; 4]) {
        let base = self.push_vertex(corners[0]);
        for &corner in &corners[1..] {
            self.push_vertex(corner);
        }
        self.mesh.triangles.push([base, base + 1, base + 2]);
        self.mesh.triangles.push([base, base + 2, base + 3]);
    }

    /// Append another mesh, offsetting its indices. Colors are kept only when
    /// both sides carry them.
    pub fn append(&mut self, other: &Mesh) {
        if other.positions.is_empty() {
            return;
        }
        let offset = vertex_index(self.mesh.positions.len());
        // the last appended vertex must stay addressable too
        vertex_index(self.mesh.positions.len() + other.positions.len() - 1);
        let had_vertices = offset > 0;

        self.mesh.colors = match (self.mesh.colors.take(), &other.colors) {
            (Some(mut mine), Some(theirs)) => {
                mine.extend_from_slice(theirs);
                Some(mine)
            }
            (None, Some(theirs)) if !had_vertices => Some(theirs.clone()),
            _ => None,
        };

        self.mesh.positions.extend_from_slice(&other.positions);
        self.mesh.triangles.extend(
            other
                .triangles
                .iter()
                .map(|t| [t[0] + offset, t[1] + offset, t[2] + offset]),
        );
    }

    /// Number of vertices pushed so far.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.mesh.positions.len()
    }

    /// Number of triangles pushed so far.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.mesh.triangles.len()
    }

    /// Finish and return the mesh.
    pub fn build(self) -> Mesh {
        self.mesh
    }
}

/// Mesh statistics after extraction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshStats {
    /// Total number of triangles.
    pub triangle_count: usize,
    /// Total number of vertices.
    pub vertex_count: usize,
    /// Sum of triangle areas.
    pub surface_area: f32,
    /// Bounding box minimum (zero for an empty mesh).
    pub bbox_min: Point3,
    /// Bounding box maximum (zero for an empty mesh).
    pub bbox_max: Point3,
}

impl MeshStats {
    /// Compute statistics for a mesh.
    pub fn from_mesh(mesh: &Mesh) -> Self {
        let mut surface_area = 0.0;
        let mut bbox_min = Point3::splat(f32::MAX);
        let mut bbox_max = Point3::splat(f32::MIN);

        for &v in &mesh.positions {
            bbox_min = bbox_min.min(v);
            bbox_max = bbox_max.max(v);
        }

        for i in 0..mesh.triangle_count() {
            surface_area += mesh.face_normal(i).length() * 0.5;
        }

        if mesh.positions.is_empty() {
            bbox_min = Point3::default();
            bbox_max = Point3::default();
        }

        Self {
            triangle_count: mesh.triangle_count(),
            vertex_count: mesh.vertex_count(),
            surface_area,
            bbox_min,
            bbox_max,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_triangle_and_quad() {
        let mut asm = MeshAssembler::new();
        asm.push_triangle([
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]);
        asm.push_quad([
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(0.0, 1.0, 1.0),
        ]);
        let mesh = asm.build();

        assert_eq!(mesh.vertex_count(), 7);
        assert_eq!(mesh.triangle_count(), 3);
        assert_eq!(mesh.triangles[1], [3, 4, 5]);
        assert_eq!(mesh.triangles[2], [3, 5, 6]);
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_face_normal_right_hand_rule() {
        let mut asm = MeshAssembler::new();
        asm.push_triangle([
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]);
        let mesh = asm.build();
        assert_eq!(mesh.face_normal(0), Point3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_append_offsets_indices() {
        let mut a = MeshAssembler::new();
        a.push_triangle([Point3::splat(0.0), Point3::splat(1.0), Point3::splat(2.0)]);
        let first = a.build();

        let mut asm = MeshAssembler::new();
        asm.append(&first);
        asm.append(&first);
        let mesh = asm.build();

        assert_eq!(mesh.triangles, vec![[0, 1, 2], [3, 4, 5]]);
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_append_mixed_colors_drops_colors() {
        let colored = Mesh {
            positions: vec![Point3::splat(0.0); 3],
            triangles: vec![[0, 1, 2]],
            colors: Some(vec![Color::WHITE; 3]),
        };
        let plain = Mesh {
            colors: None,
            ..colored.clone()
        };

        let mut asm = MeshAssembler::new();
        asm.append(&colored);
        assert!(asm.mesh.colors.is_some());
        asm.append(&plain);
        let mesh = asm.build();
        assert!(mesh.colors.is_none());
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_append_empty_mesh_keeps_colors() {
        let colored = Mesh {
            positions: vec![Point3::splat(0.0); 3],
            triangles: vec![[0, 1, 2]],
            colors: Some(vec![Color::WHITE; 3]),
        };

        let mut asm = MeshAssembler::new();
        asm.append(&colored);
        asm.append(&Mesh::new());
        let mesh = asm.build();

        assert_eq!(mesh.colors.as_ref().map(Vec::len), Some(3));
        assert_eq!(mesh.triangle_count(), 1);
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_vertex_index_limit() {
        assert_eq!(vertex_index(0), 0);
        assert_eq!(vertex_index(u32::MAX as usize), u32::MAX);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    #[should_panic(expected = "exceeds the u32 index range")]
    fn test_vertex_index_overflow_panics() {
        vertex_index(u32::MAX as usize + 1);
    }

    #[test]
    fn test_invalid_index_detected() {
        let mesh = Mesh {
            positions: vec![Point3::splat(0.0); 2],
            triangles: vec![[0, 1, 2]],
            colors: None,
        };
        assert!(!mesh.is_valid());
    }

    #[test]
    fn test_mesh_stats() {
        let mut asm = MeshAssembler::new();
        asm.push_quad([
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, 0.0),
        ]);
        let stats = MeshStats::from_mesh(&asm.build());

        assert_eq!(stats.triangle_count, 2);
        assert_eq!(stats.vertex_count, 4);
        assert!((stats.surface_area - 1.0).abs() < 1e-6);
        assert_eq!(stats.bbox_max, Point3::new(1.0, 0.0, 1.0));
    }

    #[test]
    fn test_mesh_stats_empty() {
        let stats = MeshStats::from_mesh(&Mesh::new());
        assert_eq!(stats.triangle_count, 0);
        assert_eq!(stats.bbox_min, Point3::default());
    }
}
