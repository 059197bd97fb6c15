//! Dense scalar fields.
//!
//! A field stores one normalized value per grid cell in row-major order
//! (`i` fastest, then `j`, then `k`). The shape is fixed at construction.
//!
//! Two access styles are provided:
//!
//! - [`ScalarField2D::get`] / [`ScalarField2D::set`] return
//!   [`LoamCoreError::IndexOutOfRange`] for coordinates outside the grid.
//! - Indexing (`field[(i, j)]`) panics on out-of-range coordinates. Meshers use
//!   it inside loops whose bounds come from the field itself.
//!
//! Neither style clamps or wraps: a bad coordinate is a bug in the caller.

use core::ops::{Index, IndexMut};

use crate::error::{LoamCoreError, Result};

#[inline]
fn check_axis(axis: &'static str, index: usize, size: usize) -> Result<()> {
    if index < size {
        Ok(())
    } else {
        Err(LoamCoreError::IndexOutOfRange { axis, index, size })
    }
}

#[inline]
fn signed_axis(index: i64, size: usize) -> Option<usize> {
    if index >= 0 && (index as u64) < size as u64 {
        Some(index as usize)
    } else {
        None
    }
}

/// A dense 2D grid of scalar values.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarField2D {
    width: usize,
    height: usize,
    values: Vec<f32>,
}

impl ScalarField2D {
    /// Create a field of `width × height` cells, all zero.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            values: vec![0.0; width * height],
        }
    }

    /// Create a field from row-major values.
    ///
    /// # Errors
    /// Returns `DimensionMismatch` if `values.len() != width * height`.
    pub fn from_values(width: usize, height: usize, values: Vec<f32>) -> Result<Self> {
        let expected = width * height;
        if values.len() != expected {
            return Err(LoamCoreError::DimensionMismatch {
                expected,
                got: values.len(),
            });
        }
        Ok(Self {
            width,
            height,
            values,
        })
    }

    /// Create a field with every cell set to `value`.
    pub fn filled(width: usize, height: usize, value: f32) -> Self {
        Self {
            width,
            height,
            values: vec![value; width * height],
        }
    }

    /// Number of cells along `i`.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of cells along `j`.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`.
    #[inline]
    pub fn dims(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the field has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Row-major view of all values.
    #[inline]
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    #[inline]
    fn flat_index(&self, i: usize, j: usize) -> Result<usize> {
        check_axis("i", i, self.width)?;
        check_axis("j", j, self.height)?;
        Ok(i + j * self.width)
    }

    /// Read the value at `(i, j)`.
    pub fn get(&self, i: usize, j: usize) -> Result<f32> {
        self.flat_index(i, j).map(|idx| self.values[idx])
    }

    /// Write the value at `(i, j)`.
    pub fn set(&mut self, i: usize, j: usize, value: f32) -> Result<()> {
        let idx = self.flat_index(i, j)?;
        self.values[idx] = value;
        Ok(())
    }

    /// Read a possibly out-of-grid neighbor; `None` outside the grid.
    #[inline]
    pub fn get_signed(&self, i: i64, j: i64) -> Option<f32> {
        let i = signed_axis(i, self.width)?;
        let j = signed_axis(j, self.height)?;
        Some(self.values[i + j * self.width])
    }

    /// Iterate over `(i, j, value)` in storage order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f32)> + '_ {
        let width = self.width.max(1);
        self.values
            .iter()
            .enumerate()
            .map(move |(idx, &v)| (idx % width, idx / width, v))
    }
}

impl Index<(usize, usize)> for ScalarField2D {
    type Output = f32;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &f32 {
        match self.flat_index(i, j) {
            Ok(idx) => &self.values[idx],
            Err(err) => panic!("{}", err),
        }
    }
}

impl IndexMut<(usize, usize)> for ScalarField2D {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut f32 {
        match self.flat_index(i, j) {
            Ok(idx) => &mut self.values[idx],
            Err(err) => panic!("{}", err),
        }
    }
}

/// A dense 3D grid of scalar values. `k` is the vertical (layer) axis.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarField3D {
    width: usize,
    height: usize,
    depth: usize,
    values: Vec<f32>,
}

impl ScalarField3D {
    /// Create a field of `width × height × depth` cells, all zero.
    pub fn new(width: usize, height: usize, depth: usize) -> Self {
        Self {
            width,
            height,
            depth,
            values: vec![0.0; width * height * depth],
        }
    }

    /// Create a field from values ordered `i + j*width + k*width*height`.
    ///
    /// # Errors
    /// Returns `DimensionMismatch` if the length does not match the shape.
    pub fn from_values(
        width: usize,
        height: usize,
        depth: usize,
        values: Vec<f32>,
    ) -> Result<Self> {
        let expected = width * height * depth;
        if values.len() != expected {
            return Err(LoamCoreError::DimensionMismatch {
                expected,
                got: values.len(),
            });
        }
        Ok(Self {
            width,
            height,
            depth,
            values,
        })
    }

    /// Create a field with every cell set to `value`.
    pub fn filled(width: usize, height: usize, depth: usize, value: f32) -> Self {
        Self {
            width,
            height,
            depth,
            values: vec![value; width * height * depth],
        }
    }

    /// Number of cells along `i`.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of cells along `j`.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of layers along `k`.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// `(width, height, depth)`.
    #[inline]
    pub fn dims(&self) -> (usize, usize, usize) {
        (self.width, self.height, self.depth)
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the field has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Flat view of all values.
    #[inline]
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    #[inline]
    fn flat_index(&self, i: usize, j: usize, k: usize) -> Result<usize> {
        check_axis("i", i, self.width)?;
        check_axis("j", j, self.height)?;
        check_axis("k", k, self.depth)?;
        Ok(i + j * self.width + k * self.width * self.height)
    }

    /// Read the value at `(i, j, k)`.
    pub fn get(&self, i: usize, j: usize, k: usize) -> Result<f32> {
        self.flat_index(i, j, k).map(|idx| self.values[idx])
    }

    /// Write the value at `(i, j, k)`.
    pub fn set(&mut self, i: usize, j: usize, k: usize, value: f32) -> Result<()> {
        let idx = self.flat_index(i, j, k)?;
        self.values[idx] = value;
        Ok(())
    }

    /// Read a possibly out-of-grid neighbor; `None` outside the grid.
    #[inline]
    pub fn get_signed(&self, i: i64, j: i64, k: i64) -> Option<f32> {
        let i = signed_axis(i, self.width)?;
        let j = signed_axis(j, self.height)?;
        let k = signed_axis(k, self.depth)?;
        Some(self.values[i + j * self.width + k * self.width * self.height])
    }

    /// Copy out one horizontal layer as a 2D field.
    ///
    /// # Errors
    /// Returns `IndexOutOfRange` if `k >= depth`.
    pub fn layer(&self, k: usize) -> Result<ScalarField2D> {
        check_axis("k", k, self.depth)?;
        let stride = self.width * self.height;
        let start = k * stride;
        ScalarField2D::from_values(
            self.width,
            self.height,
            self.values[start..start + stride].to_vec(),
        )
    }
}

impl Index<(usize, usize, usize)> for ScalarField3D {
    type Output = f32;

    #[inline]
    fn index(&self, (i, j, k): (usize, usize, usize)) -> &f32 {
        match self.flat_index(i, j, k) {
            Ok(idx) => &self.values[idx],
            Err(err) => panic!("{}", err),
        }
    }
}

impl IndexMut<(usize, usize, usize)> for ScalarField3D {
    #[inline]
    fn index_mut(&mut self, (i, j, k): (usize, usize, usize)) -> &mut f32 {
        match self.flat_index(i, j, k) {
            Ok(idx) => &mut self.values[idx],
            Err(err) => panic!("{}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_field_is_zeroed() {
        let field = ScalarField2D::new(3, 2);
        assert_eq!(field.dims(), (3, 2));
        assert!(field.values().iter().all(|&v| v == 0.0));

        let field = ScalarField3D::new(2, 2, 4);
        assert_eq!(field.len(), 16);
        assert!(field.values().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_get_set_roundtrip() {
        let mut field = ScalarField2D::new(4, 3);
        field.set(3, 2, 0.75).unwrap();
        assert_eq!(field.get(3, 2).unwrap(), 0.75);
        assert_eq!(field[(3, 2)], 0.75);
        assert_eq!(field.values()[3 + 2 * 4], 0.75);

        let mut field = ScalarField3D::new(2, 3, 4);
        field.set(1, 2, 3, 0.5).unwrap();
        assert_eq!(field[(1, 2, 3)], 0.5);
        assert_eq!(field.values()[1 + 2 * 2 + 3 * 6], 0.5);
    }

    #[test]
    fn test_out_of_range_is_reported() {
        let mut field = ScalarField2D::new(4, 3);
        assert_eq!(
            field.get(4, 0),
            Err(LoamCoreError::IndexOutOfRange {
                axis: "i",
                index: 4,
                size: 4
            })
        );
        assert!(field.set(0, 3, 1.0).is_err());

        let field = ScalarField3D::new(2, 2, 2);
        assert_eq!(
            field.get(0, 0, 2),
            Err(LoamCoreError::IndexOutOfRange {
                axis: "k",
                index: 2,
                size: 2
            })
        );
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_index_panics_out_of_range() {
        let field = ScalarField2D::new(2, 2);
        let _ = field[(0, 2)];
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_index_3d_panics_out_of_range() {
        let mut field = ScalarField3D::new(2, 2, 2);
        field[(2, 0, 0)] = 1.0;
    }

    #[test]
    fn test_signed_neighbors() {
        let field = ScalarField2D::filled(2, 2, 1.0);
        assert_eq!(field.get_signed(-1, 0), None);
        assert_eq!(field.get_signed(1, 1), Some(1.0));
        assert_eq!(field.get_signed(0, 2), None);

        let field = ScalarField3D::filled(1, 1, 1, 0.5);
        assert_eq!(field.get_signed(0, 0, -1), None);
        assert_eq!(field.get_signed(0, 0, 0), Some(0.5));
    }

    #[test]
    fn test_from_values_validates_shape() {
        assert!(ScalarField2D::from_values(2, 2, vec![0.0; 3]).is_err());
        assert!(ScalarField3D::from_values(2, 2, 2, vec![0.0; 8]).is_ok());
    }

    #[test]
    fn test_layer_extraction() {
        let mut field = ScalarField3D::new(2, 2, 3);
        field[(1, 0, 2)] = 0.25;
        let layer = field.layer(2).unwrap();
        assert_eq!(layer[(1, 0)], 0.25);
        assert!(field.layer(3).is_err());
    }

    #[test]
    fn test_iter_yields_coordinates() {
        let field = ScalarField2D::from_values(2, 2, vec![0.0, 0.1, 0.2, 0.3]).unwrap();
        let cells: Vec<_> = field.iter().collect();
        assert_eq!(cells[1], (1, 0, 0.1));
        assert_eq!(cells[2], (0, 1, 0.2));
    }
}
