//! Field construction from images.
//!
//! Two stages turn a picture into something the meshers consume:
//!
//! 1. [`build_luminance_field`] reduces every pixel to its BT.709 luma.
//! 2. [`extrude_to_height_field`] sweeps each column of the 2D field upward and
//!    records how much of the column's height budget is filled at each layer.
//!
//! The extruded field is a "column fill" volume: layers below the column's
//! height read `1`, the layer containing the top reads the fractional remainder,
//! and everything above reads `0`.

use crate::error::{LoamCoreError, Result};
use crate::field::{ScalarField2D, ScalarField3D};
use crate::traits::PixelSource;

/// BT.709 luma weight for red.
pub const LUMA_R: f32 = 0.2126;
/// BT.709 luma weight for green.
pub const LUMA_G: f32 = 0.7152;
/// BT.709 luma weight for blue.
pub const LUMA_B: f32 = 0.0722;

/// Perceptual brightness of an RGB triple.
#[inline]
pub fn luma(rgb: [f32; 3]) -> f32 {
    LUMA_R * rgb[0] + LUMA_G * rgb[1] + LUMA_B * rgb[2]
}

/// Build a 2D field holding the luma of every pixel.
///
/// With `invert`, bright pixels become low terrain (`1 - luma`).
pub fn build_luminance_field<P: PixelSource>(image: &P, invert: bool) -> ScalarField2D {
    let mut field = ScalarField2D::new(image.width(), image.height());

    for y in 0..field.height() {
        for x in 0..field.width() {
            let l = luma(image.rgb(x, y));
            field[(x, y)] = if invert { 1.0 - l } else { l };
        }
    }

    field
}

/// Number of layers produced by [`extrude_to_height_field`].
#[inline]
pub fn extruded_depth(max_height: u32, always_fill_bottom: bool) -> usize {
    max_height as usize + if always_fill_bottom { 2 } else { 1 }
}

/// Fill fraction of one layer of a column with normalized height `value`.
#[inline]
fn layer_fill(value: f32, floor: f32, scale: f32) -> f32 {
    ((value - floor) * scale).clamp(0.0, 1.0)
}

/// Extrude a 2D field into a 3D column-fill field.
///
/// The output has `max_height + 1` layers, or `max_height + 2` with
/// `always_fill_bottom`. Layer `k` holds
/// `clamp((value - floor_k) * max_height, 0, 1)` where `floor_k` advances by
/// `1 / max_height` per layer, starting at zero.
///
/// With `always_fill_bottom`, layers 0 and 1 are forced to `1` so the terrain
/// never has holes at its base, and the floor sweep starts at layer 1.
///
/// # Errors
/// Returns `ZeroMaxHeight` when `max_height == 0`.
pub fn extrude_to_height_field(
    field: &ScalarField2D,
    max_height: u32,
    always_fill_bottom: bool,
) -> Result<ScalarField3D> {
    if max_height == 0 {
        return Err(LoamCoreError::ZeroMaxHeight);
    }

    let (width, height) = field.dims();
    let depth = extruded_depth(max_height, always_fill_bottom);
    let scale = max_height as f32;
    let first_swept = if always_fill_bottom { 1 } else { 0 };
    let stride = width * height;

    let mut values = vec![0.0f32; stride * depth];

    for (cell, &value) in field.values().iter().enumerate() {
        for k in 0..depth {
            let fill = if always_fill_bottom && k <= 1 {
                1.0
            } else {
                let floor = (k - first_swept) as f32 / scale;
                layer_fill(value, floor, scale)
            };
            values[cell + k * stride] = fill;
        }
    }

    ScalarField3D::from_values(width, height, depth, values)
}
