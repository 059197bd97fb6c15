//! Height-mapped vertex coloring.
//!
//! A [`Gradient`] maps a normalized parameter in `[0, 1]` to a color by
//! blending between sorted keys. [`color_by_height`] samples it once per
//! vertex using the vertex height.

use crate::error::{LoamCoreError, Result};
use crate::mesh::Mesh;
use crate::types::Color;

/// A color stop on a gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GradientKey {
    /// Position of the stop in `[0, 1]`.
    pub time: f32,
    /// Color at the stop.
    pub color: Color,
}

impl GradientKey {
    /// Create a new key.
    #[inline]
    pub const fn new(time: f32, color: Color) -> Self {
        Self { time, color }
    }
}

/// Piecewise-linear color gradient.
///
/// Keys are kept sorted by `time`. Parameters before the first key or after
/// the last key take the color of that key.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<GradientKey>", into = "Vec<GradientKey>"))]
pub struct Gradient {
    keys: Vec<GradientKey>,
}

impl Gradient {
    /// Build a gradient from keys in any order.
    ///
    /// # Errors
    /// Returns `EmptyGradient` if `keys` is empty.
    pub fn new(mut keys: Vec<GradientKey>) -> Result<Self> {
        if keys.is_empty() {
            return Err(LoamCoreError::EmptyGradient);
        }
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        Ok(Self { keys })
    }

    /// Black at the bottom, white at the top.
    pub fn grayscale() -> Self {
        Self {
            keys: vec![
                GradientKey::new(0.0, Color::BLACK),
                GradientKey::new(1.0, Color::WHITE),
            ],
        }
    }

    /// Water, sand, grass, rock and snow bands.
    pub fn terrain() -> Self {
        Self {
            keys: vec![
                GradientKey::new(0.0, Color::rgb(0.09, 0.22, 0.45)),
                GradientKey::new(0.15, Color::rgb(0.85, 0.78, 0.55)),
                GradientKey::new(0.35, Color::rgb(0.30, 0.55, 0.20)),
                GradientKey::new(0.70, Color::rgb(0.45, 0.40, 0.35)),
                GradientKey::new(1.0, Color::WHITE),
            ],
        }
    }

    /// The sorted keys.
    #[inline]
    pub fn keys(&self) -> &[GradientKey] {
        &self.keys
    }

    /// Sample the gradient at `t` (clamped to `[0, 1]`).
    pub fn evaluate(&self, t: f32) -> Color {
        let t = clamp01(t);
        let first = self.keys[0];
        if t <= first.time {
            return first.color;
        }

        for pair in self.keys.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.time {
                let span = b.time - a.time;
                if span <= 0.0 {
                    return b.color;
                }
                return a.color.lerp(b.color, (t - a.time) / span);
            }
        }

        self.keys[self.keys.len() - 1].color
    }
}

impl Default for Gradient {
    fn default() -> Self {
        Self::grayscale()
    }
}

impl TryFrom<Vec<GradientKey>> for Gradient {
    type Error = LoamCoreError;

    fn try_from(keys: Vec<GradientKey>) -> Result<Self> {
        Self::new(keys)
    }
}

impl From<Gradient> for Vec<GradientKey> {
    fn from(gradient: Gradient) -> Self {
        gradient.keys
    }
}

/// Clamp to `[0, 1]`, mapping NaN to 0.
#[inline]
pub fn clamp01(v: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

/// Assign a gradient color to every vertex from its height.
///
/// The gradient is sampled at `clamp01(y / max_height * scale + offset)`.
/// Existing colors are replaced.
pub fn color_by_height(
    mesh: &mut Mesh,
    gradient: &Gradient,
    max_height: f32,
    offset: f32,
    scale: f32,
) {
    let colors = mesh
        .positions
        .iter()
        .map(|p| gradient.evaluate(clamp01(p.y / max_height * scale + offset)))
        .collect();
    mesh.colors = Some(colors);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Point3;

    #[test]
    fn test_gradient_endpoints_and_midpoint() {
        let g = Gradient::grayscale();
        assert_eq!(g.evaluate(0.0), Color::BLACK);
        assert_eq!(g.evaluate(1.0), Color::WHITE);
        assert!((g.evaluate(0.25).r - 0.25).abs() < 1e-6);
        assert_eq!(g.evaluate(-3.0), Color::BLACK);
        assert_eq!(g.evaluate(7.0), Color::WHITE);
    }

    #[test]
    fn test_gradient_sorts_keys() {
        let g = Gradient::new(vec![
            GradientKey::new(1.0, Color::WHITE),
            GradientKey::new(0.0, Color::BLACK),
        ])
        .unwrap();
        assert_eq!(g.keys()[0].time, 0.0);
    }

    #[test]
    fn test_empty_gradient_rejected() {
        assert_eq!(Gradient::new(Vec::new()), Err(LoamCoreError::EmptyGradient));
    }

    #[test]
    fn test_single_key_gradient_is_constant() {
        let red = Color::rgb(1.0, 0.0, 0.0);
        let g = Gradient::new(vec![GradientKey::new(0.5, red)]).unwrap();
        assert_eq!(g.evaluate(0.0), red);
        assert_eq!(g.evaluate(1.0), red);
    }

    #[test]
    fn test_color_by_height() {
        let mut mesh = Mesh {
            positions: vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(0.0, 5.0, 0.0),
                Point3::new(0.0, 20.0, 0.0),
            ],
            triangles: vec![[0, 1, 2]],
            colors: None,
        };

        color_by_height(&mut mesh, &Gradient::grayscale(), 10.0, 0.0, 1.0);
        let colors = mesh.colors.as_ref().unwrap();
        assert_eq!(colors[0], Color::BLACK);
        assert!((colors[1].g - 0.5).abs() < 1e-6);
        assert_eq!(colors[2], Color::WHITE);
    }

    #[test]
    fn test_color_by_height_offset_and_scale() {
        let mut mesh = Mesh {
            positions: vec![Point3::new(0.0, 2.0, 0.0)],
            triangles: Vec::new(),
            colors: None,
        };
        // 2 / 10 * 2 + 0.1 = 0.5
        color_by_height(&mut mesh, &Gradient::grayscale(), 10.0, 0.1, 2.0);
        assert!((mesh.colors.unwrap()[0].r - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_clamp01_nan() {
        assert_eq!(clamp01(f32::NAN), 0.0);
        assert_eq!(clamp01(2.0), 1.0);
    }
}
