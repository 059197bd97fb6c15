//! Mesh generation algorithm selection.

use core::fmt;
use core::str::FromStr;

use crate::marching_cubes::Interpolation;

/// The five ways a field can be turned into geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    /// One layer of cubes from the luminance field.
    #[cfg_attr(feature = "serde", serde(rename = "block2d"))]
    Block2D,
    /// Stacked cubes from the extruded height field.
    #[cfg_attr(feature = "serde", serde(rename = "block3d"))]
    Block3D,
    /// Displaced grid from the luminance field.
    #[cfg_attr(feature = "serde", serde(rename = "heightmap"))]
    Heightmap,
    /// Marching cubes with midpoint edge vertices.
    #[cfg_attr(feature = "serde", serde(rename = "marching_cubes_simple"))]
    MarchingCubesSimple,
    /// Marching cubes with interpolated edge vertices.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "marching_cubes_advanced"))]
    MarchingCubesAdvanced,
}

impl Algorithm {
    /// Every algorithm, in declaration order.
    pub const ALL: [Algorithm; 5] = [
        Algorithm::Block2D,
        Algorithm::Block3D,
        Algorithm::Heightmap,
        Algorithm::MarchingCubesSimple,
        Algorithm::MarchingCubesAdvanced,
    ];

    /// Whether the algorithm consumes the extruded 3D field.
    #[inline]
    pub const fn requires_volume(self) -> bool {
        matches!(
            self,
            Algorithm::Block3D | Algorithm::MarchingCubesSimple | Algorithm::MarchingCubesAdvanced
        )
    }

    /// Edge placement for the marching cubes variants.
    #[inline]
    pub const fn interpolation(self) -> Option<Interpolation> {
        match self {
            Algorithm::MarchingCubesSimple => Some(Interpolation::Midpoint),
            Algorithm::MarchingCubesAdvanced => Some(Interpolation::Linear),
            _ => None,
        }
    }

    /// Stable lowercase name, as accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            Algorithm::Block2D => "block2d",
            Algorithm::Block3D => "block3d",
            Algorithm::Heightmap => "heightmap",
            Algorithm::MarchingCubesSimple => "marching_cubes_simple",
            Algorithm::MarchingCubesAdvanced => "marching_cubes_advanced",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown algorithm name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown algorithm '{0}' (expected one of: block2d, block3d, heightmap, marching_cubes_simple, marching_cubes_advanced)")]
pub struct ParseAlgorithmError(pub String);

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Algorithm::ALL
            .into_iter()
            .find(|a| a.name() == normalized)
            .ok_or_else(|| ParseAlgorithmError(s.to_string()))
    }
}
