//! Generation profiles.
//!
//! A [`GenerationProfile`] bundles every parameter that shapes a terrain mesh.
//! Profiles are stored as JSON and are always loaded or saved whole: a file
//! that fails validation is rejected, and saving goes through a temporary
//! sibling file that is renamed over the target.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use loam_core::{Algorithm, Gradient};
use serde::{Deserialize, Serialize};

use crate::error::{LoamIoError, Result};

/// Parameters for one terrain generation run (immutable value object).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationProfile {
    /// Display name of the profile.
    pub name: String,
    /// Height in world units of a full-brightness pixel. Must be > 0.
    pub max_height: u32,
    /// Use `1 - luma` so dark pixels become high ground.
    pub invert: bool,
    /// Solidity threshold in `[0, 1]`.
    pub threshold: f32,
    /// Force the two bottom layers of the height field to be solid.
    pub always_fill_bottom: bool,
    /// Added to the normalized height before sampling the gradient.
    pub color_offset: f32,
    /// Multiplies the normalized height before sampling the gradient.
    pub color_scale: f32,
    /// Meshing algorithm.
    pub algorithm: Algorithm,
    /// Gaussian blur sigma applied to the source image; 0 disables it.
    pub blur_strength: f32,
    /// Vertex color gradient.
    pub gradient: Gradient,
}

impl Default for GenerationProfile {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            max_height: 10,
            invert: false,
            threshold: 0.5,
            always_fill_bottom: false,
            color_offset: 0.0,
            color_scale: 1.0,
            algorithm: Algorithm::default(),
            blur_strength: 0.0,
            gradient: Gradient::default(),
        }
    }
}

impl GenerationProfile {
    /// Check every parameter against its allowed range.
    ///
    /// # Errors
    /// Returns `InvalidProfile` naming the first offending parameter.
    pub fn validate(&self) -> Result<()> {
        if self.max_height == 0 {
            return Err(LoamIoError::invalid_profile("max_height must be greater than 0"));
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(LoamIoError::invalid_profile(format!(
                "threshold {} is outside [0, 1]",
                self.threshold
            )));
        }
        if !self.color_offset.is_finite() || !self.color_scale.is_finite() {
            return Err(LoamIoError::invalid_profile(
                "color_offset and color_scale must be finite",
            ));
        }
        if !self.blur_strength.is_finite() || self.blur_strength < 0.0 {
            return Err(LoamIoError::invalid_profile(format!(
                "blur_strength {} must be a finite value >= 0",
                self.blur_strength
            )));
        }
        Ok(())
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and validate a profile from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let profile: Self = serde_json::from_str(json)?;
        profile.validate()?;
        Ok(profile)
    }
}

/// Temporary sibling used while saving `path`.
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Save a profile as JSON.
///
/// The profile is validated first. Data is written to a temporary file next
/// to `path` and then renamed into place, so readers never see a partial
/// profile.
pub fn save_profile(profile: &GenerationProfile, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    profile.validate()?;

    let staging = staging_path(path);
    {
        let file = File::create(&staging)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, profile)?;
        writer.flush()?;
        writer.get_ref().sync_all()?;
    }

    if let Err(err) = std::fs::rename(&staging, path) {
        // leave no stray staging file behind
        let _ = std::fs::remove_file(&staging);
        return Err(err.into());
    }

    log::debug!("saved profile '{}' to {}", profile.name, path.display());
    Ok(())
}

/// Load and validate a profile from a JSON file.
///
/// Fields missing from the file take their [`Default`] values.
pub fn load_profile(path: impl AsRef<Path>) -> Result<GenerationProfile> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let profile: GenerationProfile = serde_json::from_reader(reader)?;
    profile.validate()?;

    log::debug!("loaded profile '{}' from {}", profile.name, path.display());
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use loam_core::{Color, GradientKey};

    #[test]
    fn test_default_profile() {
        let profile = GenerationProfile::default();
        assert_eq!(profile.max_height, 10);
        assert_eq!(profile.threshold, 0.5);
        assert_eq!(profile.color_scale, 1.0);
        assert_eq!(profile.algorithm, Algorithm::MarchingCubesAdvanced);
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad = [
            GenerationProfile {
                max_height: 0,
                ..Default::default()
            },
            GenerationProfile {
                threshold: 1.5,
                ..Default::default()
            },
            GenerationProfile {
                threshold: f32::NAN,
                ..Default::default()
            },
            GenerationProfile {
                color_scale: f32::INFINITY,
                ..Default::default()
            },
            GenerationProfile {
                blur_strength: -1.0,
                ..Default::default()
            },
        ];
        for profile in bad {
            assert!(
                matches!(profile.validate(), Err(LoamIoError::InvalidProfile { .. })),
                "{:?} should be rejected",
                profile
            );
        }
    }

    #[test]
    fn test_json_roundtrip() {
        let profile = GenerationProfile {
            name: "islands".to_string(),
            algorithm: Algorithm::Block3D,
            gradient: Gradient::terrain(),
            ..Default::default()
        };
        let json = profile.to_json_string().unwrap();
        assert!(json.contains("\"block3d\""));
        assert_eq!(GenerationProfile::from_json_str(&json).unwrap(), profile);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let profile = GenerationProfile::from_json_str(r#"{ "max_height": 4 }"#).unwrap();
        assert_eq!(profile.max_height, 4);
        assert_eq!(profile.threshold, 0.5);
        assert_eq!(profile.gradient, Gradient::grayscale());
    }

    #[test]
    fn test_empty_gradient_rejected() {
        let err = GenerationProfile::from_json_str(r#"{ "gradient": [] }"#).unwrap_err();
        assert!(matches!(err, LoamIoError::Serialization(_)));
    }

    #[test]
    fn test_gradient_alpha_defaults_to_opaque() {
        let json = r#"{ "gradient": [ { "time": 0.0, "color": { "r": 1.0, "g": 0.0, "b": 0.0 } } ] }"#;
        let profile = GenerationProfile::from_json_str(json).unwrap();
        assert_eq!(
            profile.gradient.keys(),
            &[GradientKey::new(0.0, Color::rgb(1.0, 0.0, 0.0))]
        );
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");

        let profile = GenerationProfile {
            invert: true,
            blur_strength: 1.5,
            ..Default::default()
        };
        save_profile(&profile, &path).unwrap();

        assert!(!staging_path(&path).exists());
        assert_eq!(load_profile(&path).unwrap(), profile);
    }

    #[test]
    fn test_save_invalid_leaves_target_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");
        save_profile(&GenerationProfile::default(), &path).unwrap();

        let bad = GenerationProfile {
            max_height: 0,
            ..Default::default()
        };
        assert!(save_profile(&bad, &path).is_err());
        assert_eq!(load_profile(&path).unwrap(), GenerationProfile::default());
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");
        std::fs::write(&path, r#"{ "threshold": 3.0 }"#).unwrap();
        assert!(matches!(
            load_profile(&path),
            Err(LoamIoError::InvalidProfile { .. })
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_profile(dir.path().join("nope.json")),
            Err(LoamIoError::Io(_))
        ));
    }
}
