//! Shared configuration for the masking tools
//!
//! This crate provides the single source of truth for mask brush settings,
//! solid extraction parameters and undo limits. Values are serde-friendly so
//! the host application can persist them alongside its other preferences.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Default brush hardness (0 = soft falloff, 1 = hard edge)
pub const DEFAULT_HARDNESS: f32 = 0.25;

/// Default brush intensity
pub const DEFAULT_INTENSITY: f32 = 1.0;

/// Default shell thickness for extraction (world units)
pub const DEFAULT_THICKNESS: f32 = 1.0;

/// Mask value separating masked (below) from unmasked (at or above) vertices
pub const DEFAULT_MASK_CLAMP: f32 = 0.5;

/// Offset of the front shell from the source surface
pub const DEFAULT_SHELL_EPSILON: f32 = 0.01;

/// Relaxation passes applied to the seam of an extracted shell
pub const DEFAULT_BORDER_SMOOTH_ITERATIONS: usize = 3;

/// Number of mask operations kept for undo
pub const DEFAULT_MAX_UNDO_LEVELS: usize = 64;

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to parse masking config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Mask brush settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaskBrushConfig {
    /// Falloff hardness in [0, 1]
    pub hardness: f32,
    /// Strength of one dab in [0, 1]
    pub intensity: f32,
    /// When set, painting lowers the mask value (masks the surface)
    pub negative: bool,
    /// Skip vertices facing away from the viewer
    pub culling: bool,
}

impl Default for MaskBrushConfig {
    fn default() -> Self {
        Self {
            hardness: DEFAULT_HARDNESS,
            intensity: DEFAULT_INTENSITY,
            negative: true,
            culling: false,
        }
    }
}

/// Solid extraction settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Shell thickness; negative values extrude inward
    pub thickness: f32,
    /// Mask threshold for selection and corner classification
    pub mask_clamp: f32,
    /// Front shell offset along the normal (sign follows thickness)
    pub shell_epsilon: f32,
    /// Laplacian passes applied around the bridge strip
    pub border_smooth_iterations: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            thickness: DEFAULT_THICKNESS,
            mask_clamp: DEFAULT_MASK_CLAMP,
            shell_epsilon: DEFAULT_SHELL_EPSILON,
            border_smooth_iterations: DEFAULT_BORDER_SMOOTH_ITERATIONS,
        }
    }
}

impl ExtractConfig {
    /// Signed front-shell offset: follows the sign of the thickness.
    pub fn signed_epsilon(&self) -> f32 {
        let eps = self.shell_epsilon.abs();
        if self.thickness < 0.0 { -eps } else { eps }
    }

    /// Distance between front and back shell.
    ///
    /// A zero thickness falls back to the epsilon so the shells never coincide.
    pub fn shell_offset(&self) -> f32 {
        if self.thickness == 0.0 {
            self.signed_epsilon()
        } else {
            self.thickness
        }
    }
}

/// Complete masking tool configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaskingConfig {
    pub brush: MaskBrushConfig,
    pub extract: ExtractConfig,
    /// Maximum number of undo entries kept by the mask history
    pub max_undo_levels: usize,
}

impl MaskingConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: MaskingConfig = serde_json::from_str(json)?;
        Ok(config.sanitized())
    }

    /// Serialize the config to pretty JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Clamp values into their valid ranges.
    ///
    /// Non-finite values are replaced with their defaults.
    pub fn sanitized(mut self) -> Self {
        self.brush.hardness = unit_or_default("hardness", self.brush.hardness, DEFAULT_HARDNESS);
        self.brush.intensity =
            unit_or_default("intensity", self.brush.intensity, DEFAULT_INTENSITY);

        if !self.extract.thickness.is_finite() {
            warn!("thickness {} is not finite, using default", self.extract.thickness);
            self.extract.thickness = DEFAULT_THICKNESS;
        }
        if !self.extract.mask_clamp.is_finite() {
            warn!("mask_clamp {} is not finite, using default", self.extract.mask_clamp);
            self.extract.mask_clamp = DEFAULT_MASK_CLAMP;
        }
        if !self.extract.shell_epsilon.is_finite() || self.extract.shell_epsilon == 0.0 {
            warn!(
                "shell_epsilon {} would let shells coincide, using default",
                self.extract.shell_epsilon
            );
            self.extract.shell_epsilon = DEFAULT_SHELL_EPSILON;
        }
        if self.max_undo_levels == 0 {
            self.max_undo_levels = DEFAULT_MAX_UNDO_LEVELS;
        }
        self
    }
}

impl Default for MaskingConfig {
    fn default() -> Self {
        Self {
            brush: MaskBrushConfig::default(),
            extract: ExtractConfig::default(),
            max_undo_levels: DEFAULT_MAX_UNDO_LEVELS,
        }
    }
}

fn unit_or_default(name: &str, value: f32, default: f32) -> f32 {
    if !value.is_finite() {
        warn!("{} {} is not finite, using default", name, value);
        return default;
    }
    if !(0.0..=1.0).contains(&value) {
        warn!("{} {} clamped to [0, 1]", name, value);
    }
    value.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MaskingConfig::default();
        assert_eq!(config.brush.hardness, DEFAULT_HARDNESS);
        assert!(config.brush.negative);
        assert_eq!(config.extract.thickness, DEFAULT_THICKNESS);
        assert_eq!(config.extract.mask_clamp, 0.5);
        assert_eq!(config.extract.border_smooth_iterations, 3);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = MaskingConfig::from_json(r#"{ "extract": { "thickness": -0.2 } }"#).unwrap();
        assert_eq!(config.extract.thickness, -0.2);
        assert_eq!(config.extract.mask_clamp, DEFAULT_MASK_CLAMP);
        assert_eq!(config.brush, MaskBrushConfig::default());
        assert_eq!(config.max_undo_levels, DEFAULT_MAX_UNDO_LEVELS);
    }

    #[test]
    fn test_sanitize_clamps_brush() {
        let config = MaskingConfig::from_json(r#"{ "brush": { "hardness": 4.0, "intensity": -1.0 } }"#)
            .unwrap();
        assert_eq!(config.brush.hardness, 1.0);
        assert_eq!(config.brush.intensity, 0.0);
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(matches!(
            MaskingConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_json_roundtrip_keeps_values() {
        let mut config = MaskingConfig::default();
        config.extract.thickness = 0.3;
        config.brush.culling = true;
        let json = config.to_json().unwrap();
        assert_eq!(MaskingConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_epsilon_follows_thickness_sign() {
        let mut extract = ExtractConfig::default();
        assert_eq!(extract.signed_epsilon(), 0.01);
        extract.thickness = -0.5;
        assert_eq!(extract.signed_epsilon(), -0.01);
        assert_eq!(extract.shell_offset(), -0.5);
        extract.thickness = 0.0;
        assert_eq!(extract.shell_offset(), 0.01);
    }
}
