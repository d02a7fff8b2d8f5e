//! Mask brush settings and falloff.
//!
//! The brush decides how strongly a dab changes the mask of one vertex. Which
//! vertices a dab reaches (picking, radius queries) is decided by the caller.

use glam::Vec3;
use sculpting_config::MaskBrushConfig;

/// Source of per-position brush alpha (e.g. a stencil texture).
pub trait PickSource {
    /// Alpha multiplier in [0, 1] for a world position.
    fn alpha(&self, position: Vec3) -> f32;
}

/// Pick source without an alpha texture.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformAlpha;

impl PickSource for UniformAlpha {
    fn alpha(&self, _position: Vec3) -> f32 {
        1.0
    }
}

/// Mask brush state.
#[derive(Debug, Clone, PartialEq)]
pub struct MaskBrush {
    /// Falloff hardness in [0, 1]
    pub hardness: f32,
    /// Dab strength
    pub intensity: f32,
    /// Painting lowers the mask when set
    pub negative: bool,
    /// Skip vertices facing away from the viewer
    pub culling: bool,
}

impl Default for MaskBrush {
    fn default() -> Self {
        Self::from_config(&MaskBrushConfig::default())
    }
}

impl MaskBrush {
    pub fn from_config(config: &MaskBrushConfig) -> Self {
        Self {
            hardness: config.hardness,
            intensity: config.intensity,
            negative: config.negative,
            culling: config.culling,
        }
    }

    /// Falloff at a normalized distance (0.0 = center, 1.0 = edge).
    ///
    /// `(1 - d)^(2 * (1 - hardness))`: hardness 1 gives a constant dab,
    /// hardness 0 a quadratic decay.
    pub fn falloff(normalized_distance: f32, hardness: f32) -> f32 {
        let d = normalized_distance.clamp(0.0, 1.0);
        let softness = 2.0 * (1.0 - hardness);
        (1.0 - d).powf(softness)
    }

    /// Intensity with the brush direction applied.
    pub fn signed_intensity(&self, intensity: f32) -> f32 {
        if self.negative { -intensity } else { intensity }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_falloff_curve() {
        // Full strength at the center whatever the hardness
        assert!((MaskBrush::falloff(0.0, 0.25) - 1.0).abs() < 1e-6);
        assert!((MaskBrush::falloff(0.0, 1.0) - 1.0).abs() < 1e-6);

        // Zero at the edge for soft brushes
        assert!(MaskBrush::falloff(1.0, 0.25).abs() < 1e-6);

        // Hardness 0 is quadratic
        assert!((MaskBrush::falloff(0.5, 0.0) - 0.25).abs() < 1e-6);

        // Hardness 1 is constant inside the radius
        assert!((MaskBrush::falloff(0.9, 1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_falloff_outside_radius_is_finite() {
        let value = MaskBrush::falloff(1.5, 0.25);
        assert!(value.is_finite());
        assert_eq!(value, 0.0);
    }

    #[test]
    fn test_signed_intensity() {
        let mut brush = MaskBrush::default();
        assert!(brush.negative);
        assert_eq!(brush.signed_intensity(0.5), -0.5);
        brush.negative = false;
        assert_eq!(brush.signed_intensity(0.5), 0.5);
    }
}
