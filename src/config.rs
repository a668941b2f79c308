use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::WallError;

// ── WallSize ──────────────────────────────────────────────────────────────────

/// Footprint of the whole wall in world units.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WallSize {
    pub width: f32,
    pub height: f32,
    /// Thickness of every brick; also the forward (z) offset of the wall.
    pub depth: f32,
}

// ── ColliderDepth ─────────────────────────────────────────────────────────────

/// Half-extent used for the brick colliders along z.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColliderDepth {
    /// Half-extent equals the full wall depth, so colliders are twice as deep
    /// as the visual bricks.
    Full,
    /// Half-extent equals half the wall depth; colliders match the meshes.
    Half,
}

impl ColliderDepth {
    /// Collider half-extent along z for a wall of the given depth.
    pub fn half_extent(self, depth: f32) -> f32 {
        match self {
            ColliderDepth::Full => depth,
            ColliderDepth::Half => depth / 2.0,
        }
    }
}

// ── BodyConfig ────────────────────────────────────────────────────────────────

/// Parameters shared by every brick body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyConfig {
    pub mass: f32,
    /// Speed below which an awake body starts counting towards sleep.
    pub sleep_speed_limit: f32,
    /// Seconds a body must stay below `sleep_speed_limit` before it sleeps.
    pub sleep_time_limit: f32,
    pub collider_depth: ColliderDepth,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            mass: 1.0,
            sleep_speed_limit: 0.1,
            sleep_time_limit: 1.0,
            collider_depth: ColliderDepth::Full,
        }
    }
}

// ── WallConfig ────────────────────────────────────────────────────────────────

/// Construction parameters for a [`Wall`](crate::wall::Wall).
///
/// Every field has a default, so a JSON file only needs the values it wants
/// to change:
///
/// ```json
/// { "size": { "width": 7.0, "height": 4.0, "depth": 0.2 }, "density": 4.0 }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallConfig {
    pub size: WallSize,
    /// Bricks per world unit along width and height.
    pub density: f32,
    /// Added to every brick's y position.
    pub vertical_offset: f32,
    /// Name of the atlas texture looked up through the asset provider.
    pub texture: String,
    pub body: BodyConfig,
}

impl Default for WallConfig {
    /// 7 × 4 × 0.2 wall at 4 bricks per unit, lifted by 1.2, textured with
    /// `topLogo`.
    fn default() -> Self {
        Self {
            size: WallSize { width: 7.0, height: 4.0, depth: 0.2 },
            density: 4.0,
            vertical_offset: 1.2,
            texture: "topLogo".to_string(),
            body: BodyConfig::default(),
        }
    }
}

impl WallConfig {
    pub fn from_json(json: &str) -> Result<Self, WallError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, WallError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Reject values that would yield degenerate geometry or bodies.
    ///
    /// Resolution checks need the density product and live in
    /// [`WallLayout::new`](crate::grid::WallLayout::new), which calls this first.
    pub fn validate(&self) -> Result<(), WallError> {
        let positive = |name: &str, v: f32| {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(WallError::InvalidConfiguration(format!(
                    "{name} must be a positive finite number, got {v}"
                )))
            }
        };
        positive("size.width", self.size.width)?;
        positive("size.height", self.size.height)?;
        positive("size.depth", self.size.depth)?;
        positive("density", self.density)?;
        positive("body.mass", self.body.mass)?;

        if !self.vertical_offset.is_finite() {
            return Err(WallError::InvalidConfiguration(
                "vertical_offset must be finite".to_string(),
            ));
        }
        for (name, v) in [
            ("body.sleep_speed_limit", self.body.sleep_speed_limit),
            ("body.sleep_time_limit", self.body.sleep_time_limit),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(WallError::InvalidConfiguration(format!(
                    "{name} must be non-negative, got {v}"
                )));
            }
        }
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_wall() {
        let cfg = WallConfig::default();
        assert_eq!(cfg.size, WallSize { width: 7.0, height: 4.0, depth: 0.2 });
        assert_eq!(cfg.density, 4.0);
        assert_eq!(cfg.vertical_offset, 1.2);
        assert_eq!(cfg.body.mass, 1.0);
        assert_eq!(cfg.body.sleep_speed_limit, 0.1);
        assert_eq!(cfg.body.sleep_time_limit, 1.0);
        assert_eq!(cfg.body.collider_depth, ColliderDepth::Full);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = WallConfig::from_json(r#"{ "density": 2.0, "body": { "mass": 3.0 } }"#).unwrap();
        assert_eq!(cfg.density, 2.0);
        assert_eq!(cfg.body.mass, 3.0);
        assert_eq!(cfg.body.sleep_time_limit, 1.0);
        assert_eq!(cfg.texture, "topLogo");
    }

    #[test]
    fn collider_depth_parses_snake_case() {
        let cfg = WallConfig::from_json(r#"{ "body": { "collider_depth": "half" } }"#).unwrap();
        assert_eq!(cfg.body.collider_depth, ColliderDepth::Half);
        assert!((cfg.body.collider_depth.half_extent(0.2) - 0.1).abs() < 1e-6);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(WallConfig::from_json("{ density: }"), Err(WallError::Parse(_))));
    }

    #[test]
    fn non_positive_values_are_rejected() {
        let mut cfg = WallConfig::default();
        cfg.size.depth = 0.0;
        assert!(matches!(cfg.validate(), Err(WallError::InvalidConfiguration(_))));

        let mut cfg = WallConfig::default();
        cfg.density = -1.0;
        assert!(matches!(cfg.validate(), Err(WallError::InvalidConfiguration(_))));

        let mut cfg = WallConfig::default();
        cfg.body.mass = 0.0;
        assert!(matches!(cfg.validate(), Err(WallError::InvalidConfiguration(_))));

        let mut cfg = WallConfig::default();
        cfg.body.sleep_time_limit = f32::NAN;
        assert!(matches!(cfg.validate(), Err(WallError::InvalidConfiguration(_))));
    }
}
