//! Overlay settings

use serde::{Deserialize, Serialize};

use super::{Config, ConfigError};
use crate::render::texture::DebugColor;
use crate::voxel::DEFAULT_MAX_CELLS;

/// Settings for the bounds overlay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Opacity applied to every overlay entity
    pub opacity: f32,

    /// Voxel edge length used for volumes without a closed-form mesh
    pub voxel_detail: f32,

    /// Largest voxel grid built for one volume, in cells
    pub max_voxel_cells: usize,

    /// Sphere tessellation when no detail is given
    pub sphere_detail: SphereDetailConfig,

    /// Texture names per debug color
    pub textures: TextureNames,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            opacity: 0.2,
            voxel_detail: 2.0,
            max_voxel_cells: DEFAULT_MAX_CELLS,
            sphere_detail: SphereDetailConfig::default(),
            textures: TextureNames::default(),
        }
    }
}

impl Config for OverlayConfig {}

impl OverlayConfig {
    /// Reject values the geometry builders cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(ConfigError::Invalid(format!("opacity {} outside [0, 1]", self.opacity)));
        }
        if self.voxel_detail.is_nan() || self.voxel_detail <= 0.0 {
            return Err(ConfigError::Invalid(format!("voxel detail {} must be positive", self.voxel_detail)));
        }
        if self.max_voxel_cells == 0 {
            return Err(ConfigError::Invalid("voxel cell limit must be at least 1".to_string()));
        }
        if self.sphere_detail.base == 0 {
            return Err(ConfigError::Invalid("sphere base detail must be at least 1".to_string()));
        }
        if self.sphere_detail.max < self.sphere_detail.base {
            return Err(ConfigError::Invalid(format!(
                "sphere max detail {} is below the base detail {}",
                self.sphere_detail.max, self.sphere_detail.base
            )));
        }
        Ok(())
    }
}

/// Default sphere tessellation, growing with the radius past a threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SphereDetailConfig {
    /// Detail for small spheres
    pub base: u32,
    /// Radius above which detail grows
    pub radius_threshold: f32,
    /// Extra detail per unit of radius
    pub per_radius: f32,
    /// Upper bound on the computed detail
    pub max: u32,
}

impl Default for SphereDetailConfig {
    fn default() -> Self {
        Self {
            base: 8,
            radius_threshold: 2.0,
            per_radius: 0.2,
            max: 128,
        }
    }
}

impl SphereDetailConfig {
    /// Detail for a sphere of the given radius, never above `max`
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn detail_for(&self, radius: f32) -> u32 {
        if radius > self.radius_threshold {
            // Float to int casts saturate, so only the sum can overflow
            let extra = (radius * self.per_radius).floor() as u32;
            self.base.saturating_add(extra).min(self.max)
        } else {
            self.base
        }
    }
}

/// Texture names looked up for each [`DebugColor`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureNames {
    /// Texture for [`DebugColor::Default`]
    pub default: String,
    /// Texture for [`DebugColor::Joined`]
    pub joined: String,
    /// Texture for [`DebugColor::Left`]
    pub left: String,
}

impl Default for TextureNames {
    fn default() -> Self {
        Self {
            default: "debug/blue.png".to_string(),
            joined: "debug/green.png".to_string(),
            left: "debug/red.png".to_string(),
        }
    }
}

impl TextureNames {
    /// Name of the texture used for a color
    pub fn for_color(&self, color: DebugColor) -> &str {
        match color {
            DebugColor::Default => &self.default,
            DebugColor::Joined => &self.joined,
            DebugColor::Left => &self.left,
        }
    }
}
