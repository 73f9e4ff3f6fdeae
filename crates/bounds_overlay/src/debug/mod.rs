//! Debug overlay for bounding volumes
//!
//! - [`VolumeMeshDispatcher`] turns a volume into the matching render entity
//! - [`BoundsOverlay`] tracks one entity per registered volume and keeps the host
//!   scene in sync with it

pub mod dispatch;
pub mod entity;
pub mod overlay;

#[cfg(test)]
mod tests;

pub use dispatch::VolumeMeshDispatcher;
pub use entity::{EntityKind, OverlayEntity, RenderEntity, Retexture, Viewer, Voxelized};
pub use overlay::{BoundsOverlay, VolumeRef};

use crate::config::ConfigError;
use crate::render::device::DeviceError;
use crate::render::primitives::GeometryError;
use crate::render::texture::TextureError;

/// Errors raised by overlay operations
#[derive(thiserror::Error, Debug)]
pub enum OverlayError {
    /// Invalid geometry input
    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    /// Device or buffer failure
    #[error("Device error: {0}")]
    Device(#[from] DeviceError),

    /// Texture lookup failure
    #[error("Texture error: {0}")]
    Texture(#[from] TextureError),

    /// Invalid overlay settings
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
