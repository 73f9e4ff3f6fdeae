//! Volume to entity dispatch

use super::entity::{CuboidEntity, OverlayEntity, PrismEntity, SphereEntity, VoxelEntity};
use super::OverlayError;
use crate::config::{OverlayConfig, SphereDetailConfig};
use crate::render::device::SharedDevice;
use crate::render::texture::Texture;
use crate::volume::BoundingVolume;
use crate::voxel::Voxelizer;

/// Picks the mesh strategy for each volume variant
pub struct VolumeMeshDispatcher {
    device: SharedDevice,
    sphere_detail: SphereDetailConfig,
    voxel_detail: f32,
    max_voxel_cells: usize,
}

impl VolumeMeshDispatcher {
    /// Dispatcher uploading through `device` with detail settings from `config`
    pub fn new(device: SharedDevice, config: &OverlayConfig) -> Self {
        Self {
            device,
            sphere_detail: config.sphere_detail.clone(),
            voxel_detail: config.voxel_detail,
            max_voxel_cells: config.max_voxel_cells,
        }
    }

    /// Voxel edge length used for arbitrary volumes
    pub fn voxel_detail(&self) -> f32 {
        self.voxel_detail
    }

    /// Build the entity for a volume:
    /// sphere to sphere mesh, box to cuboid, prism to prism, arbitrary to voxels
    pub fn build_entity(
        &self,
        volume: &BoundingVolume,
        texture: Texture,
        opacity: f32,
    ) -> Result<Box<dyn OverlayEntity>, OverlayError> {
        let device = &self.device;
        let entity: Box<dyn OverlayEntity> = match volume {
            BoundingVolume::Sphere { center, radius } => {
                let detail = self.sphere_detail.detail_for(*radius);
                Box::new(SphereEntity::new(device, *center, *radius, detail, texture, opacity)?)
            }
            BoundingVolume::Box(bounds) => Box::new(CuboidEntity::new(device, bounds, texture, opacity)?),
            BoundingVolume::Prism(prism) => Box::new(PrismEntity::new(device, prism, texture, opacity)?),
            BoundingVolume::Arbitrary { test, bounds } => {
                let voxelizer = Voxelizer::new(self.voxel_detail)?.with_max_cells(self.max_voxel_cells);
                Box::new(VoxelEntity::new(device, test, bounds, voxelizer, texture, opacity)?)
            }
        };
        Ok(entity)
    }
}
