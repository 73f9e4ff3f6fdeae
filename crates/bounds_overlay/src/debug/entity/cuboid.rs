//! Box volumes drawn as a single atlas-textured cuboid

use super::{EntityKind, OverlayEntity, RenderEntity, Retexture};
use crate::debug::OverlayError;
use crate::foundation::math::Vec3;
use crate::render::device::{GpuMesh, SharedDevice};
use crate::render::orientation::Orientation;
use crate::render::primitives::shapes;
use crate::render::texture::Texture;
use crate::volume::Aabb;

/// Cuboid spanning a box volume
#[derive(Debug)]
pub struct CuboidEntity {
    render: RenderEntity,
    dimensions: Vec3,
}

impl CuboidEntity {
    /// Build and upload a cuboid covering `bounds`
    pub fn new(device: &SharedDevice, bounds: &Aabb, texture: Texture, opacity: f32) -> Result<Self, OverlayError> {
        let dimensions = bounds.size();
        let mesh = GpuMesh::new(device, shapes::cuboid(dimensions, texture.size()))?;
        Ok(Self {
            render: RenderEntity::new(vec![mesh], texture, opacity, bounds.center(), Orientation::default()),
            dimensions,
        })
    }

    /// Edge lengths
    pub fn dimensions(&self) -> Vec3 {
        self.dimensions
    }
}

impl OverlayEntity for CuboidEntity {
    fn kind(&self) -> EntityKind {
        EntityKind::Cuboid
    }

    fn render(&self) -> &RenderEntity {
        &self.render
    }

    fn render_mut(&mut self) -> &mut RenderEntity {
        &mut self.render
    }

    fn as_retexture(&mut self) -> Option<&mut dyn Retexture> {
        Some(self)
    }
}

impl Retexture for CuboidEntity {
    // Atlas UVs are normalized, so any texture size maps onto the same net
    fn replace_texture(&mut self, texture: Texture) {
        self.render.texture = texture;
    }
}
