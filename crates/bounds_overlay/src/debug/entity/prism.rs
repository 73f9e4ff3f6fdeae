//! Prism volumes

use super::{EntityKind, OverlayEntity, RenderEntity, Retexture};
use crate::debug::OverlayError;
use crate::render::device::{GpuMesh, SharedDevice};
use crate::render::orientation::Orientation;
use crate::render::primitives::prism;
use crate::render::texture::Texture;
use crate::volume::Prism;

/// Extruded polygon, aligned so its local extrusion axis matches the volume's axis
#[derive(Debug)]
pub struct PrismEntity {
    render: RenderEntity,
    prism: Prism,
}

impl PrismEntity {
    /// Build and upload a prism mesh placed at the volume's center
    pub fn new(device: &SharedDevice, volume: &Prism, texture: Texture, opacity: f32) -> Result<Self, OverlayError> {
        let mesh = GpuMesh::new(device, prism::prism(&volume.polygon, volume.length())?)?;
        Ok(Self {
            render: RenderEntity::new(vec![mesh], texture, opacity, volume.center(), Orientation::default())
                .with_alignment(volume.axis.basis()),
            prism: volume.clone(),
        })
    }

    /// Volume the mesh was built from
    pub fn prism(&self) -> &Prism {
        &self.prism
    }
}

impl OverlayEntity for PrismEntity {
    fn kind(&self) -> EntityKind {
        EntityKind::Prism
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

impl Retexture for PrismEntity {
    fn replace_texture(&mut self, texture: Texture) {
        self.render.texture = texture;
    }
}
