//! Sphere volumes

use super::{EntityKind, OverlayEntity, RenderEntity, Retexture};
use crate::debug::OverlayError;
use crate::foundation::math::Vec3;
use crate::render::device::{GpuMesh, SharedDevice};
use crate::render::orientation::Orientation;
use crate::render::primitives::shapes;
use crate::render::texture::Texture;

/// Latitude/longitude sphere
#[derive(Debug)]
pub struct SphereEntity {
    render: RenderEntity,
    radius: f32,
    detail: u32,
}

impl SphereEntity {
    /// Build and upload a sphere with `detail` vertical segments
    pub fn new(
        device: &SharedDevice,
        center: Vec3,
        radius: f32,
        detail: u32,
        texture: Texture,
        opacity: f32,
    ) -> Result<Self, OverlayError> {
        let mesh = GpuMesh::new(device, shapes::sphere(radius, detail)?)?;
        Ok(Self {
            render: RenderEntity::new(vec![mesh], texture, opacity, center, Orientation::default()),
            radius,
            detail,
        })
    }

    /// Sphere radius
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Vertical segment count
    pub fn detail(&self) -> u32 {
        self.detail
    }
}

impl OverlayEntity for SphereEntity {
    fn kind(&self) -> EntityKind {
        EntityKind::Sphere
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

impl Retexture for SphereEntity {
    fn replace_texture(&mut self, texture: Texture) {
        self.render.texture = texture;
    }
}
