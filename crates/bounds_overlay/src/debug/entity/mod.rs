//! Overlay render entities
//!
//! Each entity owns its uploaded meshes, one texture, an opacity and a world
//! placement. Behaviour that only some shapes have is exposed through capability
//! traits ([`Retexture`], [`Voxelized`]) so the registry never inspects concrete
//! types.

mod cuboid;
mod prism;
mod sphere;
mod voxel;

pub use cuboid::CuboidEntity;
pub use prism::PrismEntity;
pub use sphere::SphereEntity;
pub use voxel::VoxelEntity;

use crate::foundation::math::{Mat4, Rotation, Vec3};
use crate::render::device::GpuMesh;
use crate::render::draw_queue::{DrawCommand, DrawQueue};
use crate::render::orientation::Orientation;
use crate::render::scene::EntityKey;
use crate::render::texture::Texture;

use super::OverlayError;

/// Viewer state for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewer {
    /// World position of the camera
    pub position: Vec3,
}

impl Viewer {
    /// Viewer at a position
    pub fn at(position: Vec3) -> Self {
        Self { position }
    }
}

/// Concrete shape behind an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Box volume
    Cuboid,
    /// Sphere volume
    Sphere,
    /// Extruded polygon
    Prism,
    /// Voxel approximation of an arbitrary volume
    Voxel,
}

/// Renderable state shared by every entity kind
#[derive(Debug)]
pub struct RenderEntity {
    meshes: Vec<GpuMesh>,
    /// Bound texture
    pub texture: Texture,
    /// Blend opacity
    pub opacity: f32,
    /// World position of the local origin
    pub position: Vec3,
    /// World rotation
    pub orientation: Orientation,
    alignment: Rotation,
    draw_order: f32,
}

impl RenderEntity {
    /// Entity over already uploaded meshes
    pub fn new(meshes: Vec<GpuMesh>, texture: Texture, opacity: f32, position: Vec3, orientation: Orientation) -> Self {
        Self {
            meshes,
            texture,
            opacity,
            position,
            orientation,
            alignment: Rotation::identity(),
            draw_order: 0.0,
        }
    }

    /// Rotation applied in local space before the orientation. It is part of the
    /// shape and survives orientation changes.
    #[must_use]
    pub fn with_alignment(mut self, alignment: Rotation) -> Self {
        self.alignment = alignment;
        self
    }

    /// Local alignment of the mesh
    pub fn alignment(&self) -> Rotation {
        self.alignment
    }

    /// Constituent meshes
    pub fn meshes(&self) -> &[GpuMesh] {
        &self.meshes
    }

    /// Swap the meshes, dropping (and releasing) the old ones
    pub fn set_meshes(&mut self, meshes: Vec<GpuMesh>) {
        self.meshes = meshes;
    }

    /// Distance to the viewer at the last update
    pub fn draw_order(&self) -> f32 {
        self.draw_order
    }

    /// Recompute the view-dependent sort key
    pub fn update(&mut self, viewer: &Viewer) {
        self.draw_order = (self.position - viewer.position).norm();
    }

    /// Model matrix for a viewer
    pub fn world_matrix(&self, viewer: &Viewer) -> Mat4 {
        self.orientation.world_matrix(&self.position, &viewer.position) * self.alignment.to_homogeneous()
    }

    /// Vertices across every mesh
    pub fn vertex_count(&self) -> usize {
        self.meshes.iter().map(|gpu| gpu.mesh().len()).sum()
    }

    /// One draw per uploaded mesh, all sharing the entity's texture and transform
    pub fn queue_draws(&self, key: EntityKey, viewer: &Viewer, queue: &mut DrawQueue) {
        let transform = self.world_matrix(viewer);
        for gpu in &self.meshes {
            let Some(buffer) = gpu.buffer() else { continue };
            queue.add_command(DrawCommand {
                entity: key,
                buffer: buffer.id(),
                topology: gpu.topology(),
                primitive_count: gpu.mesh().triangle_count(),
                texture: self.texture.handle,
                opacity: self.opacity,
                transform,
                command_type: DrawCommand::command_type_for(self.opacity),
                depth_key: self.draw_order,
            });
        }
    }
}

/// Entity drawn by the overlay
pub trait OverlayEntity {
    /// Concrete shape
    fn kind(&self) -> EntityKind;

    /// Shared renderable state
    fn render(&self) -> &RenderEntity;

    /// Shared renderable state, mutably
    fn render_mut(&mut self) -> &mut RenderEntity;

    /// Texture swap capability, if this shape supports it
    fn as_retexture(&mut self) -> Option<&mut dyn Retexture> {
        None
    }

    /// Voxel controls, for voxel entities
    fn as_voxelized(&mut self) -> Option<&mut dyn Voxelized> {
        None
    }

    /// Bound texture
    fn texture(&self) -> Texture {
        self.render().texture
    }

    /// World position
    fn position(&self) -> Vec3 {
        self.render().position
    }

    /// Distance to the viewer at the last update
    fn draw_order(&self) -> f32 {
        self.render().draw_order()
    }

    /// Vertices across every constituent mesh
    fn vertex_count(&self) -> usize {
        self.render().vertex_count()
    }

    /// Per-frame update
    fn update(&mut self, viewer: &Viewer) {
        self.render_mut().update(viewer);
    }

    /// Emit this entity's draw commands
    fn queue_draws(&self, key: EntityKey, viewer: &Viewer, queue: &mut DrawQueue) {
        self.render().queue_draws(key, viewer, queue);
    }
}

/// Shapes whose texture can be replaced without rebuilding geometry
pub trait Retexture {
    /// Bind `texture` in place for every constituent mesh
    fn replace_texture(&mut self, texture: Texture);
}

/// Controls of a voxelized entity
pub trait Voxelized {
    /// Voxel edge length
    fn detail(&self) -> f32;

    /// Change the edge length. Rebuilds grid, culling and meshes synchronously;
    /// the cost grows with the number of cells.
    fn set_detail(&mut self, detail: f32) -> Result<(), OverlayError>;

    /// Displacement of the voxels from the volume's bounds
    fn offset(&self) -> Vec3;

    /// Move the voxels without rebuilding them
    fn set_offset(&mut self, offset: Vec3);

    /// Occupied cells in the current grid
    fn occupied_voxel_count(&self) -> usize;

    /// Cells actually drawn
    fn visible_voxel_count(&self) -> usize;
}
