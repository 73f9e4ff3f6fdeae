//! Arbitrary volumes drawn as a composite of culled voxel cubes

use std::rc::Rc;

use super::{EntityKind, OverlayEntity, RenderEntity, Retexture, Voxelized};
use crate::debug::OverlayError;
use crate::foundation::logging::info;
use crate::foundation::math::Vec3;
use crate::render::device::{GpuMesh, SharedDevice};
use crate::render::orientation::Orientation;
use crate::render::texture::Texture;
use crate::volume::{Aabb, ContainmentTest};
use crate::voxel::{VisibilityCuller, VoxelGrid, Voxelizer};

/// One cube mesh per exposed voxel, all sharing the entity's texture and placement.
///
/// Cubes are built relative to the center of the volume's bounds; the entity sits
/// at that center plus a movable offset.
pub struct VoxelEntity {
    render: RenderEntity,
    device: SharedDevice,
    test: ContainmentTest,
    bounds: Aabb,
    voxelizer: Voxelizer,
    offset: Vec3,
    grid: VoxelGrid,
    visible: usize,
}

impl VoxelEntity {
    /// Voxelize a volume and upload its exposed cells
    pub fn new(
        device: &SharedDevice,
        test: &ContainmentTest,
        bounds: &Aabb,
        voxelizer: Voxelizer,
        texture: Texture,
        opacity: f32,
    ) -> Result<Self, OverlayError> {
        let (grid, meshes) = build(device, &voxelizer, test, bounds, texture)?;
        let visible = meshes.len();
        Ok(Self {
            render: RenderEntity::new(meshes, texture, opacity, bounds.center(), Orientation::default()),
            device: Rc::clone(device),
            test: Rc::clone(test),
            bounds: *bounds,
            voxelizer,
            offset: Vec3::zeros(),
            grid,
            visible,
        })
    }

    /// Current occupancy grid
    pub fn grid(&self) -> &VoxelGrid {
        &self.grid
    }
}

fn build(
    device: &SharedDevice,
    voxelizer: &Voxelizer,
    test: &ContainmentTest,
    bounds: &Aabb,
    texture: Texture,
) -> Result<(VoxelGrid, Vec<GpuMesh>), OverlayError> {
    let grid = voxelizer.voxelize(bounds, test.as_ref())?;
    let visible = VisibilityCuller::visible_cells(&grid);

    let to_local = -bounds.center();
    let meshes = visible
        .iter()
        .filter_map(|&index| grid.cell_mesh(index, texture.size()))
        .map(|mut mesh| {
            mesh.translate(&to_local);
            GpuMesh::new(device, mesh)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let [dx, dy, dz] = grid.dims();
    info!(
        "Voxelized {dx}x{dy}x{dz} grid at detail {}: {} occupied, {} visible",
        voxelizer.detail(),
        grid.occupied_count(),
        meshes.len()
    );
    Ok((grid, meshes))
}

impl OverlayEntity for VoxelEntity {
    fn kind(&self) -> EntityKind {
        EntityKind::Voxel
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

    fn as_voxelized(&mut self) -> Option<&mut dyn Voxelized> {
        Some(self)
    }
}

impl Retexture for VoxelEntity {
    // Every cube mesh draws with the entity's texture
    fn replace_texture(&mut self, texture: Texture) {
        self.render.texture = texture;
    }
}

impl Voxelized for VoxelEntity {
    fn detail(&self) -> f32 {
        self.voxelizer.detail()
    }

    fn set_detail(&mut self, detail: f32) -> Result<(), OverlayError> {
        let voxelizer = self.voxelizer.with_detail(detail)?;
        info!("Voxel detail {} -> {detail}, rebuilding grid", self.voxelizer.detail());
        let (grid, meshes) = build(&self.device, &voxelizer, &self.test, &self.bounds, self.render.texture)?;

        self.visible = meshes.len();
        self.render.set_meshes(meshes);
        self.grid = grid;
        self.voxelizer = voxelizer;
        Ok(())
    }

    fn offset(&self) -> Vec3 {
        self.offset
    }

    fn set_offset(&mut self, offset: Vec3) {
        self.offset = offset;
        self.render.position = self.bounds.center() + offset;
    }

    fn occupied_voxel_count(&self) -> usize {
        self.grid.occupied_count()
    }

    fn visible_voxel_count(&self) -> usize {
        self.visible
    }
}
