//! Voxel decomposition of volumes without a closed-form surface
//!
//! A box is cut into a regular grid of cubic cells of edge `detail`. Each cell is
//! sampled once at its center with the volume's containment test. Cells are
//! stored x-major: x outermost, z innermost.

pub mod culling;

pub use culling::VisibilityCuller;

use crate::foundation::math::Vec3;
use crate::render::primitives::{shapes, GeometryError, Mesh};
use crate::volume::Aabb;

/// Grid coordinates of a cell
pub type CellIndex = [usize; 3];

/// Largest grid a [`Voxelizer`] builds unless told otherwise
pub const DEFAULT_MAX_CELLS: usize = 1 << 22;

/// Splits boxes into cells of a fixed edge length
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Voxelizer {
    detail: f32,
    max_cells: usize,
}

impl Voxelizer {
    /// Voxelizer with cell edge `detail`, which must be positive
    pub fn new(detail: f32) -> Result<Self, GeometryError> {
        if detail.is_nan() || detail <= 0.0 {
            return Err(GeometryError::InvalidDetail(detail));
        }
        Ok(Self {
            detail,
            max_cells: DEFAULT_MAX_CELLS,
        })
    }

    /// Same cell limit, new edge length
    pub fn with_detail(&self, detail: f32) -> Result<Self, GeometryError> {
        Ok(Self::new(detail)?.with_max_cells(self.max_cells))
    }

    /// Cap on the number of cells a single grid may hold
    #[must_use]
    pub fn with_max_cells(mut self, max_cells: usize) -> Self {
        self.max_cells = max_cells;
        self
    }

    /// Cell edge length
    pub fn detail(&self) -> f32 {
        self.detail
    }

    /// Cell limit
    pub fn max_cells(&self) -> usize {
        self.max_cells
    }

    /// Grid dimensions for a box. Axes too long to count saturate at `usize::MAX`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn dimensions(&self, bounds: &Aabb) -> [usize; 3] {
        let size = bounds.size();
        [size.x, size.y, size.z].map(|extent| (extent / self.detail).ceil().max(0.0) as usize)
    }

    /// Number of cells for a box, or an error when it exceeds the cell limit
    pub fn cell_count(&self, bounds: &Aabb) -> Result<usize, GeometryError> {
        let dims = self.dimensions(bounds);
        let too_large = GeometryError::GridTooLarge { dims, limit: self.max_cells };
        // An oversized axis is rejected even when another axis is empty
        if dims.iter().any(|&axis| axis > self.max_cells) {
            return Err(too_large);
        }
        dims.iter()
            .try_fold(1usize, |count, &axis| count.checked_mul(axis))
            .filter(|&count| count <= self.max_cells)
            .ok_or(too_large)
    }

    /// Sample `contains` at every cell center of `bounds`
    pub fn voxelize(&self, bounds: &Aabb, contains: &dyn Fn(&Vec3) -> bool) -> Result<VoxelGrid, GeometryError> {
        let count = self.cell_count(bounds)?;
        let dims = self.dimensions(bounds);
        let mut cells = Vec::with_capacity(count);

        for ix in 0..dims[0] {
            for iy in 0..dims[1] {
                for iz in 0..dims[2] {
                    let center = cell_center(bounds, self.detail, [ix, iy, iz]);
                    cells.push(contains(&center).then_some(center));
                }
            }
        }

        Ok(VoxelGrid {
            dims,
            detail: self.detail,
            bounds: *bounds,
            cells,
        })
    }
}

fn cell_center(bounds: &Aabb, detail: f32, [ix, iy, iz]: CellIndex) -> Vec3 {
    bounds.min + Vec3::repeat(detail * 0.5) + Vec3::new(ix as f32, iy as f32, iz as f32) * detail
}

/// Occupancy grid. Occupied slots hold the world position of the cell center.
#[derive(Debug, Clone, PartialEq)]
pub struct VoxelGrid {
    dims: [usize; 3],
    detail: f32,
    bounds: Aabb,
    cells: Vec<Option<Vec3>>,
}

impl VoxelGrid {
    /// Cells per axis
    pub fn dims(&self) -> [usize; 3] {
        self.dims
    }

    /// Cell edge length
    pub fn detail(&self) -> f32 {
        self.detail
    }

    /// Box the grid was built over
    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True when any axis has no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Slot of a cell, `None` outside the grid
    pub fn get(&self, [ix, iy, iz]: CellIndex) -> Option<Option<Vec3>> {
        let [dx, dy, dz] = self.dims;
        (ix < dx && iy < dy && iz < dz).then(|| self.cells[(ix * dy + iy) * dz + iz])
    }

    /// Center of an occupied cell
    pub fn center(&self, index: CellIndex) -> Option<Vec3> {
        self.get(index).flatten()
    }

    /// Whether a cell inside the grid is occupied
    pub fn is_occupied(&self, index: CellIndex) -> bool {
        self.center(index).is_some()
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Every cell index in storage order
    pub fn indices(&self) -> impl Iterator<Item = CellIndex> {
        let [dx, dy, dz] = self.dims;
        (0..dx).flat_map(move |ix| (0..dy).flat_map(move |iy| (0..dz).map(move |iz| [ix, iy, iz])))
    }

    /// Cube mesh of an occupied cell, in world space
    pub fn cell_mesh(&self, index: CellIndex, texture_size: [u32; 2]) -> Option<Mesh> {
        self.center(index).map(|center| {
            let mut mesh = shapes::cuboid(Vec3::repeat(self.detail), texture_size);
            mesh.translate(&center);
            mesh
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_grid_box() -> Aabb {
        Aabb::new(Vec3::zeros(), Vec3::repeat(3.0))
    }

    #[test]
    fn test_rejects_non_positive_detail() {
        assert_eq!(Voxelizer::new(0.0), Err(GeometryError::InvalidDetail(0.0)));
        assert!(Voxelizer::new(-1.0).is_err());
        assert!(Voxelizer::new(f32::NAN).is_err());
    }

    #[test]
    fn test_full_grid() {
        let grid = Voxelizer::new(1.0).unwrap().voxelize(&unit_grid_box(), &|_| true).unwrap();
        assert_eq!(grid.dims(), [3, 3, 3]);
        assert_eq!(grid.len(), 27);
        assert_eq!(grid.occupied_count(), 27);
    }

    #[test]
    fn test_dimensions_round_up() {
        let voxelizer = Voxelizer::new(2.0).unwrap();
        let bounds = Aabb::new(Vec3::zeros(), Vec3::new(5.0, 4.0, 0.5));
        assert_eq!(voxelizer.dimensions(&bounds), [3, 2, 1]);
    }

    #[test]
    fn test_cell_centers() {
        let bounds = Aabb::new(Vec3::new(-1.0, 0.0, 2.0), Vec3::new(3.0, 2.0, 4.0));
        let grid = Voxelizer::new(1.0).unwrap().voxelize(&bounds, &|_| true).unwrap();
        assert_relative_eq!(grid.center([0, 0, 0]).unwrap(), Vec3::new(-0.5, 0.5, 2.5));
        assert_relative_eq!(grid.center([3, 1, 1]).unwrap(), Vec3::new(2.5, 1.5, 3.5));
        assert!(grid.get([4, 0, 0]).is_none());
    }

    #[test]
    fn test_predicate_sampled_at_centers() {
        let grid = Voxelizer::new(1.0)
            .unwrap()
            .voxelize(&unit_grid_box(), &|p: &Vec3| p.x < 1.0)
            .unwrap();
        assert_eq!(grid.occupied_count(), 9);
        assert!(grid.is_occupied([0, 2, 1]));
        assert!(!grid.is_occupied([1, 0, 0]));
    }

    #[test]
    fn test_deterministic() {
        let predicate = |p: &Vec3| (p - Vec3::repeat(2.0)).norm() < 1.7;
        let voxelizer = Voxelizer::new(0.5).unwrap();
        let first = voxelizer.voxelize(&unit_grid_box(), &predicate).unwrap();
        let second = voxelizer.voxelize(&unit_grid_box(), &predicate).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_storage_order_is_x_major() {
        let grid = Voxelizer::new(1.0).unwrap().voxelize(&unit_grid_box(), &|_| true).unwrap();
        let order: Vec<CellIndex> = grid.indices().take(4).collect();
        assert_eq!(order, vec![[0, 0, 0], [0, 0, 1], [0, 0, 2], [0, 1, 0]]);
    }

    #[test]
    fn test_cell_mesh_is_placed_cube() {
        let grid = Voxelizer::new(1.0).unwrap().voxelize(&unit_grid_box(), &|_| true).unwrap();
        let mesh = grid.cell_mesh([2, 2, 2], [16, 16]).unwrap();
        assert_eq!(mesh.len(), 36);
        for vertex in &mesh.vertices {
            let offset = vertex.pos() - Vec3::repeat(2.5);
            assert_relative_eq!(offset.abs(), Vec3::repeat(0.5));
        }
    }

    #[test]
    fn test_empty_box_has_no_cells() {
        let bounds = Aabb::new(Vec3::zeros(), Vec3::new(4.0, 0.0, 4.0));
        let grid = Voxelizer::new(1.0).unwrap().voxelize(&bounds, &|_| true).unwrap();
        assert!(grid.is_empty());
    }

    #[test]
    fn test_tiny_detail_is_rejected_not_allocated() {
        let voxelizer = Voxelizer::new(1e-30).unwrap();
        let result = voxelizer.voxelize(&unit_grid_box(), &|_| true);
        assert!(matches!(result, Err(GeometryError::GridTooLarge { limit: DEFAULT_MAX_CELLS, .. })));
    }

    #[test]
    fn test_cell_limit() {
        let voxelizer = Voxelizer::new(1.0).unwrap().with_max_cells(27);
        assert_eq!(voxelizer.cell_count(&unit_grid_box()), Ok(27));

        let limited = voxelizer.with_max_cells(26);
        assert_eq!(
            limited.voxelize(&unit_grid_box(), &|_| true),
            Err(GeometryError::GridTooLarge { dims: [3, 3, 3], limit: 26 })
        );

        // Changing the edge length keeps the limit
        assert_eq!(limited.with_detail(0.5).unwrap().max_cells(), 26);
    }

    #[test]
    fn test_long_axis_rejected_even_when_flat() {
        let voxelizer = Voxelizer::new(1e-30).unwrap();
        let flat = Aabb::new(Vec3::zeros(), Vec3::new(3.0, 3.0, 0.0));
        assert!(voxelizer.cell_count(&flat).is_err());
    }
}
