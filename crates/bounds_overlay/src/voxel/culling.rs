//! Hidden-voxel culling
//!
//! An occupied cell is drawn only when it can be seen: it sits on the grid
//! boundary, or at least one of its six face neighbours is empty.

use super::{CellIndex, VoxelGrid};

/// Selects the occupied cells that are exposed
#[derive(Debug, Clone, Copy, Default)]
pub struct VisibilityCuller;

impl VisibilityCuller {
    /// Whether an occupied cell is exposed. Empty and out-of-range cells are not.
    pub fn is_visible(grid: &VoxelGrid, index: CellIndex) -> bool {
        if !grid.is_occupied(index) {
            return false;
        }

        let dims = grid.dims();
        (0..3).any(|axis| {
            let i = index[axis];
            if i == 0 || i + 1 == dims[axis] {
                return true;
            }
            let mut before = index;
            before[axis] = i - 1;
            let mut after = index;
            after[axis] = i + 1;
            !grid.is_occupied(before) || !grid.is_occupied(after)
        })
    }

    /// Exposed cells in storage order
    pub fn visible_cells(grid: &VoxelGrid) -> Vec<CellIndex> {
        grid.indices().filter(|&index| Self::is_visible(grid, index)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use crate::voxel::Voxelizer;
    use crate::volume::Aabb;

    fn grid(size: Vec3, detail: f32, predicate: &dyn Fn(&Vec3) -> bool) -> VoxelGrid {
        Voxelizer::new(detail)
            .unwrap()
            .voxelize(&Aabb::new(Vec3::zeros(), size), predicate)
            .unwrap()
    }

    #[test]
    fn test_solid_three_cube_hides_center() {
        let grid = grid(Vec3::repeat(3.0), 1.0, &|_| true);
        let visible = VisibilityCuller::visible_cells(&grid);
        assert_eq!(visible.len(), 26);
        assert!(!visible.contains(&[1, 1, 1]));
    }

    #[test]
    fn test_small_grids_show_everything() {
        for size in [Vec3::new(2.0, 2.0, 2.0), Vec3::new(1.0, 2.0, 2.0), Vec3::new(2.0, 1.0, 1.0)] {
            let grid = grid(size, 1.0, &|p: &Vec3| p.x + p.y > 1.0);
            let visible = VisibilityCuller::visible_cells(&grid);
            assert_eq!(visible.len(), grid.occupied_count());
        }
    }

    #[test]
    fn test_cavity_exposes_inner_shell() {
        // 5x5x5 solid with the center cell hollowed out: the 26 cells around it are exposed
        let grid = grid(Vec3::repeat(5.0), 1.0, &|p: &Vec3| (p - Vec3::repeat(2.5)).norm() > 0.1);
        let visible = VisibilityCuller::visible_cells(&grid);
        assert_eq!(grid.occupied_count(), 124);
        assert_eq!(visible.len(), 98 + 6);
        assert!(!VisibilityCuller::is_visible(&grid, [2, 2, 2]));
        assert!(VisibilityCuller::is_visible(&grid, [2, 2, 1]));
        assert!(!VisibilityCuller::is_visible(&grid, [1, 1, 1]));
    }

    #[test]
    fn test_empty_cells_never_visible() {
        let grid = grid(Vec3::repeat(3.0), 1.0, &|_| false);
        assert!(VisibilityCuller::visible_cells(&grid).is_empty());
    }
}
