//! Texture atlas for cuboids
//!
//! One texture is laid out as the unfolded net of a cuboid. With width `X`,
//! depth `Y` and height `Z` the net is `2Y + X` wide and `2Y + 2Z` tall:
//!
//! ```text
//!         +------+
//!         | Top  |
//!  +------+------+------+
//!  | Left | Back | Right|
//!  +------+------+------+
//!         |Bottom|
//!         +------+
//!         |Front |
//!         +------+
//! ```
//!
//! Rectangles are snapped to whole texels before being normalized, so faces never
//! sample across a texel boundary shared with a neighbour.

use crate::foundation::math::{Vec2, Vec3};

/// Faces of a cuboid, in the order the cuboid builder emits them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CuboidFace {
    /// +z
    Top,
    /// +x
    Right,
    /// -x
    Left,
    /// +y
    Front,
    /// -y
    Back,
    /// -z
    Bottom,
}

impl CuboidFace {
    /// Every face in emission order
    pub const ALL: [Self; 6] = [Self::Top, Self::Right, Self::Left, Self::Front, Self::Back, Self::Bottom];

    /// Outward unit normal
    pub fn normal(self) -> Vec3 {
        match self {
            Self::Top => Vec3::z(),
            Self::Right => Vec3::x(),
            Self::Left => -Vec3::x(),
            Self::Front => Vec3::y(),
            Self::Back => -Vec3::y(),
            Self::Bottom => -Vec3::z(),
        }
    }

    /// Rectangle corner used by each of the face's six vertices.
    ///
    /// Corners: 0 = left-top, 1 = right-top, 2 = left-bottom, 3 = right-bottom.
    /// Vertices shared by the two triangles of a face map to the same corner.
    pub const fn corner_indices(self) -> [usize; 6] {
        match self {
            Self::Top => [2, 0, 3, 3, 0, 1],
            Self::Right | Self::Front | Self::Bottom => [0, 1, 2, 2, 1, 3],
            Self::Left => [3, 2, 1, 1, 2, 0],
            Self::Back => [1, 3, 0, 0, 3, 2],
        }
    }
}

/// Normalized texture rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvRect {
    /// Left-top corner
    pub origin: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl UvRect {
    /// Corners in atlas order: left-top, right-top, left-bottom, right-bottom
    pub fn corners(&self) -> [Vec2; 4] {
        let Self { origin, size } = *self;
        [
            origin,
            origin + Vec2::new(size.x, 0.0),
            origin + Vec2::new(0.0, size.y),
            origin + size,
        ]
    }
}

/// Face rectangles of one cuboid on one texture
#[derive(Debug, Clone, PartialEq)]
pub struct CuboidAtlas {
    rects: [UvRect; 6],
}

impl CuboidAtlas {
    /// Lay out the net of a cuboid with the given dimensions on a texture of
    /// `texture_size` texels
    pub fn new(dimensions: Vec3, texture_size: [u32; 2]) -> Self {
        let (x, y, z) = (dimensions.x.abs(), dimensions.y.abs(), dimensions.z.abs());
        let total = Vec2::new(2.0 * y + x, 2.0 * y + 2.0 * z);
        let texture = Vec2::new(texture_size[0] as f32, texture_size[1] as f32);

        let rects = CuboidFace::ALL.map(|face| {
            let (position, size) = match face {
                CuboidFace::Top => (Vec2::new(y, 0.0), Vec2::new(x, y)),
                CuboidFace::Left => (Vec2::new(0.0, y), Vec2::new(y, z)),
                CuboidFace::Right => (Vec2::new(y + x, y), Vec2::new(y, z)),
                CuboidFace::Back => (Vec2::new(y, y), Vec2::new(x, z)),
                CuboidFace::Bottom => (Vec2::new(y, y + z), Vec2::new(x, y)),
                CuboidFace::Front => (Vec2::new(y, 2.0 * y + z), Vec2::new(x, z)),
            };
            UvRect {
                origin: snap(position.component_div(&total), &texture),
                size: snap(size.component_div(&total), &texture),
            }
        });

        Self { rects }
    }

    /// Rectangle of a face
    pub fn rect(&self, face: CuboidFace) -> UvRect {
        self.rects[face as usize]
    }

    /// Texture coordinates for the six vertices of a face, in emission order
    pub fn face_uvs(&self, face: CuboidFace) -> [Vec2; 6] {
        let corners = self.rect(face).corners();
        face.corner_indices().map(|corner| corners[corner])
    }
}

// Truncate to whole texels, then normalize. A zero-sized net maps to the origin.
fn snap(relative: Vec2, texture: &Vec2) -> Vec2 {
    let texels = relative.component_mul(texture).map(|v| if v.is_finite() { v.trunc() } else { 0.0 });
    texels.zip_map(texture, |t, size| if size > 0.0 { t / size } else { 0.0 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_unit_cube_net() {
        // 1x1x1 cube on a 300x400 texture: net is 3 wide, 4 tall
        let atlas = CuboidAtlas::new(Vec3::repeat(1.0), [300, 400]);
        let third = 1.0 / 3.0;

        let top = atlas.rect(CuboidFace::Top);
        assert_relative_eq!(top.origin, Vec2::new(100.0 / 300.0, 0.0));
        assert_relative_eq!(top.size, Vec2::new(third, 0.25), epsilon = 1e-6);

        let front = atlas.rect(CuboidFace::Front);
        assert_relative_eq!(front.origin, Vec2::new(100.0 / 300.0, 0.75));

        let right = atlas.rect(CuboidFace::Right);
        assert_relative_eq!(right.origin, Vec2::new(200.0 / 300.0, 0.25));
    }

    #[test]
    fn test_rects_truncate_to_texels() {
        // 7 wide net on a 10 texel texture: 1/7 * 10 = 1.43 -> 1 texel
        let atlas = CuboidAtlas::new(Vec3::new(5.0, 1.0, 1.0), [10, 10]);
        let left = atlas.rect(CuboidFace::Left);
        assert_relative_eq!(left.size.x, 0.1);
    }

    #[test]
    fn test_rects_stay_inside_texture() {
        let atlas = CuboidAtlas::new(Vec3::new(2.0, 3.0, 5.0), [256, 256]);
        for face in CuboidFace::ALL {
            for corner in atlas.rect(face).corners() {
                assert!(corner.x >= 0.0 && corner.x <= 1.0);
                assert!(corner.y >= 0.0 && corner.y <= 1.0);
            }
        }
    }

    #[test]
    fn test_each_face_uses_all_four_corners() {
        for face in CuboidFace::ALL {
            let mut used = face.corner_indices().to_vec();
            used.sort_unstable();
            used.dedup();
            assert_eq!(used, vec![0, 1, 2, 3], "{face:?}");
        }
    }

    #[test]
    fn test_zero_sized_cuboid_has_collapsed_uvs() {
        let atlas = CuboidAtlas::new(Vec3::zeros(), [64, 64]);
        for face in CuboidFace::ALL {
            assert_eq!(atlas.rect(face).size, Vec2::zeros());
        }
    }
}
