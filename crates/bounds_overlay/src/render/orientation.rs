//! World placement of overlay entities

use crate::foundation::math::{Mat4, Rotation, Vec3};

/// How an entity is rotated in the world
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Orientation {
    /// Constant rotation
    Fixed(Rotation),
    /// Rotates about `up` to keep facing the viewer
    FaceViewer {
        /// Axis the entity turns around, normalized
        up: Vec3,
    },
}

impl Default for Orientation {
    fn default() -> Self {
        Self::Fixed(Rotation::identity())
    }
}

impl Orientation {
    /// Orientation from a direction vector. A vector along world z (or a zero
    /// vector) needs no rotation; anything else faces the viewer around it.
    pub fn from_vector(direction: Vec3) -> Self {
        if direction.cross(&Vec3::z()).norm_squared() <= f32::EPSILON {
            Self::default()
        } else {
            Self::FaceViewer { up: direction.normalize() }
        }
    }

    /// Model matrix at `position` for a viewer at `viewer`
    pub fn world_matrix(&self, position: &Vec3, viewer: &Vec3) -> Mat4 {
        match self {
            Self::Fixed(rotation) => Mat4::new_translation(position) * rotation.to_homogeneous(),
            Self::FaceViewer { up } => world_axis_aligned_matrix(viewer, position, up),
        }
    }
}

/// Billboard locked to an up axis and turned about it toward the camera.
///
/// Local z maps to `up_axis`, local y points toward the camera and local x
/// completes a right-handed basis.
pub fn world_axis_aligned_matrix(camera_position: &Vec3, position: &Vec3, up_axis: &Vec3) -> Mat4 {
    let up = up_axis.normalize();

    // Project to_camera onto plane perpendicular to up axis
    let to_camera = camera_position - position;
    let projected = to_camera - up * up.dot(&to_camera);
    let forward = projected
        .try_normalize(f32::EPSILON)
        .unwrap_or_else(|| any_perpendicular(&up));

    let right = forward.cross(&up);

    Mat4::new(
        right.x, forward.x, up.x, position.x,
        right.y, forward.y, up.y, position.y,
        right.z, forward.z, up.z, position.z,
        0.0, 0.0, 0.0, 1.0,
    )
}

// Viewer on the axis itself: any direction in the plane will do
fn any_perpendicular(axis: &Vec3) -> Vec3 {
    let helper = if axis.x.abs() < 0.9 { Vec3::x() } else { Vec3::y() };
    axis.cross(&helper).normalize()
}
