//! Math utilities and types
//!
//! Thin aliases over `nalgebra` plus the axis conventions used by the overlay.
//! The overlay works in a Z-up frame: x points right, y points front, z points up.

use serde::{Deserialize, Serialize};

pub use nalgebra::{Matrix3, Matrix4, Rotation3, Vector2, Vector3, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Rotation type
pub type Rotation = Rotation3<f32>;

/// World axis a prism is extruded along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Axis {
    /// World x
    X,
    /// World y
    Y,
    /// World z
    #[default]
    Z,
}

impl Axis {
    /// Unit vector of this axis
    pub fn unit(self) -> Vec3 {
        match self {
            Self::X => Vec3::x(),
            Self::Y => Vec3::y(),
            Self::Z => Vec3::z(),
        }
    }

    /// Rotation taking local coordinates (extrusion along local z) to world coordinates.
    ///
    /// The mapping is a cyclic permutation of the axes, so it is a proper rotation
    /// and keeps triangle winding intact.
    pub fn basis(self) -> Rotation {
        let columns = match self {
            Self::Z => [Vec3::x(), Vec3::y(), Vec3::z()],
            Self::X => [Vec3::y(), Vec3::z(), Vec3::x()],
            Self::Y => [Vec3::z(), Vec3::x(), Vec3::y()],
        };
        Rotation::from_matrix_unchecked(Mat3::from_columns(&columns))
    }

    /// Split a world point into its in-plane coordinates and its coordinate along the axis
    pub fn to_local(self, point: &Vec3) -> (Vec2, f32) {
        let local = self.basis().inverse() * point;
        (Vec2::new(local.x, local.y), local.z)
    }

    /// Inverse of [`Axis::to_local`]
    pub fn to_world(self, planar: &Vec2, along: f32) -> Vec3 {
        self.basis() * Vec3::new(planar.x, planar.y, along)
    }
}

/// Common math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Two pi constant
    pub const TAU: f32 = std::f32::consts::TAU;

    /// Epsilon for floating point comparisons
    pub const EPSILON: f32 = 1e-6;
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_basis_maps_local_z_onto_axis() {
        for axis in [Axis::X, Axis::Y, Axis::Z] {
            let mapped = axis.basis() * Vec3::z();
            assert_relative_eq!(mapped, axis.unit());
        }
    }

    #[test]
    fn test_basis_is_proper_rotation() {
        for axis in [Axis::X, Axis::Y, Axis::Z] {
            assert_relative_eq!(axis.basis().matrix().determinant(), 1.0);
        }
    }

    #[test]
    fn test_local_world_round_trip() {
        let point = Vec3::new(1.5, -2.0, 7.0);
        let (planar, along) = Axis::X.to_local(&point);
        assert_relative_eq!(along, 1.5);
        assert_relative_eq!(Axis::X.to_world(&planar, along), point);
    }
}
