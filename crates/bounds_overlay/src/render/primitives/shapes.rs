//! Plane, cuboid and sphere builders
//!
//! Axis roles follow the overlay's Z-up frame: x is right, y is front, z is top.

use super::atlas::{CuboidAtlas, CuboidFace};
use super::mesh::{Mesh, Vertex};
use super::GeometryError;
use crate::config::SphereDetailConfig;
use crate::foundation::math::{constants::{PI, TAU}, Vec2, Vec3};

/// Centered quad in the local xy plane, as a triangle strip
pub fn plane(width: f32, height: f32) -> Mesh {
    let (w, h) = (width * 0.5, height * 0.5);
    Mesh::triangle_strip(vec![
        Vertex::new(Vec3::new(-w, -h, 0.0), Vec2::new(0.0, 0.0)),
        Vertex::new(Vec3::new(-w, h, 0.0), Vec2::new(0.0, 1.0)),
        Vertex::new(Vec3::new(w, -h, 0.0), Vec2::new(1.0, 0.0)),
        Vertex::new(Vec3::new(w, h, 0.0), Vec2::new(1.0, 1.0)),
    ])
}

/// Corner slots returned by [`cuboid_corners`]
pub mod corner {
    /// left, back, top
    pub const LBT: usize = 0;
    /// left, front, top
    pub const LFT: usize = 1;
    /// right, back, top
    pub const RBT: usize = 2;
    /// right, front, top
    pub const RFT: usize = 3;
    /// right, front, bottom
    pub const RFB: usize = 4;
    /// right, back, bottom
    pub const RBB: usize = 5;
    /// left, front, bottom
    pub const LFB: usize = 6;
    /// left, back, bottom
    pub const LBB: usize = 7;
}

/// Eight corners of a cuboid centered on the origin
pub fn cuboid_corners(dimensions: Vec3) -> [Vec3; 8] {
    let rft = dimensions * 0.5;
    let (x, y, z) = (rft.x, rft.y, rft.z);
    [
        Vec3::new(-x, -y, z),
        Vec3::new(-x, y, z),
        Vec3::new(x, -y, z),
        Vec3::new(x, y, z),
        Vec3::new(x, y, -z),
        Vec3::new(x, -y, -z),
        Vec3::new(-x, y, -z),
        Vec3::new(-x, -y, -z),
    ]
}

/// Corner slots of the two triangles of a face, clockwise seen from outside
pub const fn face_triangles(face: CuboidFace) -> [[usize; 3]; 2] {
    use corner::*;
    match face {
        CuboidFace::Top => [[LBT, LFT, RBT], [RBT, LFT, RFT]],
        CuboidFace::Right => [[RBT, RFT, RBB], [RBB, RFT, RFB]],
        CuboidFace::Left => [[LBB, LFB, LBT], [LBT, LFB, LFT]],
        CuboidFace::Front => [[LFB, RFB, LFT], [LFT, RFB, RFT]],
        CuboidFace::Back => [[LBT, RBT, LBB], [LBB, RBT, RBB]],
        CuboidFace::Bottom => [[RBB, RFB, LBB], [LBB, RFB, LFB]],
    }
}

/// Cuboid centered on the origin: 12 triangles, 36 vertices, textured from one
/// atlas laid out for `texture_size`
pub fn cuboid(dimensions: Vec3, texture_size: [u32; 2]) -> Mesh {
    let corners = cuboid_corners(dimensions);
    let atlas = CuboidAtlas::new(dimensions, texture_size);

    let mut vertices = Vec::with_capacity(36);
    for face in CuboidFace::ALL {
        let uvs = atlas.face_uvs(face);
        let slots = face_triangles(face).into_iter().flatten();
        vertices.extend(slots.zip(uvs).map(|(slot, uv)| Vertex::new(corners[slot], uv)));
    }
    Mesh::triangle_list(vertices)
}

/// Default sphere detail for a radius
pub fn default_sphere_detail(radius: f32) -> u32 {
    SphereDetailConfig::default().detail_for(radius)
}

/// Latitude/longitude sphere as one triangle strip.
///
/// `detail` vertical segments sweep the full turn, `2 * detail` horizontal
/// segments sweep pole to pole. Emits `detail * 2 * (2 * detail + 1)` vertices;
/// the triangles joining two columns collapse onto the poles.
pub fn sphere(radius: f32, detail: u32) -> Result<Mesh, GeometryError> {
    if detail == 0 {
        return Err(GeometryError::InvalidSphereDetail(detail));
    }
    let vertical = detail as usize;
    let horizontal = 2 * vertical;

    let mut vertices = Vec::with_capacity(vertical * 2 * (horizontal + 1));
    for i in 0..vertical {
        let u1 = i as f32 / vertical as f32;
        let u2 = (i + 1) as f32 / vertical as f32;
        let (theta1, theta2) = (u1 * TAU, u2 * TAU);

        for j in 0..=horizontal {
            let v = j as f32 / horizontal as f32;
            let phi = v * PI;
            vertices.push(Vertex::new(spherical(radius, theta1, phi), Vec2::new(u1, v)));
            vertices.push(Vertex::new(spherical(radius, theta2, phi), Vec2::new(u2, v)));
        }
    }
    Ok(Mesh::triangle_strip(vertices))
}

fn spherical(radius: f32, theta: f32, phi: f32) -> Vec3 {
    Vec3::new(
        phi.sin() * theta.cos() * radius,
        phi.cos() * radius,
        phi.sin() * theta.sin() * radius,
    )
}
