//! Mesh representation for overlay geometry
//!
//! Meshes are flat, non-indexed vertex sequences. Triangle-list meshes hold one
//! triangle per three consecutive vertices, clockwise when seen from outside.
//! Triangle-strip meshes are only produced by the plane and sphere builders.

use bytemuck::{Pod, Zeroable};

use super::GeometryError;
use crate::foundation::math::{Vec2, Vec3, Vec4};

/// Vertex with position, color and texture coordinate
///
/// `#[repr(C)]` keeps the layout stable for upload to GPU buffers.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Position in local space
    pub position: [f32; 3],

    /// RGBA color multiplied with the texture
    pub color: [f32; 4],

    /// Texture coordinates, normalized to the bound texture
    pub tex_coord: [f32; 2],
}

impl Vertex {
    /// White vertex
    pub fn new(position: Vec3, tex_coord: Vec2) -> Self {
        Self {
            position: position.into(),
            color: [1.0; 4],
            tex_coord: tex_coord.into(),
        }
    }

    /// Position as a vector
    pub fn pos(&self) -> Vec3 {
        Vec3::from(self.position)
    }

    /// Texture coordinate as a vector
    pub fn uv(&self) -> Vec2 {
        Vec2::from(self.tex_coord)
    }

    /// Copy of this vertex with a different color
    pub fn with_color(mut self, color: Vec4) -> Self {
        self.color = color.into();
        self
    }
}

/// How consecutive vertices form triangles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topology {
    /// Every three vertices form one triangle
    TriangleList,
    /// Every vertex after the second closes a triangle with the two before it
    TriangleStrip,
}

/// Vertex sequence plus the layout that interprets it
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    /// Vertex data
    pub vertices: Vec<Vertex>,
    /// Layout of `vertices`
    pub topology: Topology,
}

impl Mesh {
    /// Mesh in triangle-list layout
    pub fn triangle_list(vertices: Vec<Vertex>) -> Self {
        Self { vertices, topology: Topology::TriangleList }
    }

    /// Mesh in triangle-strip layout
    pub fn triangle_strip(vertices: Vec<Vertex>) -> Self {
        Self { vertices, topology: Topology::TriangleStrip }
    }

    /// Number of vertices
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// True when the mesh has no vertices
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Number of triangles the device will draw
    pub fn triangle_count(&self) -> usize {
        match self.topology {
            Topology::TriangleList => self.vertices.len() / 3,
            Topology::TriangleStrip => self.vertices.len().saturating_sub(2),
        }
    }

    /// Same geometry in triangle-list layout
    pub fn into_triangle_list(self) -> Result<Self, GeometryError> {
        match self.topology {
            Topology::TriangleList => Ok(self),
            Topology::TriangleStrip => Ok(Self::triangle_list(triangle_list_from_strip(&self.vertices)?)),
        }
    }

    /// Flip the winding of every triangle, for surfaces seen from the inside
    pub fn reversed(self) -> Result<Self, GeometryError> {
        let mut list = self.into_triangle_list()?;
        reverse_face_direction(&mut list.vertices)?;
        Ok(list)
    }

    /// Move every vertex by `offset`
    pub fn translate(&mut self, offset: &Vec3) {
        for vertex in &mut self.vertices {
            vertex.position = (vertex.pos() + offset).into();
        }
    }

    /// Append another triangle-list mesh
    pub fn extend_list(&mut self, other: &Self) {
        debug_assert_eq!(self.topology, Topology::TriangleList);
        debug_assert_eq!(other.topology, Topology::TriangleList);
        self.vertices.extend_from_slice(&other.vertices);
    }

    /// Raw bytes for buffer upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

/// Convert a triangle strip into a triangle list.
///
/// Triangle `i` uses `(v[i], v[i+1], v[i+2])` when `i` is even and the reverse
/// `(v[i+2], v[i+1], v[i])` when odd, so the whole strip keeps one winding.
pub fn triangle_list_from_strip(strip: &[Vertex]) -> Result<Vec<Vertex>, GeometryError> {
    if strip.len() < 3 {
        return Err(GeometryError::StripTooShort(strip.len()));
    }

    let mut list = Vec::with_capacity(3 * (strip.len() - 2));
    for (i, window) in strip.windows(3).enumerate() {
        if i % 2 == 0 {
            list.extend_from_slice(window);
        } else {
            list.extend([window[2], window[1], window[0]]);
        }
    }
    Ok(list)
}

/// Swap the first and third vertex of every triangle in a triangle list
pub fn reverse_face_direction(list: &mut [Vertex]) -> Result<(), GeometryError> {
    if list.len() % 3 != 0 {
        return Err(GeometryError::IncompleteTriangleList(list.len()));
    }
    for triangle in list.chunks_exact_mut(3) {
        triangle.swap(0, 2);
    }
    Ok(())
}
