//! Procedural mesh primitives
//!
//! Pure builders turning shape parameters into vertex lists. Nothing here touches
//! the device; uploading is the caller's business.

pub mod atlas;
pub mod mesh;
pub mod prism;
pub mod shapes;

pub use atlas::{CuboidAtlas, CuboidFace, UvRect};
pub use mesh::{reverse_face_direction, triangle_list_from_strip, Mesh, Topology, Vertex};

/// Invalid input to a geometry builder
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Voxel edge length must be positive
    #[error("Voxel detail must be positive, got {0}")]
    InvalidDetail(f32),

    /// Sphere segment count must be positive
    #[error("Sphere detail must be at least 1, got {0}")]
    InvalidSphereDetail(u32),

    /// A strip needs at least one triangle
    #[error("Triangle strip needs at least 3 vertices, got {0}")]
    StripTooShort(usize),

    /// A triangle list must hold whole triangles
    #[error("Triangle list length {0} is not a multiple of 3")]
    IncompleteTriangleList(usize),

    /// A polygon needs three non-collinear vertices
    #[error("Polygon is degenerate ({0} usable vertices)")]
    DegeneratePolygon(usize),

    /// A voxel grid would exceed its cell limit
    #[error("Voxel grid {dims:?} exceeds the limit of {limit} cells")]
    GridTooLarge {
        /// Requested cells per axis
        dims: [usize; 3],
        /// Cell limit in force
        limit: usize,
    },
}
