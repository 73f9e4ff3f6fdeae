//! 2D polygon cross-section of a prism volume
//!
//! Triangulation and area queries go through `geo`; the overlay only ever needs
//! simple polygons without holes.

use geo::{Area, BoundingRect, Contains, Coord, LineString, Point, Polygon as GeoPolygon, TriangulateEarcut};

use crate::foundation::math::Vec2;
use crate::render::primitives::GeometryError;

/// Simple polygon stored re-centered on the origin and in clockwise order
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    points: Vec<Vec2>,
    origin: Vec2,
}

impl Polygon {
    /// Build a polygon from an ordered ring of points.
    ///
    /// A trailing point equal to the first one is dropped. The ring is moved so its
    /// bounding rectangle is centered on the origin (the removed offset is kept in
    /// [`Polygon::origin`]) and reordered to run clockwise.
    pub fn new(points: impl IntoIterator<Item = Vec2>) -> Result<Self, GeometryError> {
        let mut points: Vec<Vec2> = points.into_iter().collect();
        if points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        if points.len() < 3 {
            return Err(GeometryError::DegeneratePolygon(points.len()));
        }

        let (min, max) = bounds_of(&points);
        let origin = (min + max) * 0.5;
        for point in &mut points {
            *point -= origin;
        }

        let area = to_geo(&points).signed_area();
        if area.abs() <= f32::EPSILON {
            return Err(GeometryError::DegeneratePolygon(points.len()));
        }
        if area > 0.0 {
            points.reverse();
        }

        Ok(Self { points, origin })
    }

    /// Vertices, re-centered and clockwise
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Offset removed from the input points
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Number of vertices
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; a polygon has at least three vertices
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Bounding rectangle of the re-centered polygon as `(min, max)`
    pub fn bounding_rect(&self) -> (Vec2, Vec2) {
        to_geo(&self.points)
            .bounding_rect()
            .map_or_else(|| bounds_of(&self.points), |rect| {
                (Vec2::new(rect.min().x, rect.min().y), Vec2::new(rect.max().x, rect.max().y))
            })
    }

    /// Point-in-polygon test in re-centered coordinates
    pub fn contains(&self, point: &Vec2) -> bool {
        to_geo(&self.points).contains(&Point::new(point.x, point.y))
    }

    /// Ear-clip the polygon into clockwise triangles
    pub fn triangulate(&self) -> Vec<[Vec2; 3]> {
        let raw = to_geo(&self.points).earcut_triangles_raw();
        let vertex = |index: usize| Vec2::new(raw.vertices[2 * index], raw.vertices[2 * index + 1]);

        raw.triangle_indices
            .chunks_exact(3)
            .map(|tri| {
                let triangle = [vertex(tri[0]), vertex(tri[1]), vertex(tri[2])];
                if signed_area(&triangle) > 0.0 {
                    [triangle[0], triangle[2], triangle[1]]
                } else {
                    triangle
                }
            })
            .collect()
    }
}

/// Signed area of a triangle, positive when counter-clockwise
pub fn signed_area(triangle: &[Vec2; 3]) -> f32 {
    let ab = triangle[1] - triangle[0];
    let ac = triangle[2] - triangle[0];
    0.5 * ab.perp(&ac)
}

fn to_geo(points: &[Vec2]) -> GeoPolygon<f32> {
    let coords: Vec<Coord<f32>> = points.iter().map(|p| Coord { x: p.x, y: p.y }).collect();
    GeoPolygon::new(LineString::new(coords), vec![])
}

fn bounds_of(points: &[Vec2]) -> (Vec2, Vec2) {
    points.iter().fold(
        (Vec2::repeat(f32::INFINITY), Vec2::repeat(f32::NEG_INFINITY)),
        |(min, max), p| (min.inf(p), max.sup(p)),
    )
}
