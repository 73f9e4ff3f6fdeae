//! Extruded-polygon (prism) builder
//!
//! The prism is built in local space with the extrusion along local z and centered
//! on the origin. Texture space is split three ways: the lateral ring takes the
//! top half, the top lid the lower-left quadrant, the bottom lid the lower-right.

use super::mesh::{reverse_face_direction, triangle_list_from_strip, Mesh, Vertex};
use super::GeometryError;
use crate::foundation::math::{Vec2, Vec3};
use crate::volume::Polygon;

/// Prism of `length` over a clockwise polygon, as a triangle list
pub fn prism(polygon: &Polygon, length: f32) -> Result<Mesh, GeometryError> {
    let mut mesh = Mesh::triangle_list(ring(polygon, length)?);
    mesh.vertices.extend(lids(polygon, length)?);
    Ok(mesh)
}

/// Lateral faces: a strip with one top/bottom pair per polygon vertex plus a
/// closing pair, converted to a list
pub fn ring(polygon: &Polygon, length: f32) -> Result<Vec<Vertex>, GeometryError> {
    let (top, bottom) = (length * 0.5, -length * 0.5);
    let points = polygon.points();
    let count = points.len() as f32;

    let mut strip = Vec::with_capacity(2 * (points.len() + 1));
    let closing = points.first().map(|p| (p, points.len()));
    for (point, i) in points.iter().zip(0..).chain(closing) {
        let u = i as f32 / count;
        strip.push(Vertex::new(Vec3::new(point.x, point.y, top), Vec2::new(u, 0.5)));
        strip.push(Vertex::new(Vec3::new(point.x, point.y, bottom), Vec2::new(u, 0.0)));
    }

    triangle_list_from_strip(&strip)
}

/// Top and bottom caps. The bottom cap is the top cap's triangles reversed,
/// with its texture mirrored horizontally.
pub fn lids(polygon: &Polygon, length: f32) -> Result<Vec<Vertex>, GeometryError> {
    let (top, bottom) = (length * 0.5, -length * 0.5);
    let (min, max) = polygon.bounding_rect();
    let extent = max - min;
    let relative = |p: &Vec2| (p - min).component_div(&extent);

    let triangles = polygon.triangulate();
    let mut top_lid = Vec::with_capacity(3 * triangles.len());
    let mut bottom_lid = Vec::with_capacity(3 * triangles.len());
    for point in triangles.iter().flatten() {
        let rel = relative(point);
        top_lid.push(Vertex::new(
            Vec3::new(point.x, point.y, top),
            Vec2::new(rel.x * 0.5, 0.5 + rel.y * 0.5),
        ));
        bottom_lid.push(Vertex::new(
            Vec3::new(point.x, point.y, bottom),
            Vec2::new(0.5 + (1.0 - rel.x) * 0.5, 0.5 + rel.y * 0.5),
        ));
    }
    reverse_face_direction(&mut bottom_lid)?;

    top_lid.append(&mut bottom_lid);
    Ok(top_lid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::volume::polygon::signed_area;
    use approx::assert_relative_eq;

    fn square() -> Polygon {
        Polygon::new(vec![
            Vec2::new(-1.0, -1.0),
            Vec2::new(1.0, -1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(-1.0, 1.0),
        ])
        .unwrap()
    }

    // Counter-clockwise L with a reflex corner at (1, 1)
    fn l_shape_ccw() -> Vec<Vec2> {
        vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(2.0, 1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(1.0, 2.0),
            Vec2::new(0.0, 2.0),
        ]
    }

    fn ring_area(points: &[Vec2]) -> f32 {
        let n = points.len();
        0.5 * (0..n).map(|i| points[i].perp(&points[(i + 1) % n])).sum::<f32>()
    }

    // Whether a local point lies inside the solid prism
    fn inside(polygon: &Polygon, length: f32, point: &Vec3) -> bool {
        point.z.abs() < length * 0.5 && polygon.contains(&point.xy())
    }

    fn outward_dot(triangle: &[Vertex]) -> f32 {
        let (a, b, c) = (triangle[0].pos(), triangle[1].pos(), triangle[2].pos());
        let normal = (b - a).cross(&(c - a));
        let centroid = (a + b + c) / 3.0;
        normal.dot(&centroid)
    }

    #[test]
    fn test_vertex_counts() {
        let polygon = square();
        assert_eq!(ring(&polygon, 2.0).unwrap().len(), 6 * polygon.len());
        assert_eq!(lids(&polygon, 2.0).unwrap().len(), 6 * (polygon.len() - 2));
        assert_eq!(prism(&polygon, 2.0).unwrap().len(), 12 * polygon.len() - 12);
    }

    #[test]
    fn test_every_face_clockwise_from_outside() {
        // A convex prism centered on the origin: the centroid of any face points outward
        let mesh = prism(&square(), 4.0).unwrap();
        for triangle in mesh.vertices.chunks_exact(3) {
            assert!(outward_dot(triangle) < 0.0);
        }
    }

    #[test]
    fn test_extents() {
        let mesh = prism(&square(), 3.0).unwrap();
        for vertex in &mesh.vertices {
            assert_relative_eq!(vertex.pos().z.abs(), 1.5);
        }
    }

    #[test]
    fn test_uv_regions() {
        let polygon = square();
        for vertex in ring(&polygon, 1.0).unwrap() {
            assert!(vertex.uv().y <= 0.5);
        }
        let lid_vertices = lids(&polygon, 1.0).unwrap();
        let (top_lid, bottom_lid) = lid_vertices.split_at(lid_vertices.len() / 2);
        for vertex in top_lid {
            assert!(vertex.uv().x <= 0.5 && vertex.uv().y >= 0.5);
        }
        for vertex in bottom_lid {
            assert!(vertex.uv().x >= 0.5 && vertex.uv().y >= 0.5);
        }
    }

    #[test]
    fn test_closing_pair_wraps_texture() {
        let strip_end = ring(&square(), 1.0).unwrap();
        let max_u = strip_end.iter().map(|v| v.uv().x).fold(0.0, f32::max);
        assert_relative_eq!(max_u, 1.0);
    }

    #[test]
    fn test_concave_polygon_counts() {
        let polygon = Polygon::new(l_shape_ccw()).unwrap();
        assert_eq!(polygon.triangulate().len(), polygon.len() - 2);
        assert_eq!(lids(&polygon, 2.0).unwrap().len(), 2 * 3 * (polygon.len() - 2));
        assert_eq!(prism(&polygon, 2.0).unwrap().len(), 12 * 6 - 12);
    }

    #[test]
    fn test_concave_faces_clockwise_from_outside() {
        // Centroids do not help on a concave outline: step off each face instead.
        // The face normal points into the solid, its opposite out of it.
        let polygon = Polygon::new(l_shape_ccw()).unwrap();
        let length = 2.0;
        let mesh = prism(&polygon, length).unwrap();
        for triangle in mesh.vertices.chunks_exact(3) {
            let (a, b, c) = (triangle[0].pos(), triangle[1].pos(), triangle[2].pos());
            let normal = (b - a).cross(&(c - a)).normalize();
            let centroid = (a + b + c) / 3.0;
            assert!(inside(&polygon, length, &(centroid + normal * 1e-3)), "{triangle:?}");
            assert!(!inside(&polygon, length, &(centroid - normal * 1e-3)), "{triangle:?}");
        }
    }

    #[test]
    fn test_lid_triangles_cover_concave_polygon() {
        let polygon = Polygon::new(l_shape_ccw()).unwrap();
        let triangles = polygon.triangulate();
        let area: f32 = triangles.iter().map(signed_area).sum();
        // Clockwise triangles have negative area; the L covers 3 unit squares
        assert!(triangles.iter().all(|triangle| signed_area(triangle) < 0.0));
        assert_relative_eq!(area, -3.0, epsilon = 1e-5);
    }

    #[test]
    fn test_counter_clockwise_input_is_reordered() {
        let ccw = l_shape_ccw();
        assert!(ring_area(&ccw) > 0.0);
        let polygon = Polygon::new(ccw.clone()).unwrap();
        assert!(ring_area(polygon.points()) < 0.0);

        // Same mesh as the clockwise version of the outline
        let cw = Polygon::new(ccw.into_iter().rev()).unwrap();
        assert_eq!(prism(&polygon, 2.0).unwrap(), prism(&cw, 2.0).unwrap());
    }
}
