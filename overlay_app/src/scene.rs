//! Scene descriptions loaded from RON

use serde::{Deserialize, Serialize};

use bounds_overlay::foundation::math::{Axis, Vec2, Vec3};
use bounds_overlay::render::primitives::GeometryError;
use bounds_overlay::render::texture::DebugColor;
use bounds_overlay::volume::{Aabb, BoundingVolume};

/// Volumes to show, plus the viewer to render them for
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneFile {
    /// Camera position for draw ordering
    pub viewer: Vec3,
    /// Volumes in display order
    pub volumes: Vec<VolumeSpec>,
}

/// One volume and the color it is shown with
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolumeSpec {
    /// Human-readable label for logs
    pub name: String,
    /// Shape
    pub shape: ShapeSpec,
    /// Initial color
    #[serde(default)]
    pub color: DebugColor,
    /// Color applied after display, to exercise recoloring
    #[serde(default)]
    pub recolor: Option<DebugColor>,
    /// Voxel edge length override for arbitrary shapes
    #[serde(default)]
    pub voxel_detail: Option<f32>,
}

/// Shape description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ShapeSpec {
    /// Sphere
    Sphere { center: Vec3, radius: f32 },
    /// Axis-aligned box between two corners
    Box { min: Vec3, max: Vec3 },
    /// Polygon extruded along an axis
    Prism { ring: Vec<Vec2>, bottom: f32, top: f32, axis: Axis },
    /// Region given by a named containment test
    Arbitrary { region: Region, min: Vec3, max: Vec3 },
}

/// Containment tests available to scene files
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum Region {
    /// Ring around the z axis through `center`
    Torus { center: Vec3, major: f32, minor: f32 },
    /// Axis-aligned ellipsoid
    Ellipsoid { center: Vec3, radii: Vec3 },
}

impl Region {
    fn contains(self, point: &Vec3) -> bool {
        match self {
            Self::Torus { center, major, minor } => {
                let p = point - center;
                let ring = (p.x.hypot(p.y) - major).hypot(p.z);
                ring <= minor
            }
            Self::Ellipsoid { center, radii } => (point - center).component_div(&radii).norm_squared() <= 1.0,
        }
    }
}

impl ShapeSpec {
    /// Bounding volume for this shape
    pub fn to_volume(&self) -> Result<BoundingVolume, GeometryError> {
        Ok(match self {
            Self::Sphere { center, radius } => BoundingVolume::sphere(*center, *radius),
            Self::Box { min, max } => BoundingVolume::cuboid(*min, *max),
            Self::Prism { ring, bottom, top, axis } => BoundingVolume::prism(ring.iter().copied(), *bottom, *top, *axis)?,
            Self::Arbitrary { region, min, max } => {
                let region = *region;
                BoundingVolume::arbitrary(move |p: &Vec3| region.contains(p), Aabb::new(*min, *max))
            }
        })
    }
}

impl Default for SceneFile {
    fn default() -> Self {
        Self {
            viewer: Vec3::new(0.0, -40.0, 12.0),
            volumes: vec![
                VolumeSpec {
                    name: "spawn sphere".to_string(),
                    shape: ShapeSpec::Sphere { center: Vec3::new(-12.0, 0.0, 4.0), radius: 6.0 },
                    color: DebugColor::Default,
                    recolor: Some(DebugColor::Joined),
                    voxel_detail: None,
                },
                VolumeSpec {
                    name: "hangar".to_string(),
                    shape: ShapeSpec::Box { min: Vec3::new(4.0, -3.0, 0.0), max: Vec3::new(14.0, 5.0, 6.0) },
                    color: DebugColor::Left,
                    recolor: None,
                    voxel_detail: None,
                },
                VolumeSpec {
                    name: "landing zone".to_string(),
                    shape: ShapeSpec::Prism {
                        ring: vec![
                            Vec2::new(0.0, 10.0),
                            Vec2::new(8.0, 10.0),
                            Vec2::new(10.0, 16.0),
                            Vec2::new(4.0, 20.0),
                            Vec2::new(-2.0, 15.0),
                        ],
                        bottom: 0.0,
                        top: 3.0,
                        axis: Axis::Z,
                    },
                    color: DebugColor::Default,
                    recolor: Some(DebugColor::Left),
                    voxel_detail: None,
                },
                VolumeSpec {
                    name: "ring gate".to_string(),
                    shape: ShapeSpec::Arbitrary {
                        region: Region::Torus { center: Vec3::new(0.0, 30.0, 6.0), major: 8.0, minor: 2.5 },
                        min: Vec3::new(-11.0, 19.0, 3.0),
                        max: Vec3::new(11.0, 41.0, 9.0),
                    },
                    color: DebugColor::Default,
                    recolor: None,
                    voxel_detail: Some(1.0),
                },
            ],
        }
    }
}
