//! Bounding volume descriptions
//!
//! Volumes are value-like descriptions owned by whoever registers them. The overlay
//! only reads them.

pub mod polygon;

pub use polygon::Polygon;

use std::fmt;
use std::rc::Rc;

use crate::foundation::math::{Axis, Vec2, Vec3};
use crate::render::primitives::GeometryError;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl Aabb {
    /// Create a box from two opposite corners, normalized so `min <= max` per axis
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.inf(&b),
            max: a.sup(&b),
        }
    }

    /// Create a box centered at a point with given half-extents
    pub fn from_center_extents(center: Vec3, extents: Vec3) -> Self {
        Self::new(center - extents, center + extents)
    }

    /// Get the center of the box
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Full edge lengths
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Get the extents (half-size) of the box
    pub fn extents(&self) -> Vec3 {
        self.size() * 0.5
    }

    /// Check if this box contains a point, boundary included
    pub fn contains_point(&self, point: &Vec3) -> bool {
        point.x >= self.min.x && point.x <= self.max.x &&
        point.y >= self.min.y && point.y <= self.max.y &&
        point.z >= self.min.z && point.z <= self.max.z
    }
}

/// Containment predicate of an arbitrary volume
pub type ContainmentTest = Rc<dyn Fn(&Vec3) -> bool>;

/// Polygon extruded along a world axis
#[derive(Debug, Clone, PartialEq)]
pub struct Prism {
    /// Cross-section, re-centered on the 2D origin
    pub polygon: Polygon,
    /// Lower extent along `axis`
    pub bottom: f32,
    /// Upper extent along `axis`
    pub top: f32,
    /// Extrusion axis
    pub axis: Axis,
}

impl Prism {
    /// Distance between the two caps
    pub fn length(&self) -> f32 {
        self.top - self.bottom
    }

    /// World position of the prism's center
    pub fn center(&self) -> Vec3 {
        self.axis.to_world(&self.polygon.origin(), self.bottom + self.length() * 0.5)
    }
}

/// Region whose outline the overlay can draw
#[derive(Clone)]
pub enum BoundingVolume {
    /// Ball around a center
    Sphere {
        /// Center of the sphere
        center: Vec3,
        /// Radius of the sphere
        radius: f32,
    },
    /// Axis-aligned box
    Box(Aabb),
    /// Extruded polygon
    Prism(Prism),
    /// Region known only through a containment test
    Arbitrary {
        /// Inside/outside test
        test: ContainmentTest,
        /// Box enclosing every point the test accepts
        bounds: Aabb,
    },
}

impl BoundingVolume {
    /// Sphere volume
    pub fn sphere(center: Vec3, radius: f32) -> Self {
        Self::Sphere { center, radius }
    }

    /// Box volume spanning two opposite corners
    pub fn cuboid(a: Vec3, b: Vec3) -> Self {
        Self::Box(Aabb::new(a, b))
    }

    /// Prism volume from an ordered ring and two extents along `axis`
    pub fn prism(
        ring: impl IntoIterator<Item = Vec2>,
        bottom: f32,
        top: f32,
        axis: Axis,
    ) -> Result<Self, GeometryError> {
        Ok(Self::Prism(Prism {
            polygon: Polygon::new(ring)?,
            bottom: bottom.min(top),
            top: bottom.max(top),
            axis,
        }))
    }

    /// Volume defined by a containment test within `bounds`
    pub fn arbitrary(test: impl Fn(&Vec3) -> bool + 'static, bounds: Aabb) -> Self {
        Self::Arbitrary {
            test: Rc::new(test),
            bounds,
        }
    }

    /// Whether a world point lies inside the volume
    pub fn contains(&self, point: &Vec3) -> bool {
        match self {
            Self::Sphere { center, radius } => (point - center).norm_squared() <= radius * radius,
            Self::Box(aabb) => aabb.contains_point(point),
            Self::Prism(prism) => {
                let (planar, along) = prism.axis.to_local(point);
                along >= prism.bottom
                    && along <= prism.top
                    && prism.polygon.contains(&(planar - prism.polygon.origin()))
            }
            Self::Arbitrary { test, .. } => test(point),
        }
    }

    /// Axis-aligned box enclosing the volume
    pub fn bounds(&self) -> Aabb {
        match self {
            Self::Sphere { center, radius } => Aabb::from_center_extents(*center, Vec3::repeat(*radius)),
            Self::Box(aabb) | Self::Arbitrary { bounds: aabb, .. } => *aabb,
            Self::Prism(prism) => {
                let (min, max) = prism.polygon.bounding_rect();
                let origin = prism.polygon.origin();
                Aabb::new(
                    prism.axis.to_world(&(min + origin), prism.bottom),
                    prism.axis.to_world(&(max + origin), prism.top),
                )
            }
        }
    }

    /// Short variant name, for logs
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Sphere { .. } => "sphere",
            Self::Box(_) => "box",
            Self::Prism(_) => "prism",
            Self::Arbitrary { .. } => "arbitrary",
        }
    }
}

impl fmt::Debug for BoundingVolume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sphere { center, radius } => f
                .debug_struct("Sphere")
                .field("center", center)
                .field("radius", radius)
                .finish(),
            Self::Box(aabb) => f.debug_tuple("Box").field(aabb).finish(),
            Self::Prism(prism) => f.debug_tuple("Prism").field(prism).finish(),
            Self::Arbitrary { bounds, .. } => f
                .debug_struct("Arbitrary")
                .field("bounds", bounds)
                .finish_non_exhaustive(),
        }
    }
}
