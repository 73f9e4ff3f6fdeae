//! # Bounds Overlay
//!
//! Procedural debug geometry for bounding volumes placed in a live 3D scene.
//!
//! ## Features
//!
//! - **Primitive meshes**: plane, cuboid, sphere and extruded-polygon (prism) builders
//! - **Texture atlas**: one texture unfolded over the six faces of a cuboid
//! - **Voxelization**: arbitrary volumes approximated by a culled voxel grid
//! - **Overlay registry**: per-volume render entities with display, recolor and removal
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::rc::Rc;
//! use bounds_overlay::prelude::*;
//! use bounds_overlay::render::headless::{HeadlessDevice, HeadlessTextureSource, RecordingScene};
//!
//! fn main() -> Result<(), OverlayError> {
//!     let device: SharedDevice = Rc::new(HeadlessDevice::new());
//!     let textures = Box::new(HeadlessTextureSource::new(64, 64));
//!     let mut overlay = BoundsOverlay::new(
//!         OverlayConfig::default(),
//!         device,
//!         textures,
//!         RecordingScene::default(),
//!     )?;
//!
//!     let volume = VolumeRef::new(BoundingVolume::sphere(Vec3::zeros(), 4.0));
//!     overlay.display(&volume, DebugColor::Default)?;
//!     overlay.recolor(&volume, DebugColor::Joined)?;
//!     overlay.update(&Viewer::at(Vec3::new(0.0, 0.0, 10.0)));
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod volume;
pub mod render;
pub mod voxel;
pub mod debug;

/// Common imports for overlay users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, OverlayConfig},
        debug::{
            BoundsOverlay, EntityKind, OverlayError, OverlayEntity, Viewer, VolumeMeshDispatcher,
            VolumeRef,
        },
        foundation::math::{Axis, Mat4, Vec2, Vec3},
        render::{
            device::{DeviceError, GraphicsDevice, SharedDevice},
            primitives::{GeometryError, Mesh, Topology, Vertex},
            scene::SceneRenderer,
            texture::{DebugColor, Texture, TextureError, TextureSource},
        },
        volume::{Aabb, BoundingVolume, Polygon},
        voxel::{VisibilityCuller, VoxelGrid, Voxelizer},
    };
}
