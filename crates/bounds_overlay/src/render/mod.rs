//! Rendering side of the overlay
//!
//! Geometry builders live in [`primitives`]. The other modules describe what the
//! overlay needs from the host renderer and carry in-process implementations of
//! those contracts in [`headless`].

pub mod device;
pub mod draw_queue;
pub mod headless;
pub mod orientation;
pub mod primitives;
pub mod scene;
pub mod texture;

pub use device::{DeviceError, GraphicsDevice, GpuMesh, SharedDevice, VertexBuffer};
pub use draw_queue::{DrawCommand, DrawQueue};
pub use orientation::Orientation;
pub use scene::SceneRenderer;
pub use texture::{DebugColor, Texture, TextureCache, TextureError, TextureHandle, TextureSource};
