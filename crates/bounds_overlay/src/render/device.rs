//! Device access for vertex buffer creation
//!
//! The host exposes a device context that must be acquired before buffers are
//! created and released afterwards. [`DeviceLease`] pairs the two so the context is
//! released on every exit path. Buffers belong to the mesh that created them and
//! are destroyed when that mesh is dropped.

use std::fmt;
use std::rc::Rc;

use super::primitives::{Mesh, Topology};

/// Identifier of a device-side vertex buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferId(pub u64);

/// Device errors
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DeviceError {
    /// The device context could not be acquired
    #[error("Device context unavailable: {0}")]
    ContextUnavailable(String),

    /// Buffer allocation failed
    #[error("Buffer creation failed: {0}")]
    BufferCreation(String),
}

/// Graphics device used to upload overlay geometry
pub trait GraphicsDevice {
    /// Acquire the device context
    fn acquire_context(&self) -> Result<(), DeviceError>;

    /// Release a context obtained from [`GraphicsDevice::acquire_context`]
    fn release_context(&self);

    /// Create a vertex buffer holding `data`. Called with the context held.
    fn create_vertex_buffer(&self, data: &[u8], vertex_count: usize) -> Result<BufferId, DeviceError>;

    /// Destroy a buffer created by this device
    fn destroy_vertex_buffer(&self, buffer: BufferId);
}

/// Device handle shared by the overlay and every buffer it creates
pub type SharedDevice = Rc<dyn GraphicsDevice>;

/// Held device context, released on drop
pub struct DeviceLease<'a> {
    device: &'a dyn GraphicsDevice,
}

impl<'a> DeviceLease<'a> {
    /// Acquire the device context
    pub fn acquire(device: &'a dyn GraphicsDevice) -> Result<Self, DeviceError> {
        device.acquire_context()?;
        Ok(Self { device })
    }

    /// Create a vertex buffer while the context is held
    pub fn create_vertex_buffer(&self, data: &[u8], vertex_count: usize) -> Result<BufferId, DeviceError> {
        self.device.create_vertex_buffer(data, vertex_count)
    }
}

impl Drop for DeviceLease<'_> {
    fn drop(&mut self) {
        self.device.release_context();
    }
}

/// Vertex buffer owned by exactly one mesh
pub struct VertexBuffer {
    id: BufferId,
    vertex_count: usize,
    device: SharedDevice,
}

impl VertexBuffer {
    /// Upload a mesh's vertices
    pub fn upload(device: &SharedDevice, mesh: &Mesh) -> Result<Self, DeviceError> {
        let lease = DeviceLease::acquire(device.as_ref())?;
        let id = lease.create_vertex_buffer(mesh.as_bytes(), mesh.len())?;
        Ok(Self {
            id,
            vertex_count: mesh.len(),
            device: Rc::clone(device),
        })
    }

    /// Device-side identifier
    pub fn id(&self) -> BufferId {
        self.id
    }

    /// Number of vertices in the buffer
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }
}

impl Drop for VertexBuffer {
    fn drop(&mut self) {
        self.device.destroy_vertex_buffer(self.id);
    }
}

impl fmt::Debug for VertexBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VertexBuffer")
            .field("id", &self.id)
            .field("vertex_count", &self.vertex_count)
            .finish_non_exhaustive()
    }
}

/// Mesh together with its uploaded buffer. Empty meshes are not uploaded.
#[derive(Debug)]
pub struct GpuMesh {
    mesh: Mesh,
    buffer: Option<VertexBuffer>,
}

impl GpuMesh {
    /// Upload a mesh
    pub fn new(device: &SharedDevice, mesh: Mesh) -> Result<Self, DeviceError> {
        let buffer = if mesh.is_empty() {
            None
        } else {
            Some(VertexBuffer::upload(device, &mesh)?)
        };
        Ok(Self { mesh, buffer })
    }

    /// CPU-side geometry
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Buffer, if the mesh has any vertices
    pub fn buffer(&self) -> Option<&VertexBuffer> {
        self.buffer.as_ref()
    }

    /// Vertex layout
    pub fn topology(&self) -> Topology {
        self.mesh.topology
    }
}
