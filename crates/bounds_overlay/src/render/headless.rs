//! In-process implementations of the host interfaces
//!
//! These stand in for a GPU device, a texture store and a scene. They keep enough
//! bookkeeping to check resource pairing, and drive the overlay without a window.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use super::device::{BufferId, DeviceError, GraphicsDevice};
use super::scene::{EntityKey, SceneRenderer};
use super::texture::{Texture, TextureError, TextureHandle, TextureSource};
use crate::debug::{EntityKind, OverlayEntity};

/// Device that hands out buffer ids and tracks which are alive
#[derive(Debug, Default)]
pub struct HeadlessDevice {
    next_id: Cell<u64>,
    live: RefCell<HashSet<BufferId>>,
    created: Cell<usize>,
    open_contexts: Cell<usize>,
    fail_next_buffer: Cell<bool>,
    fail_next_context: Cell<bool>,
}

impl HeadlessDevice {
    /// Create a device with no buffers
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next buffer creation fail
    pub fn fail_next_buffer(&self) {
        self.fail_next_buffer.set(true);
    }

    /// Make the next context acquisition fail
    pub fn fail_next_context(&self) {
        self.fail_next_context.set(true);
    }

    /// Buffers created and not yet destroyed
    pub fn live_buffers(&self) -> usize {
        self.live.borrow().len()
    }

    /// Buffers created over the device's lifetime
    pub fn buffers_created(&self) -> usize {
        self.created.get()
    }

    /// Contexts acquired and not yet released
    pub fn open_contexts(&self) -> usize {
        self.open_contexts.get()
    }
}

impl GraphicsDevice for HeadlessDevice {
    fn acquire_context(&self) -> Result<(), DeviceError> {
        if self.fail_next_context.replace(false) {
            return Err(DeviceError::ContextUnavailable("injected failure".to_string()));
        }
        self.open_contexts.set(self.open_contexts.get() + 1);
        Ok(())
    }

    fn release_context(&self) {
        self.open_contexts.set(self.open_contexts.get().saturating_sub(1));
    }

    fn create_vertex_buffer(&self, data: &[u8], vertex_count: usize) -> Result<BufferId, DeviceError> {
        if self.open_contexts.get() == 0 {
            return Err(DeviceError::ContextUnavailable("buffer created without a context".to_string()));
        }
        if self.fail_next_buffer.replace(false) {
            return Err(DeviceError::BufferCreation(format!("{} bytes for {vertex_count} vertices", data.len())));
        }
        let id = BufferId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.created.set(self.created.get() + 1);
        self.live.borrow_mut().insert(id);
        Ok(id)
    }

    fn destroy_vertex_buffer(&self, buffer: BufferId) {
        self.live.borrow_mut().remove(&buffer);
    }
}

/// Load and release counters shared with a [`HeadlessTextureSource`]
#[derive(Debug, Default)]
pub struct TextureStats {
    loaded: Cell<usize>,
    released: Cell<usize>,
}

impl TextureStats {
    /// Textures handed out
    pub fn loaded(&self) -> usize {
        self.loaded.get()
    }

    /// Textures given back
    pub fn released(&self) -> usize {
        self.released.get()
    }
}

/// Texture source that synthesizes textures of a fixed size
#[derive(Debug)]
pub struct HeadlessTextureSource {
    width: u32,
    height: u32,
    sizes: HashMap<String, (u32, u32)>,
    missing: HashSet<String>,
    next_handle: u32,
    stats: Rc<TextureStats>,
}

impl HeadlessTextureSource {
    /// Every texture will be `width` x `height`
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            sizes: HashMap::new(),
            missing: HashSet::new(),
            next_handle: 1,
            stats: Rc::new(TextureStats::default()),
        }
    }

    /// Give one texture its own size
    #[must_use]
    pub fn with_size(mut self, name: &str, width: u32, height: u32) -> Self {
        self.sizes.insert(name.to_string(), (width, height));
        self
    }

    /// Report a texture as missing
    #[must_use]
    pub fn with_missing(mut self, name: &str) -> Self {
        self.missing.insert(name.to_string());
        self
    }

    /// Counters that outlive the source
    pub fn stats(&self) -> Rc<TextureStats> {
        Rc::clone(&self.stats)
    }
}

impl TextureSource for HeadlessTextureSource {
    fn load_texture(&mut self, name: &str) -> Result<Texture, TextureError> {
        if self.missing.contains(name) {
            return Err(TextureError::NotFound(name.to_string()));
        }
        let (width, height) = self.sizes.get(name).copied().unwrap_or((self.width, self.height));
        let handle = TextureHandle(self.next_handle);
        self.next_handle += 1;
        self.stats.loaded.set(self.stats.loaded.get() + 1);
        Ok(Texture { handle, width, height })
    }

    fn release_texture(&mut self, _texture: Texture) {
        self.stats.released.set(self.stats.released.get() + 1);
    }
}

/// What the scene saw of an entity when it was added
#[derive(Debug, Clone, PartialEq)]
pub struct SceneRecord {
    /// Entity kind
    pub kind: EntityKind,
    /// Texture at the time of adding
    pub texture: Texture,
    /// Vertices across every constituent mesh
    pub vertex_count: usize,
}

/// Scene that records what is visible
#[derive(Debug, Default)]
pub struct RecordingScene {
    visible: HashMap<EntityKey, SceneRecord>,
    added: usize,
    removed: usize,
}

impl RecordingScene {
    /// Entities currently visible
    pub fn visible(&self) -> &HashMap<EntityKey, SceneRecord> {
        &self.visible
    }

    /// Number of visible entities
    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    /// Total add calls
    pub fn added(&self) -> usize {
        self.added
    }

    /// Total remove calls
    pub fn removed(&self) -> usize {
        self.removed
    }
}

impl SceneRenderer for RecordingScene {
    fn add_entity(&mut self, key: EntityKey, entity: &dyn OverlayEntity) {
        self.added += 1;
        self.visible.insert(
            key,
            SceneRecord {
                kind: entity.kind(),
                texture: entity.texture(),
                vertex_count: entity.vertex_count(),
            },
        );
    }

    fn remove_entity(&mut self, key: EntityKey) {
        self.removed += 1;
        self.visible.remove(&key);
    }
}
