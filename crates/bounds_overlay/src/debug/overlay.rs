//! Overlay registry
//!
//! Keeps one render entity per registered volume. Volumes are told apart by
//! identity, not by value: two equal spheres registered separately get two
//! entities. The registry holds a clone of each [`VolumeRef`] it tracks, so an
//! identity cannot be reused while its entry exists.
//!
//! Volumes cleared by [`BoundsOverlay::remove_all`] are retired: recoloring them
//! does nothing until they are displayed again.

use std::collections::HashMap;
use std::ops::Deref;
use std::rc::{Rc, Weak};

use slotmap::SlotMap;

use super::dispatch::VolumeMeshDispatcher;
use super::entity::{OverlayEntity, Viewer};
use super::OverlayError;
use crate::config::OverlayConfig;
use crate::foundation::logging::{debug, info, warn};
use crate::foundation::math::Vec3;
use crate::render::device::SharedDevice;
use crate::render::draw_queue::DrawQueue;
use crate::render::orientation::Orientation;
use crate::render::scene::{EntityKey, SceneRenderer};
use crate::render::texture::{DebugColor, TextureCache, TextureSource};
use crate::volume::BoundingVolume;

/// Shared handle to a registered volume; compared by identity
#[derive(Debug, Clone)]
pub struct VolumeRef(Rc<BoundingVolume>);

impl VolumeRef {
    /// Wrap a volume
    pub fn new(volume: BoundingVolume) -> Self {
        Self(Rc::new(volume))
    }

    fn id(&self) -> VolumeId {
        VolumeId(Rc::as_ptr(&self.0) as usize)
    }

    fn downgrade(&self) -> Weak<BoundingVolume> {
        Rc::downgrade(&self.0)
    }

    fn is(&self, other: &Weak<BoundingVolume>) -> bool {
        other.upgrade().is_some_and(|rc| Rc::ptr_eq(&rc, &self.0))
    }
}

impl Deref for VolumeRef {
    type Target = BoundingVolume;

    fn deref(&self) -> &BoundingVolume {
        &self.0
    }
}

impl From<BoundingVolume> for VolumeRef {
    fn from(volume: BoundingVolume) -> Self {
        Self::new(volume)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct VolumeId(usize);

struct Entry {
    // Keeps the address behind `VolumeId` alive
    volume: VolumeRef,
    key: EntityKey,
    color: DebugColor,
}

/// Debug overlay: per-volume entities, their textures and the scene they are shown in
pub struct BoundsOverlay<S: SceneRenderer> {
    config: OverlayConfig,
    textures: TextureCache,
    dispatcher: VolumeMeshDispatcher,
    entities: SlotMap<EntityKey, Box<dyn OverlayEntity>>,
    entries: HashMap<VolumeId, Entry>,
    retired: HashMap<VolumeId, Weak<BoundingVolume>>,
    scene: S,
}

impl<S: SceneRenderer> BoundsOverlay<S> {
    /// Validate `config` and load the debug textures
    pub fn new(
        config: OverlayConfig,
        device: SharedDevice,
        textures: Box<dyn TextureSource>,
        scene: S,
    ) -> Result<Self, OverlayError> {
        config.validate()?;
        let textures = TextureCache::load(textures, &config.textures)?;
        let dispatcher = VolumeMeshDispatcher::new(device, &config);
        info!(
            "Bounds overlay ready (opacity {}, voxel detail {})",
            config.opacity, config.voxel_detail
        );
        Ok(Self {
            config,
            textures,
            dispatcher,
            entities: SlotMap::with_key(),
            entries: HashMap::new(),
            retired: HashMap::new(),
            scene,
        })
    }

    /// Active settings
    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// Host scene
    pub fn scene(&self) -> &S {
        &self.scene
    }

    /// Build an entity for a volume without registering it
    pub fn build_entity(
        &self,
        volume: &BoundingVolume,
        color: DebugColor,
        opacity: f32,
    ) -> Result<Box<dyn OverlayEntity>, OverlayError> {
        let texture = self.textures.get(color)?;
        self.dispatcher.build_entity(volume, texture, opacity)
    }

    /// Show a volume, replacing any entity it already has. If the build fails the
    /// registry is left as it was.
    pub fn display(&mut self, volume: &VolumeRef, color: DebugColor) -> Result<EntityKey, OverlayError> {
        let entity = self.build_entity(volume, color, self.config.opacity).map_err(|err| {
            warn!("Failed to build {} overlay: {err}", volume.kind_name());
            err
        })?;

        if self.withdraw(volume.id()) {
            debug!("Replacing {} overlay", volume.kind_name());
        }
        self.retired.remove(&volume.id());
        self.prune_retired();

        let key = self.entities.insert(entity);
        if let Some(entity) = self.entities.get(key) {
            self.scene.add_entity(key, entity.as_ref());
        }
        self.entries.insert(volume.id(), Entry { volume: volume.clone(), key, color });
        debug!("Displaying {} overlay as {color:?}", volume.kind_name());
        Ok(key)
    }

    /// Hide a volume. Returns false when it was not shown.
    pub fn remove(&mut self, volume: &VolumeRef) -> bool {
        self.prune_retired();
        let removed = self.withdraw(volume.id());
        if removed {
            debug!("Removed {} overlay", volume.kind_name());
        }
        removed
    }

    /// Change a volume's color. Shows it if it is not shown yet (unless it was
    /// cleared by [`BoundsOverlay::remove_all`]); swaps the texture in place when
    /// the entity allows it, rebuilds the entity otherwise.
    pub fn recolor(&mut self, volume: &VolumeRef, color: DebugColor) -> Result<(), OverlayError> {
        let Some(entry) = self.entries.get_mut(&volume.id()) else {
            if self.is_retired(volume) {
                debug!("Ignoring recolor of cleared {} overlay", volume.kind_name());
            } else {
                self.display(volume, color)?;
            }
            return Ok(());
        };

        let texture = self.textures.get(color)?;
        let retexture = self
            .entities
            .get_mut(entry.key)
            .and_then(|entity| entity.as_retexture());

        if let Some(retexture) = retexture {
            retexture.replace_texture(texture);
            entry.color = color;
            debug!("Recolored {} overlay to {color:?}", volume.kind_name());
        } else {
            debug!("{} overlay cannot swap textures, rebuilding as {color:?}", volume.kind_name());
            self.display(volume, color)?;
        }
        Ok(())
    }

    /// Hide every volume and retire them
    pub fn remove_all(&mut self) {
        let count = self.entries.len();
        self.prune_retired();
        for (id, entry) in self.entries.drain() {
            if self.entities.remove(entry.key).is_some() {
                self.scene.remove_entity(entry.key);
            }
            self.retired.insert(id, entry.volume.downgrade());
        }
        if count > 0 {
            debug!("Removed all {count} overlays");
        }
    }

    /// Change the voxel edge length of a voxelized volume. Rebuilds synchronously.
    /// Returns false when the volume is not shown or is not voxelized.
    pub fn set_voxel_detail(&mut self, volume: &VolumeRef, detail: f32) -> Result<bool, OverlayError> {
        match self.entity_mut(volume).and_then(|entity| entity.as_voxelized()) {
            Some(voxels) => {
                voxels.set_detail(detail)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Move the voxels of a voxelized volume. Returns false when not applicable.
    pub fn set_voxel_offset(&mut self, volume: &VolumeRef, offset: Vec3) -> bool {
        if let Some(voxels) = self.entity_mut(volume).and_then(|entity| entity.as_voxelized()) {
            voxels.set_offset(offset);
            true
        } else {
            false
        }
    }

    /// Orient a shown volume by a direction vector: along world z it only
    /// translates, otherwise it turns about the vector to face the viewer
    pub fn set_orientation(&mut self, volume: &VolumeRef, direction: Vec3) -> bool {
        if let Some(entity) = self.entity_mut(volume) {
            entity.render_mut().orientation = Orientation::from_vector(direction);
            true
        } else {
            false
        }
    }

    /// Entity shown for a volume
    pub fn entity(&self, volume: &VolumeRef) -> Option<&dyn OverlayEntity> {
        let key = self.entries.get(&volume.id())?.key;
        Some(self.entities.get(key)?.as_ref())
    }

    fn entity_mut(&mut self, volume: &VolumeRef) -> Option<&mut dyn OverlayEntity> {
        let key = self.entries.get(&volume.id())?.key;
        Some(self.entities.get_mut(key)?.as_mut())
    }

    /// Color a volume is shown with
    pub fn color(&self, volume: &VolumeRef) -> Option<DebugColor> {
        self.entries.get(&volume.id()).map(|entry| entry.color)
    }

    /// Whether a volume is shown
    pub fn contains(&self, volume: &VolumeRef) -> bool {
        self.entries.contains_key(&volume.id())
    }

    /// Number of shown volumes
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is shown
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Per-frame update of every entity's draw order
    pub fn update(&mut self, viewer: &Viewer) {
        for entity in self.entities.values_mut() {
            entity.update(viewer);
        }
    }

    /// Update every entity and collect its draws, sorted for submission
    pub fn draw_queue(&mut self, viewer: &Viewer) -> DrawQueue {
        self.update(viewer);
        let mut queue = DrawQueue::new();
        for (key, entity) in &self.entities {
            entity.queue_draws(key, viewer, &mut queue);
        }
        queue.sort_commands();
        queue
    }

    /// Remove every entity, release the textures and hand back the scene
    pub fn teardown(mut self) -> S {
        self.remove_all();
        self.textures.release_all();
        info!("Bounds overlay torn down");
        self.scene
    }

    // Forget retired volumes nobody holds anymore
    fn prune_retired(&mut self) {
        self.retired.retain(|_, volume| volume.strong_count() > 0);
    }

    fn is_retired(&self, volume: &VolumeRef) -> bool {
        self.retired.get(&volume.id()).is_some_and(|retired| volume.is(retired))
    }

    fn withdraw(&mut self, id: VolumeId) -> bool {
        let Some(entry) = self.entries.remove(&id) else {
            return false;
        };
        if self.entities.remove(entry.key).is_some() {
            self.scene.remove_entity(entry.key);
        }
        true
    }
}
