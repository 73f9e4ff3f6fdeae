//! Host scene interface

use crate::debug::OverlayEntity;

slotmap::new_key_type! {
    /// Key of an overlay entity, stable while the entity is registered
    pub struct EntityKey;
}

/// Host renderer that makes overlay entities visible or invisible
pub trait SceneRenderer {
    /// Make an entity visible
    fn add_entity(&mut self, key: EntityKey, entity: &dyn OverlayEntity);

    /// Make a previously added entity invisible
    fn remove_entity(&mut self, key: EntityKey);
}
