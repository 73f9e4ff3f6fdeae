//! Debug textures
//!
//! The overlay uses one texture per [`DebugColor`]. They are loaded once through the
//! host's [`TextureSource`] when the overlay is created and released together when
//! it is torn down. Only the overlay's own [`TextureCache`] touches them.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::TextureNames;
use crate::foundation::logging::{debug, info};

/// Handle for a GPU texture resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Loaded texture and its size in texels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Texture {
    /// Device handle
    pub handle: TextureHandle,
    /// Width in texels
    pub width: u32,
    /// Height in texels
    pub height: u32,
}

impl Texture {
    /// `[width, height]`
    pub fn size(&self) -> [u32; 2] {
        [self.width, self.height]
    }
}

/// Overlay color. Selects a texture and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DebugColor {
    /// Volume shown without any state
    #[default]
    Default,
    /// Tracked object is inside the volume
    Joined,
    /// Tracked object has left the volume
    Left,
}

impl DebugColor {
    /// Every color
    pub const ALL: [Self; 3] = [Self::Default, Self::Joined, Self::Left];
}

/// Texture errors
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TextureError {
    /// No texture with this name
    #[error("Texture not found: {0}")]
    NotFound(String),

    /// Texture exists but could not be loaded
    #[error("Failed to load texture {name}: {reason}")]
    Load {
        /// Texture name
        name: String,
        /// Loader message
        reason: String,
    },
}

/// Host lookup of textures by name
pub trait TextureSource {
    /// Load a texture, returning a device-usable handle
    fn load_texture(&mut self, name: &str) -> Result<Texture, TextureError>;

    /// Release a texture obtained from [`TextureSource::load_texture`]
    fn release_texture(&mut self, texture: Texture);
}

/// Per-color textures owned by one overlay
pub struct TextureCache {
    source: Box<dyn TextureSource>,
    textures: HashMap<DebugColor, Texture>,
}

impl TextureCache {
    /// Load the texture of every color. Textures already loaded are released if a
    /// later one fails.
    pub fn load(source: Box<dyn TextureSource>, names: &TextureNames) -> Result<Self, TextureError> {
        let mut cache = Self {
            source,
            textures: HashMap::with_capacity(DebugColor::ALL.len()),
        };
        for color in DebugColor::ALL {
            let name = names.for_color(color);
            let texture = cache.source.load_texture(name)?;
            debug!("Loaded debug texture {name} ({}x{}) for {color:?}", texture.width, texture.height);
            cache.textures.insert(color, texture);
        }
        Ok(cache)
    }

    /// Texture for a color
    pub fn get(&self, color: DebugColor) -> Result<Texture, TextureError> {
        self.textures
            .get(&color)
            .copied()
            .ok_or_else(|| TextureError::NotFound(format!("{color:?}")))
    }

    /// Number of textures held
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    /// True once every texture has been released
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Release every texture back to the source
    pub fn release_all(&mut self) {
        if self.textures.is_empty() {
            return;
        }
        info!("Releasing {} debug textures", self.textures.len());
        for (_, texture) in self.textures.drain() {
            self.source.release_texture(texture);
        }
    }
}

impl Drop for TextureCache {
    fn drop(&mut self) {
        self.release_all();
    }
}

impl fmt::Debug for TextureCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextureCache")
            .field("textures", &self.textures)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::headless::HeadlessTextureSource;

    #[test]
    fn test_loads_one_texture_per_color() {
        let source = HeadlessTextureSource::new(32, 32);
        let stats = source.stats();
        let cache = TextureCache::load(Box::new(source), &TextureNames::default()).unwrap();

        assert_eq!(cache.len(), 3);
        assert_eq!(stats.loaded(), 3);
        assert_ne!(cache.get(DebugColor::Joined).unwrap(), cache.get(DebugColor::Left).unwrap());
    }

    #[test]
    fn test_release_on_drop() {
        let source = HeadlessTextureSource::new(32, 32);
        let stats = source.stats();
        let cache = TextureCache::load(Box::new(source), &TextureNames::default()).unwrap();
        drop(cache);
        assert_eq!(stats.released(), 3);
    }

    #[test]
    fn test_partial_load_is_released() {
        let source = HeadlessTextureSource::new(32, 32).with_missing("debug/red.png");
        let stats = source.stats();
        let result = TextureCache::load(Box::new(source), &TextureNames::default());

        assert_eq!(result.err(), Some(TextureError::NotFound("debug/red.png".to_string())));
        assert_eq!(stats.loaded(), stats.released());
    }

    #[test]
    fn test_release_all_is_idempotent() {
        let source = HeadlessTextureSource::new(32, 32);
        let stats = source.stats();
        let mut cache = TextureCache::load(Box::new(source), &TextureNames::default()).unwrap();
        cache.release_all();
        cache.release_all();
        drop(cache);
        assert_eq!(stats.released(), 3);
        assert_eq!(stats.loaded(), 3);
    }
}
