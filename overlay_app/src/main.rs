//! Overlay inspection tool
//!
//! Builds every volume of a scene file through the overlay on the headless
//! backend and reports what would be drawn.
//!
//! ```text
//! overlay_inspect [scene.ron] [overlay.toml|overlay.ron]
//! ```

mod scene;

use std::rc::Rc;

use bounds_overlay::config::{Config, ConfigError, OverlayConfig};
use bounds_overlay::debug::{BoundsOverlay, OverlayError, Viewer, VolumeRef};
use bounds_overlay::render::device::SharedDevice;
use bounds_overlay::render::headless::{HeadlessDevice, HeadlessTextureSource, RecordingScene};
use bounds_overlay::render::primitives::GeometryError;

use scene::SceneFile;

const TEXTURE_SIZE: u32 = 256;

#[derive(thiserror::Error, Debug)]
enum AppError {
    #[error("Failed to read scene {path}: {source}")]
    SceneIo { path: String, source: std::io::Error },

    #[error("Failed to parse scene {path}: {message}")]
    SceneParse { path: String, message: String },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Volume {name}: {source}")]
    Volume { name: String, source: GeometryError },

    #[error(transparent)]
    Overlay(#[from] OverlayError),
}

fn load_scene(path: Option<&str>) -> Result<SceneFile, AppError> {
    let Some(path) = path else {
        log::info!("No scene given, using the built-in scene");
        return Ok(SceneFile::default());
    };
    let text = std::fs::read_to_string(path).map_err(|source| AppError::SceneIo {
        path: path.to_string(),
        source,
    })?;
    ron::from_str(&text).map_err(|err| AppError::SceneParse {
        path: path.to_string(),
        message: err.to_string(),
    })
}

fn load_config(path: Option<&str>) -> Result<OverlayConfig, AppError> {
    match path {
        Some(path) => Ok(OverlayConfig::load_from_file(path)?),
        None => Ok(OverlayConfig::default()),
    }
}

fn run() -> Result<(), AppError> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let scene = load_scene(args.first().map(String::as_str))?;
    let config = load_config(args.get(1).map(String::as_str))?;

    let device = Rc::new(HeadlessDevice::new());
    let shared: SharedDevice = device.clone();
    let textures = HeadlessTextureSource::new(TEXTURE_SIZE, TEXTURE_SIZE);
    let texture_stats = textures.stats();
    let mut overlay = BoundsOverlay::new(config, shared, Box::new(textures), RecordingScene::default())?;

    for spec in &scene.volumes {
        let volume = spec.shape.to_volume().map_err(|source| AppError::Volume {
            name: spec.name.clone(),
            source,
        })?;
        let volume = VolumeRef::new(volume);

        overlay.display(&volume, spec.color)?;
        if let Some(detail) = spec.voxel_detail {
            overlay.set_voxel_detail(&volume, detail)?;
        }
        if let Some(color) = spec.recolor {
            overlay.recolor(&volume, color)?;
        }

        if let Some(entity) = overlay.entity(&volume) {
            log::info!(
                "{}: {:?} at {:?}, {} vertices, {:?}",
                spec.name,
                entity.kind(),
                entity.position().as_slice(),
                entity.vertex_count(),
                overlay.color(&volume).unwrap_or_default(),
            );
        }
    }

    let queue = overlay.draw_queue(&Viewer::at(scene.viewer));
    let triangles: usize = queue.iter().map(|command| command.primitive_count).sum();
    log::info!(
        "Frame: {} draws ({} translucent), {} triangles, {} live buffers",
        queue.len(),
        queue.transparent_commands().len(),
        triangles,
        device.live_buffers(),
    );

    let scene = overlay.teardown();
    log::info!(
        "Teardown: {} entities removed, {} live buffers, {}/{} textures released",
        scene.removed(),
        device.live_buffers(),
        texture_stats.released(),
        texture_stats.loaded(),
    );
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run() {
        log::error!("{err}");
        std::process::exit(1);
    }
}
