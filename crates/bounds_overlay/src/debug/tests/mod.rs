//! Registry scenarios run against the headless backend

mod registry;

use std::rc::Rc;

use crate::config::OverlayConfig;
use crate::debug::BoundsOverlay;
use crate::render::device::SharedDevice;
use crate::render::headless::{HeadlessDevice, HeadlessTextureSource, RecordingScene, TextureStats};

/// Overlay plus handles on everything it talks to
struct Harness {
    overlay: BoundsOverlay<RecordingScene>,
    device: Rc<HeadlessDevice>,
    textures: Rc<TextureStats>,
}

fn harness_with(source: HeadlessTextureSource) -> Harness {
    let device = Rc::new(HeadlessDevice::new());
    let shared: SharedDevice = device.clone();
    let textures = source.stats();
    let overlay = BoundsOverlay::new(OverlayConfig::default(), shared, Box::new(source), RecordingScene::default())
        .unwrap();
    Harness { overlay, device, textures }
}

fn harness() -> Harness {
    harness_with(HeadlessTextureSource::new(64, 64))
}
