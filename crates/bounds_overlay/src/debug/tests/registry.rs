//! Display, remove and recolor semantics

use super::{harness, harness_with};
use crate::debug::{EntityKind, VolumeRef};
use crate::foundation::math::{Axis, Vec2, Vec3};
use crate::render::headless::HeadlessTextureSource;
use crate::render::texture::DebugColor;
use crate::volume::{Aabb, BoundingVolume};

fn sphere() -> VolumeRef {
    VolumeRef::new(BoundingVolume::sphere(Vec3::new(0.0, 0.0, 5.0), 3.0))
}

fn solid_block() -> VolumeRef {
    VolumeRef::new(BoundingVolume::arbitrary(
        |_: &Vec3| true,
        Aabb::new(Vec3::zeros(), Vec3::repeat(6.0)),
    ))
}

#[test]
fn test_display_adds_to_scene() {
    let mut h = harness();
    let volume = sphere();

    let key = h.overlay.display(&volume, DebugColor::Default).unwrap();
    assert!(h.overlay.contains(&volume));
    assert_eq!(h.overlay.color(&volume), Some(DebugColor::Default));
    assert_eq!(h.overlay.scene().visible()[&key].kind, EntityKind::Sphere);
}

#[test]
fn test_identity_not_value() {
    let mut h = harness();
    let a = sphere();
    let b = sphere();

    h.overlay.display(&a, DebugColor::Default).unwrap();
    h.overlay.display(&b, DebugColor::Default).unwrap();
    assert_eq!(h.overlay.len(), 2);
    assert_eq!(h.overlay.scene().visible_count(), 2);

    assert!(h.overlay.remove(&a));
    assert!(h.overlay.contains(&b));
    assert!(!h.overlay.contains(&a));
}

#[test]
fn test_display_twice_replaces_entity() {
    let mut h = harness();
    let volume = sphere();

    let first = h.overlay.display(&volume, DebugColor::Default).unwrap();
    let second = h.overlay.display(&volume, DebugColor::Left).unwrap();

    assert_ne!(first, second);
    assert_eq!(h.overlay.len(), 1);
    assert_eq!(h.overlay.scene().visible_count(), 1);
    assert!(!h.overlay.scene().visible().contains_key(&first));
    assert_eq!(h.device.live_buffers(), 1);
}

#[test]
fn test_remove_absent_is_noop() {
    let mut h = harness();
    assert!(!h.overlay.remove(&sphere()));
    assert_eq!(h.overlay.scene().removed(), 0);
}

#[test]
fn test_recolor_round_trip_keeps_one_entity() {
    let mut h = harness();
    let volume = sphere();
    h.overlay.display(&volume, DebugColor::Default).unwrap();

    h.overlay.recolor(&volume, DebugColor::Joined).unwrap();
    h.overlay.recolor(&volume, DebugColor::Left).unwrap();
    h.overlay.recolor(&volume, DebugColor::Joined).unwrap();

    let joined = h.overlay.build_entity(&volume, DebugColor::Joined, 0.2).unwrap().texture();
    assert_eq!(h.overlay.entity(&volume).unwrap().texture(), joined);
    assert_eq!(h.overlay.color(&volume), Some(DebugColor::Joined));
    assert_eq!(h.overlay.len(), 1);
    assert_eq!(h.overlay.scene().visible_count(), 1);
    // In-place swaps never touch the scene
    assert_eq!(h.overlay.scene().added(), 1);
}

#[test]
fn test_recolor_absent_displays() {
    let mut h = harness();
    let volume = sphere();
    h.overlay.recolor(&volume, DebugColor::Left).unwrap();
    assert_eq!(h.overlay.color(&volume), Some(DebugColor::Left));
    assert_eq!(h.overlay.scene().visible_count(), 1);
}

#[test]
fn test_recolor_across_texture_sizes_swaps_in_place() {
    let source = HeadlessTextureSource::new(64, 64).with_size("debug/red.png", 128, 32);
    let mut h = harness_with(source);
    let cuboid = VolumeRef::new(BoundingVolume::cuboid(Vec3::zeros(), Vec3::repeat(2.0)));

    let key = h.overlay.display(&cuboid, DebugColor::Default).unwrap();
    h.overlay.recolor(&cuboid, DebugColor::Left).unwrap();

    let entity = h.overlay.entity(&cuboid).unwrap();
    assert_eq!(entity.texture().width, 128);
    assert_eq!(h.overlay.color(&cuboid), Some(DebugColor::Left));
    assert_eq!(h.overlay.scene().added(), 1);
    assert!(h.overlay.scene().visible().contains_key(&key));
}

#[test]
fn test_recolor_keeps_voxel_state() {
    let source = HeadlessTextureSource::new(64, 64).with_size("debug/red.png", 128, 128);
    let mut h = harness_with(source);
    let block = solid_block();
    h.overlay.display(&block, DebugColor::Default).unwrap();
    h.overlay.set_voxel_detail(&block, 1.0).unwrap();
    h.overlay.set_voxel_offset(&block, Vec3::new(0.0, 0.0, 10.0));

    let vertices = h.overlay.entity(&block).unwrap().vertex_count();
    let buffers = h.device.buffers_created();
    assert_eq!(vertices, 152 * 36);

    h.overlay.recolor(&block, DebugColor::Left).unwrap();

    let entity = h.overlay.entity(&block).unwrap();
    assert_eq!(entity.texture().width, 128);
    assert_eq!(entity.vertex_count(), vertices);
    assert_eq!(entity.position(), Vec3::new(3.0, 3.0, 13.0));
    assert_eq!(h.device.buffers_created(), buffers);
    assert_eq!(h.overlay.scene().added(), 1);
}

#[test]
fn test_remove_all_then_remove_or_recolor() {
    let mut h = harness();
    let a = sphere();
    let b = solid_block();
    h.overlay.display(&a, DebugColor::Default).unwrap();
    h.overlay.display(&b, DebugColor::Joined).unwrap();

    h.overlay.remove_all();
    assert!(h.overlay.is_empty());
    assert_eq!(h.overlay.scene().visible_count(), 0);
    assert_eq!(h.device.live_buffers(), 0);

    let removed_before = h.overlay.scene().removed();
    let added_before = h.overlay.scene().added();
    assert!(!h.overlay.remove(&a));
    h.overlay.recolor(&a, DebugColor::Left).unwrap();
    h.overlay.recolor(&b, DebugColor::Left).unwrap();
    assert!(h.overlay.is_empty());
    assert_eq!(h.overlay.scene().removed(), removed_before);
    assert_eq!(h.overlay.scene().added(), added_before);

    // An explicit display brings a cleared volume back
    h.overlay.display(&a, DebugColor::Joined).unwrap();
    h.overlay.recolor(&a, DebugColor::Left).unwrap();
    assert_eq!(h.overlay.color(&a), Some(DebugColor::Left));
}

#[test]
fn test_recolor_after_single_remove_displays() {
    let mut h = harness();
    let volume = sphere();
    h.overlay.display(&volume, DebugColor::Default).unwrap();
    h.overlay.remove(&volume);
    h.overlay.recolor(&volume, DebugColor::Joined).unwrap();
    assert_eq!(h.overlay.color(&volume), Some(DebugColor::Joined));
}

#[test]
fn test_every_volume_kind_displays() {
    let mut h = harness();
    let volumes = [
        sphere(),
        VolumeRef::new(BoundingVolume::cuboid(Vec3::zeros(), Vec3::new(1.0, 2.0, 3.0))),
        VolumeRef::new(
            BoundingVolume::prism(
                vec![Vec2::new(0.0, 0.0), Vec2::new(4.0, 0.0), Vec2::new(4.0, 1.0), Vec2::new(0.0, 3.0)],
                -1.0,
                2.0,
                Axis::Y,
            )
            .unwrap(),
        ),
        solid_block(),
    ];
    for volume in &volumes {
        h.overlay.display(volume, DebugColor::Default).unwrap();
    }
    let mut kinds: Vec<EntityKind> = h.overlay.scene().visible().values().map(|r| r.kind).collect();
    kinds.sort_by_key(|kind| *kind as u8);
    assert_eq!(kinds, vec![EntityKind::Cuboid, EntityKind::Sphere, EntityKind::Prism, EntityKind::Voxel]);
}

#[test]
fn test_voxel_detail_change() {
    let mut h = harness();
    let block = solid_block();
    let ball = sphere();
    h.overlay.display(&block, DebugColor::Default).unwrap();
    h.overlay.display(&ball, DebugColor::Default).unwrap();

    // Default detail 2 over a 6 wide block: 3x3x3, center hidden
    assert_eq!(h.overlay.entity(&block).unwrap().vertex_count(), 26 * 36);

    assert!(h.overlay.set_voxel_detail(&block, 1.0).unwrap());
    // 6x6x6 shell: 216 - 64 interior
    assert_eq!(h.overlay.entity(&block).unwrap().vertex_count(), 152 * 36);

    assert!(!h.overlay.set_voxel_detail(&ball, 1.0).unwrap());
    assert!(h.overlay.set_voxel_detail(&block, -1.0).is_err());
    assert_eq!(h.overlay.entity(&block).unwrap().vertex_count(), 152 * 36);
}

#[test]
fn test_voxel_offset() {
    let mut h = harness();
    let block = solid_block();
    h.overlay.display(&block, DebugColor::Default).unwrap();

    assert!(h.overlay.set_voxel_offset(&block, Vec3::new(1.0, 0.0, 0.0)));
    let position = h.overlay.entity(&block).unwrap().position();
    assert_eq!(position, Vec3::new(4.0, 3.0, 3.0));
    assert!(!h.overlay.set_voxel_offset(&sphere(), Vec3::zeros()));
}
