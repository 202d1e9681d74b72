//! Transition controller behaviour through a full scene.

use std::cell::Cell;
use std::rc::Rc;

use proptest::prelude::*;
use tilemorph_core::{Pose, Vec3};
use tilemorph_layout::{Arrangement, TargetSet};
use tilemorph_runtime::{
    Channel, FixedCamera, RecordingRenderer, Scene, SceneBuilder, SceneConfig, SceneError,
    TransitionError, TransitionStatus,
};

type TestScene = Scene<RecordingRenderer, FixedCamera>;

fn scene(tiles: usize, seed: u64) -> TestScene {
    let config = SceneConfig {
        seed: Some(seed),
        initial_arrangement: None,
        ..SceneConfig::default()
    };
    SceneBuilder::new(config)
        .tile_count(tiles)
        .build(RecordingRenderer::new(), FixedCamera)
        .expect("scene builds")
}

fn assert_at_targets(scene: &TestScene, targets: &TargetSet) {
    assert_eq!(scene.registry().len(), targets.len());
    for (i, (tile, target)) in scene.registry().tiles().iter().zip(targets).enumerate() {
        assert_eq!(tile.pose(), *target, "tile {i}");
    }
}

#[test]
fn settles_exactly_on_targets_and_fires_once() {
    let mut scene = scene(12, 4);
    let fired = Rc::new(Cell::new(0));
    let counter = Rc::clone(&fired);
    scene
        .transitions_mut()
        .on_settled(move |_| counter.set(counter.get() + 1));

    let base = 500.0;
    let targets = scene.targets()[Arrangement::Sphere].clone();
    scene.start(&targets, base).unwrap();
    scene.tick(0.0);
    let report = scene.tick(3.0 * base);

    assert!(!report.active);
    assert_at_targets(&scene, &targets);
    assert_eq!(fired.get(), 1);

    scene.tick(4.0 * base);
    scene.tick(5.0 * base);
    assert_eq!(fired.get(), 1);
}

#[test]
fn nothing_settles_before_the_shortest_duration() {
    let mut scene = scene(6, 2);
    scene.select(Arrangement::Helix).unwrap();
    scene.tick(0.0);
    let report = scene.tick(1_999.0);
    assert!(report.active);
    assert_eq!(report.completed, 0);
    assert!(report.settled.is_none());
}

#[test]
fn restart_continues_from_live_pose() {
    let mut scene = scene(8, 11);
    let base = scene.config().transition_ms;
    scene.select(Arrangement::Table).unwrap();
    scene.tick(0.0);
    scene.tick(0.3 * base);
    let live = scene.registry().poses();

    let report = scene.select(Arrangement::Sphere).unwrap();
    assert_eq!(report.cancelled.len(), 16);
    assert!(
        report
            .cancelled
            .iter()
            .all(|t| t.status() == TransitionStatus::Cancelled)
    );
    assert_eq!(report.generation, 2);

    for (i, pose) in live.iter().enumerate() {
        let pos = scene.transitions().transition(i, Channel::Position).unwrap();
        let rot = scene.transitions().transition(i, Channel::Rotation).unwrap();
        assert_eq!(pos.from(), pose.position);
        assert_eq!(rot.from(), pose.rotation);
        assert_eq!(pos.to(), scene.targets()[Arrangement::Sphere][i].position);
    }

    // Restarting must not move anything by itself.
    assert_eq!(scene.registry().poses(), live);
}

#[test]
fn superseded_start_never_settles() {
    let mut scene = scene(4, 1);
    let events = Rc::new(Cell::new(0u64));
    let seen = Rc::clone(&events);
    scene
        .transitions_mut()
        .on_settled(move |e| seen.set(e.generation));

    scene.select(Arrangement::Table).unwrap();
    scene.tick(0.0);
    scene.tick(100.0);
    scene.select(Arrangement::Grid).unwrap();
    scene.tick(200.0);
    scene.tick(10_000.0);

    assert_eq!(events.get(), 2);
    assert_eq!(
        scene.transitions().arrangement(),
        Some(Arrangement::Grid)
    );
}

#[test]
fn three_tile_grid_scenario() {
    let mut scene = scene(3, 99);
    scene.select(Arrangement::Grid).unwrap();
    scene.tick(0.0);
    let report = scene.tick(4_001.0);

    assert!(report.settled.is_some());
    let expected = [
        Vec3::new(-800.0, 800.0, -4500.0),
        Vec3::new(-400.0, 800.0, -4500.0),
        Vec3::new(0.0, 800.0, -4500.0),
    ];
    for (tile, want) in scene.registry().tiles().iter().zip(expected) {
        assert_eq!(tile.pose().position, want);
        assert_eq!(tile.pose().rotation, Vec3::ZERO);
    }
}

#[test]
fn mismatched_target_set_is_rejected() {
    let mut scene = scene(5, 3);
    scene.select(Arrangement::Table).unwrap();
    let short = TargetSet::from_poses(Arrangement::Helix, vec![Pose::default(); 4]);

    let err = scene.start(&short, 100.0).unwrap_err();
    assert!(matches!(
        err,
        SceneError::Transition(TransitionError::LayoutMismatch {
            expected: 5,
            actual: 4,
            ..
        })
    ));
    assert_eq!(scene.transitions().active_count(), 10);
    assert_eq!(scene.transitions().arrangement(), Some(Arrangement::Table));
}

#[test]
fn every_channel_sees_the_same_frame_time() {
    let mut scene = scene(20, 8);
    scene.select(Arrangement::Sphere).unwrap();
    scene.tick(123.0);
    for t in scene.transitions().transitions() {
        assert_eq!(t.started_at(), Some(123.0));
    }
}

#[test]
fn zero_tiles_settle_on_next_tick() {
    let mut scene = scene(0, 1);
    scene.select(Arrangement::Sphere).unwrap();
    let report = scene.tick(0.0);
    assert!(report.settled.is_some());
    assert!(scene.registry().is_empty());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn restart_is_continuous(seed in any::<u64>(), tiles in 1usize..40, fraction in 0.0f64..1.0) {
        let mut scene = scene(tiles, seed);
        let base = scene.config().transition_ms;
        scene.select(Arrangement::Helix).unwrap();
        scene.tick(0.0);
        scene.tick(fraction * base);
        let live = scene.registry().poses();

        scene.select(Arrangement::Table).unwrap();
        scene.tick(fraction * base);
        prop_assert_eq!(scene.registry().poses(), live);
    }

    #[test]
    fn positions_stay_between_endpoints(seed in any::<u64>(), t in 0.0f64..5_000.0) {
        let mut scene = scene(10, seed);
        let from = scene.registry().poses();
        scene.select(Arrangement::Grid).unwrap();
        scene.tick(0.0);
        scene.tick(t);
        let to = &scene.targets()[Arrangement::Grid];
        for (i, tile) in scene.registry().tiles().iter().enumerate() {
            let p = tile.pose().position;
            let (a, b) = (from[i].position, to[i].position);
            for (v, lo, hi) in [(p.x, a.x, b.x), (p.y, a.y, b.y), (p.z, a.z, b.z)] {
                prop_assert!(v >= lo.min(hi) - 1e-9 && v <= lo.max(hi) + 1e-9);
            }
        }
    }
}
