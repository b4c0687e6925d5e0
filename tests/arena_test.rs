use sidi_arena::{
    Arena, ArenaConfig, Duration, Generator, Instant, SceneHandle,
    arena::{Phase, init_arena},
    config::{ShadowQuality, TextureQuality},
    context::ShadowMapType,
    monitor::FrameOutcome,
};

use crate::common::test_utils::RecordingBackend;

mod common;

fn small_config() -> ArenaConfig {
    let mut config = ArenaConfig::default();
    config.neighborhood.num_houses = 4;
    config
}

fn running_arena(config: ArenaConfig) -> Arena {
    let mut arena = Arena::new(config).with_generator(Box::new(Generator::seeded(11)));
    arena.init(SceneHandle(1)).unwrap();
    arena
}

#[test]
fn stats_are_none_before_init() {
    let arena = Arena::new(ArenaConfig::default());
    assert_eq!(arena.phase(), Phase::Uninitialized);
    assert!(arena.stats().is_none());

    let snapshot = arena.snapshot();
    assert_eq!(snapshot.fps, 0);
    assert_eq!(snapshot.houses, 0);
    assert_eq!(snapshot.flags, 0);
}

#[test]
fn init_generates_the_configured_neighborhood() {
    let arena = running_arena(small_config());
    assert_eq!(arena.phase(), Phase::Running);
    assert_eq!(arena.scene(), Some(SceneHandle(1)));

    let stats = arena.stats().unwrap();
    assert_eq!(stats.houses, 4);
    let generator = arena.generator().unwrap();
    assert_eq!(stats.flags, generator.flags().len());
    assert_eq!(stats.config, small_config());
    assert_eq!(stats.draw_calls, 0);
    assert_eq!(stats.triangles, 0);
}

#[test]
fn init_twice_is_rejected() {
    let mut arena = running_arena(small_config());
    assert!(arena.init(SceneHandle(2)).is_err());
    assert_eq!(arena.scene(), Some(SceneHandle(1)));
    assert_eq!(arena.stats().unwrap().houses, 4);
}

#[test]
fn invalid_config_keeps_the_arena_uninitialized() {
    let mut config = small_config();
    config.performance.target_fps = 0;
    let mut arena = Arena::new(config).with_generator(Box::new(Generator::seeded(1)));
    assert!(arena.init(SceneHandle(1)).is_err());
    assert_eq!(arena.phase(), Phase::Uninitialized);
    assert!(arena.stats().is_none());
}

#[test]
fn runs_without_capabilities() {
    let mut arena = Arena::new(small_config());
    let monitor = arena.init(SceneHandle(3)).unwrap();
    assert!(!monitor.is_stopped());

    let stats = arena.stats().unwrap();
    assert_eq!(stats.houses, 0);
    assert_eq!(stats.flags, 0);
    assert!(arena.lighting().is_some());
}

#[test]
fn renderer_receives_performance_settings() {
    let (backend, state) = RecordingBackend::new(2.0);
    let mut arena = Arena::new(small_config()).with_renderer(Box::new(backend));
    arena.init(SceneHandle(1)).unwrap();

    let state = state.borrow();
    assert_eq!(state.shadow_map_enabled, Some(true));
    assert_eq!(state.shadow_map_type, Some(ShadowMapType::Pcf));
    assert_eq!(state.antialias, Some(true));
    assert_eq!(state.vsync, Some(true));
    assert_eq!(state.pixel_ratio, Some(2.0));
    assert_eq!(state.texture_quality, Some(TextureQuality::High));
}

#[test]
fn high_shadow_quality_uses_soft_shadows() {
    let mut config = small_config();
    config.performance.shadow_quality = ShadowQuality::High;
    let (backend, state) = RecordingBackend::new(1.0);
    let mut arena = Arena::new(config).with_renderer(Box::new(backend));
    arena.init(SceneHandle(1)).unwrap();
    assert_eq!(state.borrow().shadow_map_type, Some(ShadowMapType::PcfSoft));
}

#[test]
fn healthy_fps_changes_nothing() {
    let mut arena = running_arena(small_config());
    // 0.8 * 60 = 48
    for fps in [60, 48] {
        arena.sample_fps(fps);
        assert_eq!(arena.config(), &small_config());
    }
}

#[test]
fn low_but_not_critical_fps_only_warns() {
    let mut arena = running_arena(small_config());
    for fps in [47, 30] {
        arena.sample_fps(fps);
        assert!(!arena.optimize_performance());
        assert_eq!(arena.config(), &small_config());
    }
}

#[test]
fn critical_fps_lowers_quality_once() {
    let mut config = small_config();
    config.performance.shadow_quality = ShadowQuality::High;
    let (backend, state) = RecordingBackend::new(1.0);
    let mut arena = Arena::new(config)
        .with_renderer(Box::new(backend))
        .with_generator(Box::new(Generator::seeded(3)));
    arena.init(SceneHandle(1)).unwrap();
    assert_eq!(state.borrow().shadow_type_invocations, 1);

    arena.sample_fps(29);
    assert_eq!(arena.config().performance.shadow_quality, ShadowQuality::Low);
    assert_eq!(arena.config().graphics.texture_quality, TextureQuality::Medium);
    assert_eq!(arena.stats().unwrap().fps, 29);

    // downgraded settings are pushed to the backend
    assert_eq!(state.borrow().shadow_map_type, Some(ShadowMapType::Pcf));
    assert_eq!(state.borrow().texture_quality, Some(TextureQuality::Medium));
    assert_eq!(state.borrow().shadow_type_invocations, 2);

    // nothing left to lower
    assert!(!arena.optimize_performance());
    assert_eq!(state.borrow().shadow_type_invocations, 2);
}

#[test]
fn quality_is_not_restored_when_fps_recovers() {
    let mut arena = running_arena(small_config());
    arena.sample_fps(10);
    arena.sample_fps(60);
    assert_eq!(arena.config().performance.shadow_quality, ShadowQuality::Low);
    assert_eq!(arena.config().graphics.texture_quality, TextureQuality::Medium);
}

#[test]
fn monitor_samples_fps_once_per_second() {
    let start = Instant::now();
    let mut arena = Arena::new(small_config()).with_generator(Box::new(Generator::seeded(4)));
    arena.init_at(SceneHandle(1), start).unwrap();

    let mut now = start;
    for frame in 1..=59 {
        now = start + Duration::from_micros(16_667 * frame);
        assert_eq!(arena.on_frame(now), FrameOutcome::Continue);
        assert_eq!(arena.stats().unwrap().fps, 0);
    }
    now += Duration::from_micros(16_667);
    assert_eq!(arena.on_frame(now), FrameOutcome::Continue);
    assert_eq!(arena.stats().unwrap().fps, 60);
    assert_eq!(arena.config(), &small_config());
}

#[test]
fn slow_frames_trigger_the_optimizer() {
    let start = Instant::now();
    let mut arena = Arena::new(small_config());
    arena.init_at(SceneHandle(1), start).unwrap();

    for frame in 1..=20 {
        arena.on_frame(start + Duration::from_millis(50 * frame));
    }
    assert_eq!(arena.stats().unwrap().fps, 20);
    assert_eq!(arena.config().performance.shadow_quality, ShadowQuality::Low);
}

#[test]
fn stopped_monitor_stops_the_frame_loop() {
    let start = Instant::now();
    let mut arena = Arena::new(small_config());
    let monitor = arena.init_at(SceneHandle(1), start).unwrap();

    assert_eq!(
        arena.on_frame(start + Duration::from_millis(10)),
        FrameOutcome::Continue
    );
    monitor.clone().stop();
    assert!(monitor.is_stopped());
    for frame in 1..=40 {
        assert_eq!(
            arena.on_frame(start + Duration::from_millis(50 * frame)),
            FrameOutcome::Stopped
        );
    }
    // stopped before a sample could be taken
    assert_eq!(arena.stats().unwrap().fps, 0);
}

#[test]
fn restarting_the_monitor_stops_the_previous_one() {
    let mut arena = Arena::new(small_config());
    let first = arena.init(SceneHandle(1)).unwrap();
    let second = arena.start_performance_monitor(Instant::now());
    assert!(first.is_stopped());
    assert!(!second.is_stopped());

    arena.shutdown();
    assert!(second.is_stopped());
    assert_eq!(arena.on_frame(Instant::now()), FrameOutcome::Stopped);
}

#[test]
fn frames_before_init_are_ignored() {
    let mut arena = Arena::new(small_config());
    assert_eq!(arena.on_frame(Instant::now()), FrameOutcome::Stopped);
}

#[test]
fn host_render_stats_show_up_in_snapshots() {
    let mut arena = running_arena(small_config());
    arena.record_render_stats(120, 48_000);
    arena.record_render_stats(800, 90_000);
    let stats = arena.stats().unwrap();
    assert_eq!(stats.draw_calls, 800);
    assert_eq!(stats.triangles, 90_000);
}

#[test]
fn lighting_reports_the_graphics_section() {
    let arena = running_arena(small_config());
    let lighting = arena.lighting().unwrap();
    assert_eq!(lighting.ambient, 0.6);
    assert_eq!(lighting.sun_intensity, 1.2);
    assert!(lighting.fog_enabled());
    assert_eq!(lighting.fog_near, 50.0);
    assert_eq!(lighting.fog_far, 200.0);
}

#[test]
fn factory_uses_the_configured_spacing() {
    let mut config = small_config();
    config.neighborhood.spacing = 30.0;
    let (arena, monitor) = init_arena(SceneHandle(5), config, None).unwrap();
    assert!(!monitor.is_stopped());

    let houses = arena.generator().unwrap().houses();
    assert_eq!(houses.len(), 4);
    let mut xs: Vec<f32> = houses.iter().map(|h| h.position.x).collect();
    xs.sort_by(f32::total_cmp);
    xs.dedup();
    assert_eq!(xs, vec![-30.0, 0.0]);
}

#[test]
fn stats_serialize_with_camel_case_keys() {
    let arena = running_arena(small_config());
    let json = serde_json::to_value(arena.stats().unwrap()).unwrap();
    assert_eq!(json["houses"], 4);
    assert_eq!(json["drawCalls"], 0);
    assert_eq!(json["config"]["performance"]["targetFPS"], 60);
    assert_eq!(json["config"]["performance"]["shadowQuality"], "medium");
}

#[test]
fn exported_snapshot_matches_the_generator() {
    let arena = running_arena(small_config());
    let generator = arena.generator().unwrap();
    let export = generator.export();
    assert_eq!(export.houses.len(), generator.houses().len());
    assert_eq!(export, generator.export());
}
