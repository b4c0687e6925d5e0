use sidi_arena::{
    ArenaConfig,
    config::{ShadowQuality, TextureQuality},
    flow::host_config,
};

#[test]
fn defaults_match_the_shipped_arena() {
    let config = ArenaConfig::default();
    assert_eq!(config.name, "Sidi Bou Saïd Arena");
    assert_eq!(config.theme, "tunisian");

    let perf = &config.performance;
    assert_eq!(perf.target_fps, 60);
    assert_eq!(perf.max_draw_calls, 500);
    assert!(perf.enable_shadows);
    assert_eq!(perf.shadow_quality, ShadowQuality::Medium);
    assert!(perf.antialiasing && perf.vsync && perf.lod_enabled);
    assert_eq!(perf.culling_distance, 100.0);
    assert_eq!(perf.particle_limit, 1000);

    let gfx = &config.graphics;
    assert_eq!(gfx.texture_quality, TextureQuality::High);
    assert_eq!(gfx.render_distance, 150.0);
    assert_eq!(gfx.fog_color, 0xCCE5FF);

    let nh = &config.neighborhood;
    assert_eq!((nh.center_x, nh.center_z), (0.0, 0.0));
    assert_eq!(nh.num_houses, 15);
    assert_eq!(nh.spacing, 25.0);
    assert!(config.validate().is_ok());
}

#[test]
fn partial_json_overrides_only_named_keys() {
    let config = ArenaConfig::from_json(
        r#"{
            "performance": { "targetFPS": 30, "shadowQuality": "high" },
            "graphics": { "fogEnabled": false },
            "neighborhood": { "centerX": 10, "numHouses": 9 }
        }"#,
    )
    .unwrap();

    assert_eq!(config.performance.target_fps, 30);
    assert_eq!(config.performance.shadow_quality, ShadowQuality::High);
    assert_eq!(config.performance.max_draw_calls, 500);
    assert!(!config.graphics.fog_enabled);
    assert_eq!(config.graphics.sun_intensity, 1.2);
    assert_eq!(config.neighborhood.center_x, 10.0);
    assert_eq!(config.neighborhood.num_houses, 9);
    assert_eq!(config.neighborhood.spacing, 25.0);
    assert_eq!(config.name, "Sidi Bou Saïd Arena");
}

#[test]
fn empty_json_is_the_default() {
    assert_eq!(ArenaConfig::from_json("{}").unwrap(), ArenaConfig::default());
}

#[test]
fn invalid_values_are_rejected() {
    assert!(ArenaConfig::from_json(r#"{ "performance": { "targetFPS": 0 } }"#).is_err());
    assert!(ArenaConfig::from_json(r#"{ "neighborhood": { "spacing": -5 } }"#).is_err());
    assert!(ArenaConfig::from_json(r#"{ "neighborhood": { "numHouses": -1 } }"#).is_err());
    assert!(ArenaConfig::from_json(r#"{ "graphics": { "fogNear": 300 } }"#).is_err());
    assert!(ArenaConfig::from_json(r#"{ "performance": { "shadowQuality": "ultra" } }"#).is_err());
    assert!(ArenaConfig::from_json("not json").is_err());
}

#[test]
fn config_round_trips_through_json() {
    let mut config = ArenaConfig::default();
    config.performance.shadow_quality = ShadowQuality::Low;
    let json = serde_json::to_string(&config).unwrap();
    assert!(json.contains("\"LODEnabled\":true"));
    assert_eq!(ArenaConfig::from_json(&json).unwrap(), config);
}

#[test]
fn host_config_falls_back_to_defaults() {
    assert_eq!(host_config(None).unwrap(), ArenaConfig::default());
    assert_eq!(host_config(Some("  ")).unwrap(), ArenaConfig::default());

    let config = host_config(Some(r#"{"neighborhood": {"numHouses": 9}}"#)).unwrap();
    assert_eq!(config.neighborhood.num_houses, 9);
    assert_eq!(config.performance, ArenaConfig::default().performance);

    assert!(host_config(Some("{not json")).is_err());
    assert!(host_config(Some(r#"{"performance": {"targetFPS": 0}}"#)).is_err());
}
