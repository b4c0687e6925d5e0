//! Arena configuration.
//!
//! [`ArenaConfig`] is read once at startup. Only the optimizer in
//! [`crate::arena`] mutates it afterwards, and only the quality fields of the
//! performance and graphics sections.
//!
//! Every section implements `Default` with the values the arena ships with,
//! and deserialisation accepts partial JSON so a host only overrides the keys
//! it cares about:
//!
//! ```
//! let config = sidi_arena::config::ArenaConfig::from_json(
//!     r#"{ "neighborhood": { "numHouses": 4 } }"#,
//! ).unwrap();
//! assert_eq!(config.neighborhood.num_houses, 4);
//! assert_eq!(config.neighborhood.spacing, 25.0);
//! ```

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShadowQuality {
    Low,
    Medium,
    High,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextureQuality {
    Low,
    Medium,
    High,
}

/// Frame pacing and renderer toggles.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PerformanceConfig {
    #[serde(rename = "targetFPS")]
    pub target_fps: u32,
    pub max_draw_calls: u32,
    pub enable_shadows: bool,
    pub shadow_quality: ShadowQuality,
    pub antialiasing: bool,
    pub vsync: bool,
    #[serde(rename = "LODEnabled")]
    pub lod_enabled: bool,
    pub culling_distance: f32,
    pub particle_limit: u32,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            max_draw_calls: 500,
            enable_shadows: true,
            shadow_quality: ShadowQuality::Medium,
            antialiasing: true,
            vsync: true,
            lod_enabled: true,
            culling_distance: 100.0,
            particle_limit: 1000,
        }
    }
}

/// Texture, fog and light parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GraphicsConfig {
    pub texture_quality: TextureQuality,
    pub render_distance: f32,
    pub fog_enabled: bool,
    /// 0xRRGGBB
    pub fog_color: u32,
    pub fog_near: f32,
    pub fog_far: f32,
    pub ambient_light: f32,
    pub sun_intensity: f32,
}

impl Default for GraphicsConfig {
    fn default() -> Self {
        Self {
            texture_quality: TextureQuality::High,
            render_distance: 150.0,
            fog_enabled: true,
            fog_color: 0xCCE5FF,
            fog_near: 50.0,
            fog_far: 200.0,
            ambient_light: 0.6,
            sun_intensity: 1.2,
        }
    }
}

/// Where and how many houses the generator lays out.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NeighborhoodConfig {
    pub center_x: f32,
    pub center_z: f32,
    pub num_houses: usize,
    pub spacing: f32,
}

impl Default for NeighborhoodConfig {
    fn default() -> Self {
        Self {
            center_x: 0.0,
            center_z: 0.0,
            num_houses: 15,
            spacing: 25.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub name: String,
    pub theme: String,
    pub performance: PerformanceConfig,
    pub graphics: GraphicsConfig,
    pub neighborhood: NeighborhoodConfig,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            name: "Sidi Bou Saïd Arena".to_string(),
            theme: "tunisian".to_string(),
            performance: PerformanceConfig::default(),
            graphics: GraphicsConfig::default(),
            neighborhood: NeighborhoodConfig::default(),
        }
    }
}

impl ArenaConfig {
    /// Parse a (possibly partial) JSON override on top of the defaults.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.performance.target_fps > 0,
            "target fps must be positive"
        );
        let nh = &self.neighborhood;
        anyhow::ensure!(
            nh.spacing.is_finite() && nh.spacing > 0.0,
            "neighborhood spacing must be a positive number, got {}",
            nh.spacing
        );
        anyhow::ensure!(
            nh.center_x.is_finite() && nh.center_z.is_finite(),
            "neighborhood center must be finite"
        );
        let gfx = &self.graphics;
        anyhow::ensure!(
            gfx.fog_near.is_finite() && gfx.fog_far.is_finite() && gfx.fog_near <= gfx.fog_far,
            "fog range {}..{} is invalid",
            gfx.fog_near,
            gfx.fog_far
        );
        Ok(())
    }
}
