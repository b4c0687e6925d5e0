//! The arena controller.
//!
//! An [`Arena`] moves through three phases. [`Arena::init`] takes it from
//! `Uninitialized` through `Configuring` (renderer flags, neighborhood,
//! lighting) to `Running`, where the host drives [`Arena::on_frame`] from its
//! per-frame callback until the returned [`MonitorHandle`] is stopped.
//!
//! While running, the arena samples the frame rate once per second. When it
//! falls under 80% of the target a warning is logged, and below
//! [`CRITICAL_FPS`] shadow and texture quality are lowered and pushed to the
//! render backend. Quality is never raised again automatically.
//!
//! # Capabilities
//!
//! Both the render backend and the neighborhood generator are optional.
//! Without a backend, renderer setup is skipped; without a generator, the
//! arena falls back to basic structures.

use instant::Instant;
use serde::Serialize;

use crate::{
    config::{ArenaConfig, ShadowQuality, TextureQuality},
    context::{NeighborhoodSource, RenderBackend, SceneHandle, ShadowMapType},
    generator::Generator,
    lighting::LightingUniform,
    monitor::{FrameOutcome, FrameSampler, MonitorHandle},
};

/// Fraction of the target fps under which the arena starts to complain.
pub const TARGET_FPS_RATIO: f64 = 0.8;
/// Below this the optimizer lowers quality.
pub const CRITICAL_FPS: u32 = 30;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Configuring,
    Running,
}

/// Counters of the running arena. `draw_calls` and `triangles` are filled by the host renderer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub fps: u32,
    pub draw_calls: u32,
    pub triangles: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    pub fps: u32,
    pub draw_calls: u32,
    pub triangles: u32,
    pub config: ArenaConfig,
    pub houses: usize,
    pub flags: usize,
}

pub struct Arena {
    config: ArenaConfig,
    phase: Phase,
    scene: Option<SceneHandle>,
    renderer: Option<Box<dyn RenderBackend>>,
    generator: Option<Box<dyn NeighborhoodSource>>,
    lighting: Option<LightingUniform>,
    stats: Stats,
    sampler: Option<FrameSampler>,
    monitor: Option<MonitorHandle>,
}

impl Arena {
    /// A controller without capabilities. Attach them with
    /// [`Arena::with_renderer`] and [`Arena::with_generator`] before `init`.
    pub fn new(config: ArenaConfig) -> Self {
        Self {
            config,
            phase: Phase::Uninitialized,
            scene: None,
            renderer: None,
            generator: None,
            lighting: None,
            stats: Stats::default(),
            sampler: None,
            monitor: None,
        }
    }

    pub fn with_renderer(mut self, renderer: Box<dyn RenderBackend>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn with_generator(mut self, generator: Box<dyn NeighborhoodSource>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    pub fn scene(&self) -> Option<SceneHandle> {
        self.scene
    }

    pub fn generator(&self) -> Option<&dyn NeighborhoodSource> {
        self.generator.as_deref()
    }

    pub fn lighting(&self) -> Option<&LightingUniform> {
        self.lighting.as_ref()
    }

    pub fn init(&mut self, scene: SceneHandle) -> anyhow::Result<MonitorHandle> {
        self.init_at(scene, Instant::now())
    }

    /// [`Arena::init`] with an explicit start time for the frame sampler.
    pub fn init_at(&mut self, scene: SceneHandle, now: Instant) -> anyhow::Result<MonitorHandle> {
        anyhow::ensure!(
            self.phase == Phase::Uninitialized,
            "arena '{}' is already initialized ({:?})",
            self.config.name,
            self.phase
        );
        self.config.validate()?;

        log::info!("initializing {}", self.config.name);
        self.phase = Phase::Configuring;
        self.scene = Some(scene);

        self.setup_renderer();
        if let Err(e) = self.generate_neighborhood() {
            self.phase = Phase::Uninitialized;
            self.scene = None;
            return Err(e);
        }
        self.setup_lighting();
        let monitor = self.start_performance_monitor(now);

        self.phase = Phase::Running;
        log::info!("{} initialized on scene {:?}", self.config.name, scene);
        Ok(monitor)
    }

    /// Push the performance settings to the render backend, if there is one.
    pub fn setup_renderer(&mut self) {
        let Some(renderer) = self.renderer.as_mut() else {
            log::warn!("no render backend available, renderer configuration skipped");
            return;
        };
        let perf = &self.config.performance;

        renderer.set_shadow_map_enabled(perf.enable_shadows);
        renderer.set_shadow_map_type(match perf.shadow_quality {
            ShadowQuality::High => ShadowMapType::PcfSoft,
            ShadowQuality::Medium | ShadowQuality::Low => ShadowMapType::Pcf,
        });
        renderer.set_antialias(perf.antialiasing);
        renderer.set_vsync(perf.vsync);
        let ratio = renderer.device_pixel_ratio();
        renderer.set_pixel_ratio(ratio);
        renderer.set_texture_quality(self.config.graphics.texture_quality);

        log::info!("render settings configured: {:?}", perf);
    }

    pub fn generate_neighborhood(&mut self) -> anyhow::Result<()> {
        let Some(generator) = self.generator.as_mut() else {
            log::warn!("generator not available, creating basic structures");
            self.create_basic_structures();
            return Ok(());
        };
        let nh = &self.config.neighborhood;
        generator.generate_neighborhood(nh.center_x, nh.center_z, nh.num_houses)?;
        log::info!(
            "neighborhood generated: {} houses, {} flags",
            generator.houses().len(),
            generator.flags().len()
        );
        Ok(())
    }

    /// Fallback when no generator is attached. Produces nothing yet.
    fn create_basic_structures(&self) {
        log::info!("creating basic structures");
    }

    /// Report the light and fog parameters and keep them for the host.
    pub fn setup_lighting(&mut self) -> LightingUniform {
        let gfx = &self.config.graphics;
        log::info!("configuring {} lighting", self.config.theme);
        log::info!("ambient light: {}", gfx.ambient_light);
        log::info!("sun intensity: {}", gfx.sun_intensity);
        if gfx.fog_enabled && self.scene.is_some() {
            log::info!("fog enabled: {}m - {}m", gfx.fog_near, gfx.fog_far);
        }
        let lighting = LightingUniform::from_config(gfx);
        self.lighting = Some(lighting);
        lighting
    }

    /// Start sampling frames from `now` on. A monitor that was already running is stopped.
    pub fn start_performance_monitor(&mut self, now: Instant) -> MonitorHandle {
        if let Some(previous) = self.monitor.take() {
            previous.stop();
        }
        let monitor = MonitorHandle::new();
        self.sampler = Some(FrameSampler::new(now));
        self.monitor = Some(monitor.clone());
        log::info!("performance monitor started");
        monitor
    }

    /// Per-frame callback of the host scheduler.
    pub fn on_frame(&mut self, now: Instant) -> FrameOutcome {
        match &self.monitor {
            Some(monitor) if !monitor.is_stopped() => (),
            Some(_) => {
                self.sampler = None;
                return FrameOutcome::Stopped;
            }
            None => return FrameOutcome::Stopped,
        }
        let Some(sampler) = self.sampler.as_mut() else {
            return FrameOutcome::Stopped;
        };
        if let Some(fps) = sampler.record(now) {
            self.sample_fps(fps);
        }
        FrameOutcome::Continue
    }

    /// Store a measured frame rate and react to it.
    pub fn sample_fps(&mut self, fps: u32) {
        self.stats.fps = fps;
        self.optimize_performance();
    }

    /// Lower quality when the last sampled fps is critical.
    ///
    /// Returns whether the configuration changed.
    pub fn optimize_performance(&mut self) -> bool {
        let target = self.config.performance.target_fps;
        if self.stats.fps as f64 >= target as f64 * TARGET_FPS_RATIO {
            return false;
        }
        log::warn!("performance: {} fps (target: {})", self.stats.fps, target);
        if self.stats.fps >= CRITICAL_FPS {
            return false;
        }

        let perf = &mut self.config.performance;
        let gfx = &mut self.config.graphics;
        let changed = perf.shadow_quality != ShadowQuality::Low
            || gfx.texture_quality != TextureQuality::Medium;
        if changed {
            log::info!("critical fps, lowering quality");
            perf.shadow_quality = ShadowQuality::Low;
            gfx.texture_quality = TextureQuality::Medium;
            self.setup_renderer();
        }
        changed
    }

    pub fn record_render_stats(&mut self, draw_calls: u32, triangles: u32) {
        self.stats.draw_calls = draw_calls;
        self.stats.triangles = triangles;
        let max = self.config.performance.max_draw_calls;
        if draw_calls > max {
            log::warn!("{} draw calls exceed the budget of {}", draw_calls, max);
        }
    }

    /// Current counters, `None` until [`Arena::init`] ran.
    pub fn stats(&self) -> Option<StatsSnapshot> {
        match self.phase {
            Phase::Uninitialized => None,
            Phase::Configuring | Phase::Running => Some(self.snapshot()),
        }
    }

    /// Current counters regardless of phase; zeros before init.
    pub fn snapshot(&self) -> StatsSnapshot {
        let (houses, flags) = self
            .generator
            .as_ref()
            .map(|g| (g.houses().len(), g.flags().len()))
            .unwrap_or((0, 0));
        StatsSnapshot {
            fps: self.stats.fps,
            draw_calls: self.stats.draw_calls,
            triangles: self.stats.triangles,
            config: self.config.clone(),
            houses,
            flags,
        }
    }

    /// Stop the performance monitor.
    pub fn shutdown(&mut self) {
        if let Some(monitor) = self.monitor.take() {
            monitor.stop();
        }
        self.sampler = None;
    }
}

/// Build an arena with a generator laid out from `config` and initialize it on `scene`.
///
/// Houses are spaced by `config.neighborhood.spacing` (25 by default), not by
/// the generator's own [`DEFAULT_SPACING`](crate::generator::DEFAULT_SPACING)
/// of 20 used by a bare [`Generator`](crate::generator::Generator).
pub fn init_arena(
    scene: SceneHandle,
    config: ArenaConfig,
    renderer: Option<Box<dyn RenderBackend>>,
) -> anyhow::Result<(Arena, MonitorHandle)> {
    let generator = Generator::from_config(&config.neighborhood)?;
    let mut arena = Arena::new(config).with_generator(Box::new(generator));
    if let Some(renderer) = renderer {
        arena = arena.with_renderer(renderer);
    }
    let monitor = arena.init(scene)?;
    Ok((arena, monitor))
}
