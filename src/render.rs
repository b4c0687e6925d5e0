//! wgpu-side renderer settings.
//!
//! [`RenderSettings`] is the [`RenderBackend`] a wgpu host hands to the arena.
//! The arena flips its switches; the host reads them back when it (re)creates
//! its surface, shadow map and MSAA targets.
//!
//! # Key types
//!
//! - [`RenderSettings`] collects shadow, antialias, vsync, pixel ratio and texture settings
//! - [`SHADOW_MAP_FORMAT`] is the depth format of the shadow map

use serde::Serialize;

use crate::{
    config::TextureQuality,
    context::{RenderBackend, ShadowMapType},
};

pub const SHADOW_MAP_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RenderSettings {
    pub shadow_map_enabled: bool,
    pub shadow_map_type: ShadowMapType,
    pub antialias: bool,
    pub vsync: bool,
    pub pixel_ratio: f64,
    pub texture_quality: TextureQuality,
    device_pixel_ratio: f64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl RenderSettings {
    pub fn new(device_pixel_ratio: f64) -> Self {
        Self {
            shadow_map_enabled: false,
            shadow_map_type: ShadowMapType::Pcf,
            antialias: false,
            vsync: true,
            pixel_ratio: 1.0,
            texture_quality: TextureQuality::High,
            device_pixel_ratio,
        }
    }

    pub fn present_mode(&self) -> wgpu::PresentMode {
        if self.vsync {
            wgpu::PresentMode::Fifo
        } else {
            wgpu::PresentMode::AutoNoVsync
        }
    }

    /// MSAA sample count of the color and depth targets.
    pub fn sample_count(&self) -> u32 {
        if self.antialias { 4 } else { 1 }
    }

    /// Edge length of the square shadow map, `None` when shadows are off.
    pub fn shadow_map_size(&self) -> Option<u32> {
        if !self.shadow_map_enabled {
            return None;
        }
        Some(match self.shadow_map_type {
            ShadowMapType::Pcf => 2048,
            ShadowMapType::PcfSoft => 4096,
        })
    }

    pub fn shadow_filter(&self) -> wgpu::FilterMode {
        match self.shadow_map_type {
            ShadowMapType::Pcf => wgpu::FilterMode::Nearest,
            ShadowMapType::PcfSoft => wgpu::FilterMode::Linear,
        }
    }

    pub fn shadow_map_descriptor(&self) -> Option<wgpu::TextureDescriptor<'static>> {
        let size = self.shadow_map_size()?;
        Some(wgpu::TextureDescriptor {
            label: Some("shadow_map"),
            size: wgpu::Extent3d {
                width: size,
                height: size,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: SHADOW_MAP_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        })
    }

    /// Largest texture edge the host should upload at the current quality.
    pub fn max_texture_dimension(&self) -> u32 {
        match self.texture_quality {
            TextureQuality::Low => 512,
            TextureQuality::Medium => 1024,
            TextureQuality::High => 2048,
        }
    }

    /// Physical surface size for a logical size at the current pixel ratio.
    pub fn surface_size(&self, logical_width: u32, logical_height: u32) -> (u32, u32) {
        let scale = |v: u32| ((v as f64 * self.pixel_ratio).round() as u32).max(1);
        (scale(logical_width), scale(logical_height))
    }

    /// Apply the present mode to a surface configuration before `surface.configure`.
    pub fn configure_surface(&self, config: &mut wgpu::SurfaceConfiguration) {
        config.present_mode = self.present_mode();
    }
}

impl RenderBackend for RenderSettings {
    fn set_shadow_map_enabled(&mut self, enabled: bool) {
        self.shadow_map_enabled = enabled;
    }

    fn set_shadow_map_type(&mut self, shadow_map_type: ShadowMapType) {
        self.shadow_map_type = shadow_map_type;
    }

    fn set_antialias(&mut self, enabled: bool) {
        self.antialias = enabled;
    }

    fn set_pixel_ratio(&mut self, ratio: f64) {
        self.pixel_ratio = ratio;
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }

    fn set_vsync(&mut self, enabled: bool) {
        self.vsync = enabled;
    }

    fn set_texture_quality(&mut self, quality: TextureQuality) {
        self.texture_quality = quality;
    }
}
