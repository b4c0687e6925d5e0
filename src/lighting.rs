use crate::config::GraphicsConfig;

/// Mediterranean light and fog parameters, laid out for a uniform buffer.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightingUniform {
    pub ambient: f32,
    pub sun_intensity: f32,
    pub fog_near: f32,
    pub fog_far: f32,
    pub fog_color: [f32; 3],
    // 0 or 1, bools are not Pod
    pub fog_enabled: u32,
}

impl LightingUniform {
    pub fn from_config(gfx: &GraphicsConfig) -> Self {
        Self {
            ambient: gfx.ambient_light,
            sun_intensity: gfx.sun_intensity,
            fog_near: gfx.fog_near,
            fog_far: gfx.fog_far,
            fog_color: hex_to_rgb(gfx.fog_color),
            fog_enabled: gfx.fog_enabled as u32,
        }
    }

    pub fn fog_enabled(&self) -> bool {
        self.fog_enabled != 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

/// 0xRRGGBB to linear-agnostic `[r, g, b]` in `0.0..=1.0`.
pub fn hex_to_rgb(hex: u32) -> [f32; 3] {
    let channel = |shift: u32| ((hex >> shift) & 0xFF) as f32 / 255.0;
    [channel(16), channel(8), channel(0)]
}
