use std::{cell::RefCell, rc::Rc};

use sidi_arena::{
    RenderBackend,
    config::TextureQuality,
    context::ShadowMapType,
};

/// What the arena pushed into the backend so far.
#[derive(Debug, Default)]
pub(crate) struct BackendState {
    pub shadow_map_enabled: Option<bool>,
    pub shadow_map_type: Option<ShadowMapType>,
    pub antialias: Option<bool>,
    pub pixel_ratio: Option<f64>,
    pub vsync: Option<bool>,
    pub texture_quality: Option<TextureQuality>,
    pub shadow_type_invocations: u32,
}

/// A render backend that records every call into shared state.
pub(crate) struct RecordingBackend {
    state: Rc<RefCell<BackendState>>,
    device_pixel_ratio: f64,
}

impl RecordingBackend {
    pub fn new(device_pixel_ratio: f64) -> (Self, Rc<RefCell<BackendState>>) {
        let state = Rc::new(RefCell::new(BackendState::default()));
        (
            Self {
                state: state.clone(),
                device_pixel_ratio,
            },
            state,
        )
    }
}

impl RenderBackend for RecordingBackend {
    fn set_shadow_map_enabled(&mut self, enabled: bool) {
        self.state.borrow_mut().shadow_map_enabled = Some(enabled);
    }

    fn set_shadow_map_type(&mut self, shadow_map_type: ShadowMapType) {
        let mut state = self.state.borrow_mut();
        state.shadow_map_type = Some(shadow_map_type);
        state.shadow_type_invocations += 1;
    }

    fn set_antialias(&mut self, enabled: bool) {
        self.state.borrow_mut().antialias = Some(enabled);
    }

    fn set_pixel_ratio(&mut self, ratio: f64) {
        self.state.borrow_mut().pixel_ratio = Some(ratio);
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }

    fn set_vsync(&mut self, enabled: bool) {
        self.state.borrow_mut().vsync = Some(enabled);
    }

    fn set_texture_quality(&mut self, quality: TextureQuality) {
        self.state.borrow_mut().texture_quality = Some(quality);
    }
}

pub(crate) fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-4,
        "expected {}, got {}",
        expected,
        actual
    );
}
