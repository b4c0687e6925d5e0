//! Host-facing handles and the optional capabilities the arena runs with.
//!
//! The arena never owns a renderer or a scene. The host hands it an opaque
//! [`SceneHandle`] and, optionally, a [`RenderBackend`] and a
//! [`NeighborhoodSource`]. A missing capability is a supported configuration
//! in which the arena runs with reduced functionality.

use std::{cell::RefCell, rc::Rc};

use serde::Serialize;

use crate::{
    config::TextureQuality,
    data_structures::descriptor::{FlagDescriptor, HouseDescriptor},
    generator::Export,
};

/// Opaque id of a host-owned 3D scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct SceneHandle(pub u32);

/// Shadow filtering requested from the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ShadowMapType {
    /// Percentage-closer filtering.
    Pcf,
    /// PCF with a larger kernel and a higher resolution map.
    PcfSoft,
}

/// The renderer switches the arena drives.
pub trait RenderBackend {
    fn set_shadow_map_enabled(&mut self, enabled: bool);

    fn set_shadow_map_type(&mut self, shadow_map_type: ShadowMapType);

    fn set_antialias(&mut self, enabled: bool);

    fn set_pixel_ratio(&mut self, ratio: f64);

    /// The pixel ratio of the display the backend presents to.
    fn device_pixel_ratio(&self) -> f64 {
        1.0
    }

    fn set_vsync(&mut self, _enabled: bool) {}

    fn set_texture_quality(&mut self, _quality: TextureQuality) {}
}

/// Lets the host keep a handle on the backend it gave the arena and read
/// the settings back when it rebuilds its targets.
impl<B: RenderBackend> RenderBackend for Rc<RefCell<B>> {
    fn set_shadow_map_enabled(&mut self, enabled: bool) {
        self.borrow_mut().set_shadow_map_enabled(enabled);
    }

    fn set_shadow_map_type(&mut self, shadow_map_type: ShadowMapType) {
        self.borrow_mut().set_shadow_map_type(shadow_map_type);
    }

    fn set_antialias(&mut self, enabled: bool) {
        self.borrow_mut().set_antialias(enabled);
    }

    fn set_pixel_ratio(&mut self, ratio: f64) {
        self.borrow_mut().set_pixel_ratio(ratio);
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.borrow().device_pixel_ratio()
    }

    fn set_vsync(&mut self, enabled: bool) {
        self.borrow_mut().set_vsync(enabled);
    }

    fn set_texture_quality(&mut self, quality: TextureQuality) {
        self.borrow_mut().set_texture_quality(quality);
    }
}

/// Something that can lay out a neighborhood and keeps what it generated.
pub trait NeighborhoodSource {
    fn generate_neighborhood(
        &mut self,
        center_x: f32,
        center_z: f32,
        num_houses: usize,
    ) -> anyhow::Result<()>;

    fn houses(&self) -> &[HouseDescriptor];

    fn flags(&self) -> &[FlagDescriptor];

    fn export(&self) -> Export {
        Export {
            houses: self.houses().to_vec(),
            flags: self.flags().to_vec(),
            palette: Default::default(),
        }
    }
}
