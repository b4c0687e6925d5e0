//! Host integration: logging and, in the browser, the animation-frame loop.
//!
//! On `wasm32` this module exports the arena to JavaScript:
//!
//! - `init_sidi_bousaid_arena(scene_id, config_json)` builds and initializes an
//!   arena from an optional JSON override (see [`host_config`]) and schedules
//!   its monitor on `requestAnimationFrame`
//! - `ArenaHandle::stats()` returns the current stats as JSON
//! - `ArenaHandle::stop()` cancels the pending frame callback and releases it;
//!   dropping the handle does the same
//!
//! Native hosts call [`init_logger`] once and drive
//! [`crate::arena::Arena::on_frame`] from their own event loop.

use crate::config::ArenaConfig;

/// Install the platform logger. Failing to install one is not fatal.
pub fn init_logger() {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Err(e) = env_logger::try_init() {
            println!("Warning: Could not initialize logger: {}", e);
        };
    }

    #[cfg(target_arch = "wasm32")]
    {
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Could not initialize logger: {}", e).into());
        }
    }
}

/// Configuration a host passes as JSON. `None` or a blank string means defaults.
pub fn host_config(json: Option<&str>) -> anyhow::Result<ArenaConfig> {
    match json.map(str::trim) {
        Some(json) if !json.is_empty() => ArenaConfig::from_json(json),
        _ => Ok(ArenaConfig::default()),
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::*;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::{
        cell::{Cell, RefCell},
        rc::Rc,
    };

    use instant::Instant;
    use wasm_bindgen::{JsCast, prelude::*};

    use crate::{
        arena::{Arena, init_arena},
        context::{RenderBackend, SceneHandle},
        monitor::{FrameOutcome, MonitorHandle},
        render::RenderSettings,
    };

    type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

    #[wasm_bindgen]
    pub struct ArenaHandle {
        arena: Rc<RefCell<Arena>>,
        monitor: MonitorHandle,
        callback: FrameCallback,
        request_id: Rc<Cell<Option<i32>>>,
    }

    #[wasm_bindgen]
    impl ArenaHandle {
        /// Stats as a JSON string.
        pub fn stats(&self) -> Option<String> {
            let stats = self.arena.borrow().stats()?;
            serde_json::to_string(&stats).ok()
        }

        pub fn stop(&self) {
            self.monitor.stop();
            if let (Some(id), Some(window)) = (self.request_id.take(), web_sys::window()) {
                if let Err(e) = window.cancel_animation_frame(id) {
                    log::warn!("could not cancel animation frame {}: {:?}", id, e);
                }
            }
            // breaks the closure's reference to itself
            self.callback.borrow_mut().take();
            log::info!("performance monitor stopped");
        }
    }

    impl Drop for ArenaHandle {
        fn drop(&mut self) {
            // stop() is a no-op the second time
            self.stop();
        }
    }

    fn request_animation_frame(callback: &Closure<dyn FnMut()>) -> Result<i32, JsValue> {
        web_sys::window()
            .ok_or_else(|| JsValue::from_str("no global window"))?
            .request_animation_frame(callback.as_ref().unchecked_ref())
    }

    #[wasm_bindgen]
    pub fn init_sidi_bousaid_arena(
        scene_id: u32,
        config_json: Option<String>,
    ) -> Result<ArenaHandle, JsValue> {
        super::init_logger();
        let config = super::host_config(config_json.as_deref())
            .map_err(|e| JsValue::from_str(&format!("invalid arena config: {:#}", e)))?;
        let device_pixel_ratio = web_sys::window()
            .map(|w| w.device_pixel_ratio())
            .unwrap_or(1.0);
        let renderer: Box<dyn RenderBackend> = Box::new(RenderSettings::new(device_pixel_ratio));
        let (arena, monitor) =
            init_arena(SceneHandle(scene_id), config, Some(renderer))
                .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let arena = Rc::new(RefCell::new(arena));
        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let request_id = Rc::new(Cell::new(None));

        let frame_arena = arena.clone();
        let frame_callback = callback.clone();
        let frame_request_id = request_id.clone();
        *callback.borrow_mut() = Some(Closure::new(move || {
            frame_request_id.set(None);
            if frame_arena.borrow_mut().on_frame(Instant::now()) == FrameOutcome::Stopped {
                return;
            }
            if let Some(next) = frame_callback.borrow().as_ref() {
                match request_animation_frame(next) {
                    Ok(id) => frame_request_id.set(Some(id)),
                    Err(e) => log::error!("could not schedule the next frame: {:?}", e),
                }
            }
        }));

        if let Some(first) = callback.borrow().as_ref() {
            request_id.set(Some(request_animation_frame(first)?));
        }

        Ok(ArenaHandle {
            arena,
            monitor,
            callback,
            request_id,
        })
    }
}
