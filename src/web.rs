//! wasm-bindgen surface for the browser page
//!
//! The page owns the DOM and `requestAnimationFrame`; it forwards host
//! messages and input here and renders the JSON snapshots it gets back.

use wasm_bindgen::prelude::*;

use crate::error::NuiError;
use crate::overlay::{Overlay, Page};
use crate::sim::Difficulty;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"logger already initialised".into());
    }
    log::info!("Silent Operator NUI loaded");
}

#[wasm_bindgen]
pub struct Nui {
    overlay: Overlay,
    last_frame_ms: Option<f64>,
}

impl Default for Nui {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl Nui {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Nui {
        let seed = js_sys::Date::now() as u64;
        Nui {
            overlay: Overlay::load(seed),
            last_frame_ms: None,
        }
    }

    /// Animation-frame callback with the rAF timestamp (ms)
    pub fn frame(&mut self, now_ms: f64) {
        let elapsed = match self.last_frame_ms {
            Some(last) => (now_ms - last).max(0.0),
            None => 0.0,
        };
        self.last_frame_ms = Some(now_ms);
        self.overlay.update(elapsed);
    }

    /// Tab hidden; the next frame starts a fresh delta
    pub fn suspend(&mut self) {
        self.last_frame_ms = None;
    }

    /// `message` event payload from the host, as JSON
    pub fn handle_message(&mut self, json: &str) -> Result<(), JsError> {
        self.overlay.handle_message_json(json)?;
        Ok(())
    }

    pub fn key_down(&mut self, code: &str) {
        self.overlay.key_down(code);
    }

    pub fn press_inject(&mut self) {
        self.overlay.press_inject();
    }

    pub fn request_scan(&mut self) -> bool {
        self.overlay.request_scan()
    }

    pub fn request_close(&mut self) -> bool {
        self.overlay.request_close()
    }

    pub fn select_target(&mut self, index: usize) -> Result<bool, JsError> {
        Ok(self.overlay.request_target_hack(index)?)
    }

    pub fn select_vpn(&mut self, index: usize) -> Result<bool, JsError> {
        Ok(self.overlay.request_vpn(index)?)
    }

    /// Answer the open prompt
    pub fn confirm(&mut self, confirmed: bool) {
        self.overlay.resolve_dialog(confirmed);
    }

    pub fn select_page(&mut self, index: usize) -> Result<(), JsError> {
        let page = Page::ALL
            .get(index)
            .copied()
            .ok_or_else(|| JsError::new(&format!("no page {index}")))?;
        self.overlay.select_page(page);
        Ok(())
    }

    pub fn cycle_page(&mut self, forward: bool) {
        self.overlay.cycle_page(forward);
    }

    pub fn dismiss_toast(&mut self, id: u32) {
        self.overlay.dismiss_toast(id);
    }

    pub fn set_difficulty(&mut self, name: &str) -> Result<(), JsError> {
        let difficulty =
            Difficulty::from_str(name).ok_or_else(|| NuiError::UnknownDifficulty(name.to_string()))?;
        self.overlay.set_difficulty(difficulty);
        Ok(())
    }

    pub fn set_theme(&mut self, name: &str) -> Result<(), JsError> {
        let mut settings = self.overlay.settings().clone();
        settings.set_theme_str(name)?;
        self.overlay.apply_settings(settings);
        Ok(())
    }

    pub fn set_animations(&mut self, enabled: bool) {
        let mut settings = self.overlay.settings().clone();
        settings.animations = enabled;
        self.overlay.apply_settings(settings);
    }

    pub fn set_sounds(&mut self, enabled: bool) {
        let mut settings = self.overlay.settings().clone();
        settings.sounds = enabled;
        self.overlay.apply_settings(settings);
    }

    /// Lock render snapshot as JSON
    pub fn lock_frame_json(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string(&self.overlay.frame())?)
    }

    /// Panel snapshot as JSON
    pub fn view_json(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string(&self.overlay.view())?)
    }

    /// Requests for the host resource, as a JSON array of
    /// `{ "endpoint": ..., ...body }`
    pub fn drain_host_requests(&mut self) -> Result<String, JsError> {
        Ok(serde_json::to_string(&self.overlay.drain_host_requests())?)
    }
}
