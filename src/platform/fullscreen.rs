//! Fullscreen toggle

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FullscreenStatus {
    /// Browser exposes the fullscreen API
    pub available: bool,
    /// Document is currently fullscreen
    pub active: bool,
}

impl FullscreenStatus {
    /// Label for the in-game toggle button
    pub fn button_label(&self) -> &'static str {
        if self.active { "Exit fullscreen" } else { "Fullscreen" }
    }

    /// Setup screen only offers fullscreen when not already in it
    pub fn show_setup_button(&self) -> bool {
        self.available && !self.active
    }
}

/// Query the document's fullscreen state (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn status() -> FullscreenStatus {
    match web_sys::window().and_then(|w| w.document()) {
        Some(document) => FullscreenStatus {
            available: document.fullscreen_enabled(),
            active: document.fullscreen_element().is_some(),
        },
        None => FullscreenStatus::default(),
    }
}

/// Enter or leave fullscreen (WASM only). The state flips asynchronously;
/// re-query `status()` on the next `fullscreenchange`.
#[cfg(target_arch = "wasm32")]
pub fn toggle() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    if document.fullscreen_element().is_some() {
        document.exit_fullscreen();
    } else if let Some(root) = document.document_element() {
        if let Err(e) = root.request_fullscreen() {
            log::warn!("Fullscreen request failed: {:?}", e);
        }
    }
}

/// Native stubs
#[cfg(not(target_arch = "wasm32"))]
pub fn status() -> FullscreenStatus {
    FullscreenStatus::default()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn toggle() {
    log::debug!("Fullscreen is not available natively");
}
