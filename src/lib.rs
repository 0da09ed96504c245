pub mod backend;
pub mod config;
pub mod dsp;
pub mod error;
pub mod media;
pub mod profile;
pub mod program;
pub mod sound;

pub use crate::backend::{AudioBackend, OfflineBackend};
pub use crate::config::SoundConfig;
pub use crate::error::{ConfigError, SynthError};
pub use crate::profile::SoundProfile;
pub use crate::program::SoundProgram;
pub use crate::sound::EngineSound;

use wasm_bindgen::prelude::*;

/// The crate version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// WASM-exposed: return the crate version string.
#[wasm_bindgen]
pub fn core_version() -> String {
    VERSION.to_string()
}

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// WASM-exposed: render one profile (`"rev"`, `"start"`, `"idle"`) to mono f32 samples.
#[wasm_bindgen]
pub fn render_profile_samples(profile: &str, sample_rate: u32) -> Result<Vec<f32>, JsValue> {
    let profile: SoundProfile = profile.parse().map_err(js_err)?;
    dsp::renderer::render_profile(profile, sample_rate).map_err(js_err)
}

/// WASM-exposed: render one profile to a 16-bit mono WAV byte array.
#[wasm_bindgen]
pub fn render_profile_wav(profile: &str, sample_rate: u32) -> Result<Vec<u8>, JsValue> {
    let profile: SoundProfile = profile.parse().map_err(js_err)?;
    dsp::renderer::render_wav(profile, sample_rate).map_err(js_err)
}

/// WASM-exposed: the synthesis program of a profile as a plain JS object.
#[wasm_bindgen]
pub fn profile_program(profile: &str) -> Result<JsValue, JsValue> {
    let profile: SoundProfile = profile.parse().map_err(js_err)?;
    serde_wasm_bindgen::to_value(&profile.program()).map_err(js_err)
}

/// WASM-exposed engine sound service for an AudioWorklet.
///
/// Triggers schedule sessions; the worklet pulls mixed blocks with `render`.
#[wasm_bindgen]
pub struct WebEngineSound {
    inner: EngineSound<OfflineBackend>,
}

#[wasm_bindgen]
impl WebEngineSound {
    #[wasm_bindgen(constructor)]
    pub fn new(sample_rate: u32) -> WebEngineSound {
        WebEngineSound {
            inner: EngineSound::new(move || OfflineBackend::new(sample_rate)),
        }
    }

    /// Play a profile by name. Unknown names and audio failures are ignored.
    pub fn trigger(&mut self, profile: &str) {
        if let Ok(profile) = profile.parse::<SoundProfile>() {
            self.inner.trigger(profile);
        }
    }

    #[wasm_bindgen(js_name = setEnabled)]
    pub fn set_enabled(&mut self, enabled: bool) {
        self.inner.set_enabled(enabled);
    }

    pub fn toggle(&mut self) -> bool {
        self.inner.toggle()
    }

    #[wasm_bindgen(js_name = isEnabled)]
    pub fn is_enabled(&self) -> bool {
        self.inner.is_enabled()
    }

    /// Fill `out` with the next mono block; silence before the first trigger.
    pub fn render(&mut self, out: &mut [f32]) {
        match self.inner.backend_mut() {
            Some(backend) => backend.render(out),
            None => out.fill(0.0),
        }
    }

    #[wasm_bindgen(js_name = activeSessions)]
    pub fn active_sessions(&self) -> usize {
        self.inner.backend().map_or(0, |b| b.active_sessions())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn web_engine_sound_renders_after_trigger() {
        let mut web = WebEngineSound::new(8000);
        let mut block = [1.0_f32; 128];
        web.render(&mut block);
        assert!(block.iter().all(|&s| s == 0.0));
        assert_eq!(web.active_sessions(), 0);

        web.trigger("rev");
        web.trigger("nonsense");
        assert_eq!(web.active_sessions(), 1);

        let mut block = vec![0.0_f32; 4000];
        web.render(&mut block);
        assert!(block.iter().any(|&s| s != 0.0));
    }

    #[test]
    fn web_engine_sound_respects_toggle() {
        let mut web = WebEngineSound::new(8000);
        assert!(!web.toggle());
        web.trigger("start");
        assert_eq!(web.active_sessions(), 0);
        web.set_enabled(true);
        assert!(web.is_enabled());
        web.trigger("start");
        assert_eq!(web.active_sessions(), 1);
    }
}
