//! Engine sound service — the object UI callbacks hold to play engine cues.
//!
//! Owns the enabled flag and the output context. The context is created on
//! the first enabled trigger and kept for the rest of the service's life.
//! Sound is a best-effort enhancement: every audio failure is logged and
//! swallowed, and a disabled service does nothing at all.

use tracing::{debug, trace, warn};

use crate::backend::AudioBackend;
use crate::config::SoundConfig;
use crate::error::SynthError;
use crate::profile::SoundProfile;
use crate::program::SoundProgram;

type BackendFactory<B> = Box<dyn FnMut() -> Result<B, SynthError>>;

pub struct EngineSound<B: AudioBackend> {
    enabled: bool,
    backend: Option<B>,
    factory: BackendFactory<B>,
}

impl<B: AudioBackend> EngineSound<B> {
    /// A service that opens its backend with `factory` on first use.
    pub fn new(factory: impl FnMut() -> Result<B, SynthError> + 'static) -> Self {
        EngineSound {
            enabled: true,
            backend: None,
            factory: Box::new(factory),
        }
    }

    /// Like [`EngineSound::new`], starting enabled or not per `config`.
    pub fn from_config(
        config: &SoundConfig,
        factory: impl FnMut() -> Result<B, SynthError> + 'static,
    ) -> Self {
        let mut sound = EngineSound::new(factory);
        sound.enabled = config.enabled;
        sound
    }

    /// Play `profile` now, unless sound is disabled.
    pub fn trigger(&mut self, profile: SoundProfile) {
        if !self.enabled {
            trace!(%profile, "sound disabled, trigger ignored");
            return;
        }
        if let Err(e) = self.try_play(&profile.program()) {
            warn!(%profile, "engine sound skipped: {}", e);
        }
    }

    pub fn rev(&mut self) {
        self.trigger(SoundProfile::Rev);
    }

    pub fn start(&mut self) {
        self.trigger(SoundProfile::Start);
    }

    pub fn idle(&mut self) {
        self.trigger(SoundProfile::Idle);
    }

    /// Gate future triggers. Sessions already playing are unaffected.
    pub fn set_enabled(&mut self, enabled: bool) {
        debug!(enabled, "engine sound toggled");
        self.enabled = enabled;
    }

    /// Flip the enabled flag and return the new state.
    pub fn toggle(&mut self) -> bool {
        self.set_enabled(!self.enabled);
        self.enabled
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The output context, if one has been opened.
    pub fn backend(&self) -> Option<&B> {
        self.backend.as_ref()
    }

    pub fn backend_mut(&mut self) -> Option<&mut B> {
        self.backend.as_mut()
    }

    fn try_play(&mut self, program: &SoundProgram) -> Result<(), SynthError> {
        let backend = match self.backend.take() {
            Some(backend) => backend,
            None => {
                let backend = (self.factory)()?;
                debug!(sample_rate = backend.sample_rate(), "audio context opened");
                backend
            }
        };
        self.backend.insert(backend).play(program)
    }
}
