//! Audio backends — where sound programs are turned into audible output.

mod offline;
#[cfg(feature = "playback")]
mod device;

pub use self::offline::OfflineBackend;
#[cfg(feature = "playback")]
pub use self::device::CpalBackend;

use crate::error::SynthError;
use crate::program::SoundProgram;

/// An output context that can start sessions.
///
/// `play` starts the program at the backend's current time and returns
/// immediately; the session then runs to completion on its own.
pub trait AudioBackend {
    fn sample_rate(&self) -> u32;
    fn play(&mut self, program: &SoundProgram) -> Result<(), SynthError>;
}
