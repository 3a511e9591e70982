//! Tone output trait

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single audio cue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tone {
    /// Pitch in hertz
    pub freq_hz: u16,
    /// Playback length in milliseconds
    pub duration_ms: u16,
}

impl Tone {
    /// Create a tone cue
    pub const fn new(freq_hz: u16, duration_ms: u16) -> Self {
        Self {
            freq_hz,
            duration_ms,
        }
    }
}

/// Fire-and-forget tone playback.
///
/// `play_tone` returns immediately; playback happens in the background.
pub trait Sounder {
    /// Start playing `tone`
    fn play_tone(&mut self, tone: Tone);
}
