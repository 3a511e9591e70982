//! Sounder gateway
//!
//! Hands tone cues to the tone task; `play_tone` never blocks.

use porter_core::traits::{Sounder, Tone};

use crate::channels::TONE_CMD;

/// Fire-and-forget sounder backed by the tone task
pub struct ToneGateway;

impl Sounder for ToneGateway {
    fn play_tone(&mut self, tone: Tone) {
        TONE_CMD.signal(tone);
    }
}
