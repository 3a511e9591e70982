//! Tone playback task
//!
//! Bit-bangs the piezo pin for each queued cue. A cue arriving while one
//! is playing replaces any older pending cue (latest wins), matching the
//! fire-and-forget sounder contract.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_time::{Duration, Instant, Timer};

use crate::channels::TONE_CMD;

/// Tone task - plays cues requested via TONE_CMD
#[embassy_executor::task]
pub async fn tone_task(mut pin: Output<'static>) {
    info!("Tone task started");

    loop {
        let tone = TONE_CMD.wait().await;
        debug!("Tone: {} Hz for {} ms", tone.freq_hz, tone.duration_ms);

        if tone.freq_hz == 0 {
            continue;
        }

        let half_period_us = 500_000 / u64::from(tone.freq_hz);
        let end = Instant::now() + Duration::from_millis(u64::from(tone.duration_ms));

        while Instant::now() < end {
            pin.set_high();
            Timer::after_micros(half_period_us).await;
            pin.set_low();
            Timer::after_micros(half_period_us).await;
        }
    }
}
