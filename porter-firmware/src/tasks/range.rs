//! Ultrasonic range task
//!
//! Pings the HC-SR04 and publishes the latest range for the sensor
//! gateway's wall predicate. The transport tick never waits on the
//! ranger; it only reads the last published value.

use defmt::*;
use embassy_rp::gpio::{Input, Output};
use embassy_time::{with_timeout, Duration, Instant, Ticker, Timer};
use portable_atomic::Ordering;

use crate::channels::WALL_RANGE_CM;

/// Measurement interval - the HC-SR04 needs a pause between pings to
/// avoid echo cross-talk
const RANGE_INTERVAL_MS: u64 = 60;

/// Longest echo worth waiting for (~5 m round trip)
const ECHO_TIMEOUT: Duration = Duration::from_millis(30);

/// Round-trip microseconds per centimeter at ~343 m/s
const US_PER_CM: u64 = 58;

/// Range task - periodic HC-SR04 measurement
#[embassy_executor::task]
pub async fn range_task(mut trigger: Output<'static>, mut echo: Input<'static>) {
    info!("Range task started");

    let mut ticker = Ticker::every(Duration::from_millis(RANGE_INTERVAL_MS));

    loop {
        ticker.next().await;

        // 10 us trigger pulse starts a measurement
        trigger.set_high();
        Timer::after_micros(10).await;
        trigger.set_low();

        if with_timeout(ECHO_TIMEOUT, echo.wait_for_high()).await.is_err() {
            WALL_RANGE_CM.store(u16::MAX, Ordering::Relaxed);
            continue;
        }
        let pulse_start = Instant::now();
        if with_timeout(ECHO_TIMEOUT, echo.wait_for_low()).await.is_err() {
            WALL_RANGE_CM.store(u16::MAX, Ordering::Relaxed);
            continue;
        }

        let cm = (pulse_start.elapsed().as_micros() / US_PER_CM).min(u64::from(u16::MAX)) as u16;
        WALL_RANGE_CM.store(cm, Ordering::Relaxed);
        trace!("Range: {} cm", cm);
    }
}
