//! Board sensor gateway
//!
//! Touch sensors are plain GPIOs wired active-low. The line sensor is an
//! analog reflectance module on ADC0, scaled to the 0-100 percent range
//! the core expects. Wall detection compares the range task's latest
//! measurement against the configured distance; the gateway itself never
//! waits for the ultrasonic hardware.

use defmt::unwrap;
use embassy_rp::adc::{Adc, Channel};
use embassy_rp::gpio::Input;
use embassy_rp::Blocking;
use portable_atomic::Ordering;

use porter_core::traits::Sensors;

use crate::channels::WALL_RANGE_CM;

/// ADC full scale (12-bit)
const ADC_MAX: u32 = 4095;

/// Sensor gateway over the robot board peripherals
pub struct BoardSensors {
    cargo: Input<'static>,
    bumper: Input<'static>,
    adc: Adc<'static, Blocking>,
    line: Channel<'static>,
    wall_distance_cm: u16,
}

impl BoardSensors {
    pub fn new(
        cargo: Input<'static>,
        bumper: Input<'static>,
        adc: Adc<'static, Blocking>,
        line: Channel<'static>,
        wall_distance_cm: u16,
    ) -> Self {
        Self {
            cargo,
            bumper,
            adc,
            line,
            wall_distance_cm,
        }
    }
}

impl Sensors for BoardSensors {
    fn cargo_loaded(&mut self) -> bool {
        self.cargo.is_low()
    }

    fn wall_detected(&mut self) -> bool {
        WALL_RANGE_CM.load(Ordering::Relaxed) < self.wall_distance_cm
    }

    fn bumper_pushed(&mut self) -> bool {
        self.bumper.is_low()
    }

    fn reflectance(&mut self) -> u8 {
        // An ADC fault here means broken wiring; treat it as fatal
        let raw = unwrap!(self.adc.blocking_read(&mut self.line));
        (u32::from(raw) * 100 / ADC_MAX) as u8
    }
}
