//! Line tracer policy
//!
//! Stateless edge follower: when the reflectance reading drops below the
//! threshold the sensor is over the line and the robot steers left; when it
//! rises above, the robot has drifted onto the line and steers right. The
//! robot oscillates along the line edge.

use crate::traits::{Drive, Sensors};

/// Line edge follower
#[derive(Debug, Clone, Copy)]
pub struct LineTracer {
    /// Reflectance threshold (percent)
    threshold: u8,
    /// Wheel power for the driven side (percent)
    power: i8,
}

impl LineTracer {
    /// Create a tracer with the given threshold and drive power
    pub const fn new(threshold: u8, power: i8) -> Self {
        Self { threshold, power }
    }

    /// Steer one step along the line edge
    pub fn run<S: Sensors, D: Drive>(&self, sensors: &mut S, drive: &mut D) {
        if sensors.reflectance() < self.threshold {
            // Over the line: pivot left
            drive.drive(0, self.power);
        } else {
            // Off the line: pivot right
            drive.drive(self.power, 0);
        }
    }

    /// Halt the drive
    pub fn stop<D: Drive>(&self, drive: &mut D) {
        drive.stop();
    }
}
