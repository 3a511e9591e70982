//! Configuration type definitions
//!
//! Four numeric thresholds cover the entire configuration surface.
//! They are set when the controller is built and never change at runtime.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Loading window before the cycle gives up and signals a missed pickup (ms)
pub const LOADING_TIMEOUT_MS: u32 = 10_000;

/// Ultrasonic range below which the delivery wall counts as reached (cm)
pub const WALL_DISTANCE_CM: u16 = 10;

/// Reflectance below which the line sensor is considered over the line (%)
pub const LINE_THRESHOLD: u8 = 20;

/// Wheel power used while tracing the line (%)
pub const DRIVE_POWER: i8 = 20;

/// Transport cycle thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TransportConfig {
    /// Loading timeout in milliseconds
    pub loading_timeout_ms: u32,
    /// Wall detection distance in centimeters
    pub wall_distance_cm: u16,
    /// Line reflectance threshold (percent)
    pub line_threshold: u8,
    /// Drive power (percent)
    pub drive_power: i8,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            loading_timeout_ms: LOADING_TIMEOUT_MS,
            wall_distance_cm: WALL_DISTANCE_CM,
            line_threshold: LINE_THRESHOLD,
            drive_power: DRIVE_POWER,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let config = TransportConfig::default();
        assert_eq!(config.loading_timeout_ms, 10_000);
        assert_eq!(config.wall_distance_cm, 10);
        assert_eq!(config.line_threshold, 20);
        assert_eq!(config.drive_power, 20);
    }
}
