//! Configuration types for the transport cycle
//!
//! The whole configuration surface is a handful of numeric thresholds,
//! fixed at initialization.

pub mod types;

pub use types::{
    TransportConfig, DRIVE_POWER, LINE_THRESHOLD, LOADING_TIMEOUT_MS, WALL_DISTANCE_CM,
};
