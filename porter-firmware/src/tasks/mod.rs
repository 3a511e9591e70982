//! Embassy tasks
//!
//! One task per hardware concern plus the transport scheduler:
//! - `transport_task`: periodic tick driving the transport controller
//! - `range_task`: ultrasonic measurement loop
//! - `tone_task`: tone playback

pub mod range;
pub mod tone;
pub mod transport;

pub use range::range_task;
pub use tone::tone_task;
pub use transport::{transport_task, TICK_INTERVAL_MS};
