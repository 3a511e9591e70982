//! Inter-task communication
//!
//! Static signals and atomics shared between Embassy tasks. The transport
//! task only ever reads/signals these synchronously, so the core stays
//! non-blocking.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use portable_atomic::AtomicU16;

use porter_core::traits::Tone;

/// Tone cue requested by the transport controller (latest wins)
pub static TONE_CMD: Signal<CriticalSectionRawMutex, Tone> = Signal::new();

/// Latest ultrasonic range in centimeters, published by the range task.
/// `u16::MAX` means no echo (nothing in range).
pub static WALL_RANGE_CM: AtomicU16 = AtomicU16::new(u16::MAX);
