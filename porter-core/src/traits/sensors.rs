//! Sensor gateway trait

/// Polled sensor inputs for the transport cycle.
///
/// Every call reads the hardware synchronously and returns the current
/// value; there is no buffering and no failure path. Methods take
/// `&mut self` because peripheral reads typically require mutable access.
pub trait Sensors {
    /// True while cargo rests on the carrier touch sensor
    fn cargo_loaded(&mut self) -> bool;

    /// True while the ultrasonic range to the wall is below the configured
    /// detection distance
    fn wall_detected(&mut self) -> bool;

    /// True while the front bumper is pressed
    fn bumper_pushed(&mut self) -> bool;

    /// Reflectance from the line sensor as a percentage (0 = dark)
    fn reflectance(&mut self) -> u8;
}
