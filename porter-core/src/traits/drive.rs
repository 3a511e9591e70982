//! Differential drive trait

/// Two-wheel drive output.
///
/// Power values are signed percentages (-100..=100); positive drives the
/// wheel forward. Calls are synchronous and always succeed.
pub trait Drive {
    /// Set the power of both wheels
    fn drive(&mut self, left: i8, right: i8);

    /// Halt both wheels immediately, without coasting
    fn stop(&mut self);
}
