//! State machine definition
//!
//! All drive, timer, and tone behavior is a function of the current state
//! and the sensors polled during a tick.

/// Transport cycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Waiting at the depot for cargo to be placed on the carrier
    WaitForLoading,
    /// Following the line toward the delivery wall
    Transporting,
    /// At the wall, waiting for cargo to be taken off
    WaitForUnloading,
    /// Following the line back to the depot
    Returning,
    /// Depot bumper reached; cycle complete
    Arrived,
    /// Loading window elapsed without cargo
    TimedOut,
}

impl State {
    /// Check if this state drives the wheels (runs the line tracer)
    pub fn drive_allowed(&self) -> bool {
        matches!(self, State::Transporting | State::Returning)
    }

    /// Check if this is the terminal state (no transitions defined)
    pub fn is_terminal(&self) -> bool {
        matches!(self, State::Arrived)
    }
}

/// What one tick did to the machine
///
/// Entry actions run on the first tick inside a state; exit actions run on
/// the tick whose guard fired, before the tick returns. A state that is
/// entered and left within the same tick (`TimedOut`) reports `Exited`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Transition {
    /// No guard fired and no entry action was due
    Stayed,
    /// The tick ran the entry action of this (current) state
    Entered(State),
    /// A guard fired: the exit action of this (previous) state ran
    Exited(State),
}
