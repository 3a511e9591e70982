//! Transport cycle controller
//!
//! Drives the load, deliver, unload, return cycle. The host scheduler
//! calls [`Transport::tick`] once per period; each tick runs the current
//! state's entry, do, transition and exit phases in that order and reports
//! what happened. The controller owns its gateways and polls them itself;
//! it never blocks and never calls back into the scheduler.

use crate::config::TransportConfig;
use crate::state::{State, Transition};
use crate::timer::Countdown;
use crate::tracer::LineTracer;
use crate::traits::{Drive, Sensors, Sounder, Tone};

/// Cue played when the wall or the depot bumper is reached
pub const ARRIVAL_TONE: Tone = Tone::new(880, 500);

/// Cue played when the loading window elapses without cargo
pub const CONFIRMATION_TONE: Tone = Tone::new(440, 200);

/// Transport cycle controller
///
/// One value per robot. The surrounding system must guarantee at most one
/// `tick` in flight at a time; single ownership of this value by one task
/// provides that without locking.
pub struct Transport<S, D, B> {
    config: TransportConfig,
    tracer: LineTracer,
    timer: Countdown,
    state: State,
    /// Set by a transition; makes the next tick run the entry action
    pending_entry: bool,
    sensors: S,
    drive: D,
    sounder: B,
}

impl<S: Sensors, D: Drive, B: Sounder> Transport<S, D, B> {
    /// Create a controller in `WaitForLoading`, entry action pending
    pub fn new(config: TransportConfig, sensors: S, drive: D, sounder: B) -> Self {
        Self {
            tracer: LineTracer::new(config.line_threshold, config.drive_power),
            timer: Countdown::new(),
            state: State::WaitForLoading,
            pending_entry: true,
            config,
            sensors,
            drive,
            sounder,
        }
    }

    /// Get the current state
    pub fn state(&self) -> State {
        self.state
    }

    /// Run one scheduler tick
    ///
    /// `now_ms` is the host's monotonic clock in milliseconds. The exit
    /// action of a state runs on the same tick its guard fires; the entry
    /// action of the new state runs on the *next* tick, so there is always
    /// exactly one tick of latency between a transition and the entry
    /// action it arms.
    pub fn tick(&mut self, now_ms: u64) -> Transition {
        let mut outcome = Transition::Stayed;

        if self.pending_entry {
            self.pending_entry = false;
            self.run_entry(now_ms);
            outcome = Transition::Entered(self.state);
        }

        self.run_do();

        if let Some(next) = self.next_state(now_ms) {
            let exited = self.state;
            self.run_exit();
            self.state = next;
            self.pending_entry = true;
            outcome = Transition::Exited(exited);
        }

        outcome
    }

    /// One-time entry action of the current state
    fn run_entry(&mut self, now_ms: u64) {
        match self.state {
            State::WaitForLoading => self.timer.start(now_ms, self.config.loading_timeout_ms),
            State::TimedOut => self.sounder.play_tone(CONFIRMATION_TONE),
            _ => {}
        }
    }

    /// Per-tick action of the current state
    fn run_do(&mut self) {
        if self.state.drive_allowed() {
            self.tracer.run(&mut self.sensors, &mut self.drive);
        }
    }

    /// Evaluate the current state's transition guards
    ///
    /// Every guard is polled unconditionally each tick and a later guard
    /// overwrites an earlier one. In `WaitForLoading` the cargo guard is
    /// evaluated before the timeout guard, so a tick on which cargo arrives
    /// exactly as the loading window elapses goes to `TimedOut`. The
    /// ordering is deliberate and pinned by a test; reorder the assignments
    /// to change the priority.
    fn next_state(&mut self, now_ms: u64) -> Option<State> {
        match self.state {
            State::WaitForLoading => {
                let mut next = None;
                if self.sensors.cargo_loaded() {
                    next = Some(State::Transporting);
                }
                if self.timer.is_timed_out(now_ms) {
                    next = Some(State::TimedOut);
                }
                next
            }
            State::TimedOut => Some(State::WaitForLoading),
            State::Transporting => self
                .sensors
                .wall_detected()
                .then_some(State::WaitForUnloading),
            State::WaitForUnloading => {
                (!self.sensors.cargo_loaded()).then_some(State::Returning)
            }
            State::Returning => self.sensors.bumper_pushed().then_some(State::Arrived),
            State::Arrived => None,
        }
    }

    /// Exit action of the state being left, run on the transition tick
    fn run_exit(&mut self) {
        match self.state {
            State::WaitForLoading => self.timer.stop(),
            State::Transporting | State::Returning => {
                self.sounder.play_tone(ARRIVAL_TONE);
                self.tracer.stop(&mut self.drive);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Vec;

    #[derive(Default)]
    struct FakeSensors {
        cargo: bool,
        wall: bool,
        bumper: bool,
        reflectance: u8,
    }

    impl Sensors for FakeSensors {
        fn cargo_loaded(&mut self) -> bool {
            self.cargo
        }
        fn wall_detected(&mut self) -> bool {
            self.wall
        }
        fn bumper_pushed(&mut self) -> bool {
            self.bumper
        }
        fn reflectance(&mut self) -> u8 {
            self.reflectance
        }
    }

    #[derive(Default)]
    struct LogDrive {
        commands: Vec<(i8, i8), 64>,
        stops: u32,
    }

    impl Drive for LogDrive {
        fn drive(&mut self, left: i8, right: i8) {
            let _ = self.commands.push((left, right));
        }
        fn stop(&mut self) {
            self.stops += 1;
        }
    }

    #[derive(Default)]
    struct LogSounder {
        tones: Vec<Tone, 8>,
    }

    impl Sounder for LogSounder {
        fn play_tone(&mut self, tone: Tone) {
            let _ = self.tones.push(tone);
        }
    }

    fn transport() -> Transport<FakeSensors, LogDrive, LogSounder> {
        Transport::new(
            TransportConfig::default(),
            FakeSensors::default(),
            LogDrive::default(),
            LogSounder::default(),
        )
    }

    /// Tick through loading so the machine sits in Transporting with its
    /// entry action consumed. Returns the timestamp of the last tick.
    fn into_transporting(t: &mut Transport<FakeSensors, LogDrive, LogSounder>) -> u64 {
        assert_eq!(t.tick(0), Transition::Entered(State::WaitForLoading));
        t.sensors.cargo = true;
        assert_eq!(t.tick(50), Transition::Exited(State::WaitForLoading));
        assert_eq!(t.tick(100), Transition::Entered(State::Transporting));
        100
    }

    #[test]
    fn test_starts_waiting_for_cargo() {
        let mut t = transport();
        assert_eq!(t.state(), State::WaitForLoading);

        // First tick runs the entry action: the loading timer is armed
        assert_eq!(t.tick(0), Transition::Entered(State::WaitForLoading));
        assert!(t.timer.is_active());
    }

    #[test]
    fn test_cargo_starts_transport() {
        let mut t = transport();
        t.tick(0);

        t.sensors.cargo = true;
        assert_eq!(t.tick(50), Transition::Exited(State::WaitForLoading));
        assert_eq!(t.state(), State::Transporting);

        // Exit action stopped the loading timer on the same tick
        assert!(!t.timer.is_active());
    }

    #[test]
    fn test_entry_runs_tick_after_transition() {
        let mut t = transport();
        t.tick(0);
        t.sensors.cargo = true;
        t.tick(50);

        // The new state's entry action runs one tick later, never the same tick
        assert_eq!(t.tick(100), Transition::Entered(State::Transporting));
    }

    #[test]
    fn test_loading_window_times_out() {
        let mut t = transport();
        t.tick(0);

        assert_eq!(t.tick(9_999), Transition::Stayed);
        assert_eq!(t.tick(10_000), Transition::Exited(State::WaitForLoading));
        assert_eq!(t.state(), State::TimedOut);

        // No tone yet: the confirmation cue is TimedOut's entry action
        assert!(t.sounder.tones.is_empty());
    }

    #[test]
    fn test_timed_out_bounces_back_and_rearms() {
        let mut t = transport();
        t.tick(0);
        t.tick(10_000);

        // Next tick plays the confirmation cue and immediately leaves again:
        // the unconditional guard fires on the same tick as the entry action
        assert_eq!(t.tick(10_050), Transition::Exited(State::TimedOut));
        assert_eq!(t.sounder.tones.as_slice(), &[CONFIRMATION_TONE]);
        assert_eq!(t.state(), State::WaitForLoading);

        // The following tick re-arms a fresh loading window
        assert_eq!(t.tick(10_100), Transition::Entered(State::WaitForLoading));
        assert_eq!(t.tick(20_099), Transition::Stayed);
        assert_eq!(t.tick(20_100), Transition::Exited(State::WaitForLoading));
        assert_eq!(t.state(), State::TimedOut);
    }

    #[test]
    fn test_simultaneous_cargo_and_timeout_prefers_timeout() {
        // Guards are not exclusive: both are polled and the later assignment
        // wins, so a load on the exact timeout tick is redirected to TimedOut
        let mut t = transport();
        t.tick(0);

        t.sensors.cargo = true;
        assert_eq!(t.tick(10_000), Transition::Exited(State::WaitForLoading));
        assert_eq!(t.state(), State::TimedOut);
    }

    #[test]
    fn test_loading_just_before_timeout_transports() {
        // Scenario A: cargo lands on the last tick inside the window
        let mut t = transport();
        t.tick(0);
        assert_eq!(t.tick(5_000), Transition::Stayed);

        t.sensors.cargo = true;
        assert_eq!(t.tick(9_999), Transition::Exited(State::WaitForLoading));
        assert_eq!(t.state(), State::Transporting);
    }

    #[test]
    fn test_transporting_traces_the_line() {
        let mut t = transport();
        let mut now = into_transporting(&mut t);
        t.drive.commands.clear();

        t.sensors.reflectance = 10;
        for _ in 0..4 {
            now += 50;
            assert_eq!(t.tick(now), Transition::Stayed);
        }
        // Below threshold the tracer only ever pivots left
        assert_eq!(t.drive.commands.as_slice(), &[(0, 20); 4]);

        t.sensors.reflectance = 60;
        t.tick(now + 50);
        assert_eq!(t.drive.commands.last(), Some(&(20, 0)));
    }

    #[test]
    fn test_wall_ends_transport_same_tick() {
        let mut t = transport();
        let now = into_transporting(&mut t);

        t.sensors.wall = true;
        assert_eq!(t.tick(now + 50), Transition::Exited(State::Transporting));

        // Exit action ran before the tick returned: arrival cue, then brake
        assert_eq!(t.sounder.tones.as_slice(), &[ARRIVAL_TONE]);
        assert_eq!(t.drive.stops, 1);
        assert_eq!(t.state(), State::WaitForUnloading);
    }

    #[test]
    fn test_unloading_waits_for_cargo_removal() {
        let mut t = transport();
        let now = into_transporting(&mut t);
        t.sensors.wall = true;
        t.tick(now + 50);
        assert_eq!(
            t.tick(now + 100),
            Transition::Entered(State::WaitForUnloading)
        );

        // Cargo still on the carrier: nothing happens
        assert_eq!(t.tick(now + 150), Transition::Stayed);

        t.sensors.cargo = false;
        assert_eq!(
            t.tick(now + 200),
            Transition::Exited(State::WaitForUnloading)
        );
        assert_eq!(t.state(), State::Returning);
    }

    #[test]
    fn test_bumper_ends_return_same_tick() {
        let mut t = transport();
        let mut now = into_transporting(&mut t);
        t.sensors.wall = true;
        now += 50;
        t.tick(now);
        t.sensors.wall = false;
        t.sensors.cargo = false;
        now += 50;
        t.tick(now); // entry of WaitForUnloading + cargo-removed guard fires
        now += 50;
        t.tick(now); // entry of Returning
        assert_eq!(t.state(), State::Returning);

        t.sensors.bumper = true;
        now += 50;
        assert_eq!(t.tick(now), Transition::Exited(State::Returning));
        assert_eq!(t.sounder.tones.last(), Some(&ARRIVAL_TONE));
        assert_eq!(t.drive.stops, 2);
        assert_eq!(t.state(), State::Arrived);
    }

    #[test]
    fn test_arrived_is_idempotent() {
        let mut t = transport();
        let mut now = into_transporting(&mut t);
        t.sensors.wall = true;
        now += 50;
        t.tick(now);
        t.sensors.cargo = false;
        now += 50;
        t.tick(now);
        now += 50;
        t.tick(now);
        t.sensors.bumper = true;
        now += 50;
        t.tick(now);
        assert_eq!(t.state(), State::Arrived);

        // First tick in Arrived consumes the (empty) entry action
        now += 50;
        assert_eq!(t.tick(now), Transition::Entered(State::Arrived));

        let commands = t.drive.commands.len();
        let stops = t.drive.stops;
        let tones = t.sounder.tones.len();
        for _ in 0..10 {
            now += 50;
            assert_eq!(t.tick(now), Transition::Stayed);
        }
        assert_eq!(t.state(), State::Arrived);
        assert_eq!(t.drive.commands.len(), commands);
        assert_eq!(t.drive.stops, stops);
        assert_eq!(t.sounder.tones.len(), tones);
        assert!(!t.timer.is_active());
    }

    #[test]
    fn test_full_cycle() {
        let mut t = transport();
        t.sensors.reflectance = 10;

        t.tick(0);
        t.sensors.cargo = true;
        t.tick(9_999); // Scenario A: loaded just inside the window
        assert_eq!(t.state(), State::Transporting);

        t.tick(10_050);
        t.tick(10_100);
        t.sensors.wall = true;
        t.tick(10_150);
        assert_eq!(t.state(), State::WaitForUnloading);

        t.sensors.wall = false;
        t.tick(10_200);
        t.sensors.cargo = false;
        t.tick(10_250);
        assert_eq!(t.state(), State::Returning);

        t.tick(10_300);
        t.sensors.bumper = true;
        t.tick(10_350);
        assert_eq!(t.state(), State::Arrived);

        // One arrival cue per leg, and the drive was braked after each
        assert_eq!(t.sounder.tones.as_slice(), &[ARRIVAL_TONE, ARRIVAL_TONE]);
        assert_eq!(t.drive.stops, 2);
    }
}
