//! Transport scheduler task
//!
//! Owns the transport controller and invokes it at a fixed period. The
//! controller receives the monotonic time with every tick and never reads
//! a clock itself.

use defmt::*;
use embassy_time::{Duration, Instant, Ticker};

use porter_core::config::TransportConfig;
use porter_core::state::Transition;
use porter_core::transport::Transport;

use crate::devices::{BoardSensors, ToneGateway, WheelPair};

/// Tick interval in milliseconds
pub const TICK_INTERVAL_MS: u64 = 50;

/// Transport task - runs the cycle state machine once per tick
#[embassy_executor::task]
pub async fn transport_task(sensors: BoardSensors, drive: WheelPair, sounder: ToneGateway) {
    info!("Transport task started");

    let mut transport = Transport::new(TransportConfig::default(), sensors, drive, sounder);

    let mut ticker = Ticker::every(Duration::from_millis(TICK_INTERVAL_MS));
    let start = Instant::now();

    loop {
        ticker.next().await;

        let now_ms = start.elapsed().as_millis();

        match transport.tick(now_ms) {
            Transition::Exited(from) => {
                debug!("{:?} -> {:?}", from, transport.state());
                if transport.state().is_terminal() {
                    info!("Transport cycle complete");
                }
            }
            Transition::Entered(state) => trace!("Entered {:?}", state),
            Transition::Stayed => {}
        }
    }
}
