//! Porter - Line-Following Transport Robot Firmware
//!
//! Main firmware binary for RP2040-based carrier robots. Wires the
//! board peripherals to the porter-core gateways and spawns the
//! transport, range, and tone tasks.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel};
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use {defmt_rtt as _, panic_probe as _};

use porter_core::config::WALL_DISTANCE_CM;

use crate::devices::{BoardSensors, ToneGateway, WheelPair, PWM_TOP};

mod channels;
mod devices;
mod tasks;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Porter firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Drive: one H-bridge channel per wheel, sign-magnitude
    // Board map: left PWM=GPIO2 dir=GPIO3, right PWM=GPIO4 dir=GPIO5
    let mut pwm_config = PwmConfig::default();
    pwm_config.top = PWM_TOP;
    pwm_config.compare_a = 0;
    let left_pwm = Pwm::new_output_a(p.PWM_SLICE1, p.PIN_2, pwm_config.clone());
    let right_pwm = Pwm::new_output_a(p.PWM_SLICE2, p.PIN_4, pwm_config);
    let drive = WheelPair::new(
        left_pwm,
        Output::new(p.PIN_3, Level::Low),
        right_pwm,
        Output::new(p.PIN_5, Level::Low),
    );

    // Ultrasonic ranger: trigger=GPIO6, echo=GPIO7
    let trigger = Output::new(p.PIN_6, Level::Low);
    let echo = Input::new(p.PIN_7, Pull::Down);

    // Piezo buzzer: GPIO8
    let buzzer = Output::new(p.PIN_8, Level::Low);

    // Touch sensors, active low: cargo=GPIO10, bumper=GPIO11
    let cargo = Input::new(p.PIN_10, Pull::Up);
    let bumper = Input::new(p.PIN_11, Pull::Up);

    // Line reflectance sensor on ADC0 (GPIO26)
    let adc = Adc::new_blocking(p.ADC, embassy_rp::adc::Config::default());
    let line = Channel::new_pin(p.PIN_26, Pull::None);

    let sensors = BoardSensors::new(cargo, bumper, adc, line, WALL_DISTANCE_CM);

    info!("Devices initialized");

    // Spawn tasks
    spawner.spawn(tasks::range_task(trigger, echo)).unwrap();
    spawner.spawn(tasks::tone_task(buzzer)).unwrap();
    spawner
        .spawn(tasks::transport_task(sensors, drive, ToneGateway))
        .unwrap();

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
