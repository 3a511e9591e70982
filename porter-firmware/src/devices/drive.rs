//! Differential drive over two PWM channels
//!
//! Each wheel is an H-bridge driven in sign-magnitude mode: one PWM input
//! for power, one GPIO for direction. Power commands map straight onto
//! duty cycle; there is no ramping, the motors are small enough to take
//! step changes.

use embassy_rp::gpio::{Level, Output};
use embassy_rp::pwm::{Config as PwmConfig, Pwm};

use porter_core::traits::Drive;

/// PWM wrap value: 125 MHz / 5000 = 25 kHz, above audible range
pub const PWM_TOP: u16 = 5_000;

/// Two-wheel drive gateway
pub struct WheelPair {
    left_pwm: Pwm<'static>,
    left_cfg: PwmConfig,
    left_dir: Output<'static>,
    right_pwm: Pwm<'static>,
    right_cfg: PwmConfig,
    right_dir: Output<'static>,
}

impl WheelPair {
    /// Take ownership of both PWM channels and direction pins.
    ///
    /// The PWM channels must have been created with `top = PWM_TOP`.
    pub fn new(
        left_pwm: Pwm<'static>,
        left_dir: Output<'static>,
        right_pwm: Pwm<'static>,
        right_dir: Output<'static>,
    ) -> Self {
        let mut cfg = PwmConfig::default();
        cfg.top = PWM_TOP;
        cfg.compare_a = 0;

        let mut pair = Self {
            left_pwm,
            left_cfg: cfg.clone(),
            left_dir,
            right_pwm,
            right_cfg: cfg,
            right_dir,
        };
        pair.stop();
        pair
    }

    fn apply(pwm: &mut Pwm<'static>, cfg: &mut PwmConfig, dir: &mut Output<'static>, power: i8) {
        let power = power.clamp(-100, 100);
        dir.set_level(if power >= 0 { Level::Low } else { Level::High });
        cfg.compare_a = (u32::from(power.unsigned_abs()) * u32::from(PWM_TOP) / 100) as u16;
        pwm.set_config(cfg);
    }
}

impl Drive for WheelPair {
    fn drive(&mut self, left: i8, right: i8) {
        Self::apply(&mut self.left_pwm, &mut self.left_cfg, &mut self.left_dir, left);
        Self::apply(
            &mut self.right_pwm,
            &mut self.right_cfg,
            &mut self.right_dir,
            right,
        );
    }

    fn stop(&mut self) {
        // Zero duty with the direction input held low brakes the bridge
        // rather than letting the wheels coast
        self.drive(0, 0);
    }
}
