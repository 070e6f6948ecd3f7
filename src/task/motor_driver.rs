//! Motor Driver
//!
//! Drives the two Romi wheels through one DRV8838 driver each.
//!
//! # Hardware Configuration
//!
//! Both PWM inputs share one slice: channel A is the left wheel, channel B
//! the right wheel. Each driver additionally has:
//! - a sleep pin: high = driver awake, low = outputs off (wheel coasts)
//! - a direction pin: low = forward, high = reverse
//!
//! # PWM
//! ```text
//! top     = PWM_PERIOD - 1          (10000 ticks per period)
//! compare = DutyPreset::ticks()     (1 = stopped .. 9800 = full speed)
//! ```
//! At the default 150MHz system clock and a divider of 1 this gives 15kHz,
//! above the audible range.

use embassy_rp::gpio::{Level, Output};
use embassy_rp::pwm::{self, Pwm};
use romi_follower::control::motor::{
    Actuator, Direction, DutyPreset, Side, WheelSense, PWM_PERIOD,
};

use crate::task::resources::MotorResources;

/// Sleep and direction pins of one DRV8838
struct Wheel {
    sleep: Output<'static>,
    dir: Output<'static>,
}

impl Wheel {
    fn set_sense(&mut self, sense: WheelSense) {
        match sense {
            WheelSense::Forward => self.dir.set_low(),
            WheelSense::Reverse => self.dir.set_high(),
        }
    }
}

/// Hardware [`Actuator`] for the Romi chassis
pub struct RomiMotors {
    pwm: Pwm<'static>,
    config: pwm::Config,
    left: Wheel,
    right: Wheel,
}

impl RomiMotors {
    /// Takes the motor resources; both drivers start asleep at the stop duty
    pub fn new(r: MotorResources) -> Self {
        let mut config = pwm::Config::default();
        config.top = PWM_PERIOD - 1;
        config.compare_a = DutyPreset::Stop.ticks();
        config.compare_b = DutyPreset::Stop.ticks();

        let pwm = Pwm::new_output_ab(r.slice, r.left_pwm_pin, r.right_pwm_pin, config.clone());

        Self {
            pwm,
            config,
            left: Wheel {
                sleep: Output::new(r.left_sleep_pin, Level::Low),
                dir: Output::new(r.left_dir_pin, Level::Low),
            },
            right: Wheel {
                sleep: Output::new(r.right_sleep_pin, Level::Low),
                dir: Output::new(r.right_dir_pin, Level::Low),
            },
        }
    }

    fn wheel(&mut self, side: Side) -> &mut Wheel {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

impl Actuator for RomiMotors {
    fn set_direction(&mut self, direction: Direction) {
        let (left, right) = direction.wheel_senses();
        self.left.set_sense(left);
        self.right.set_sense(right);
    }

    fn set_duty_cycle(&mut self, side: Side, duty: DutyPreset) {
        match side {
            Side::Left => self.config.compare_a = duty.ticks(),
            Side::Right => self.config.compare_b = duty.ticks(),
        }
        self.pwm.set_config(&self.config);
    }

    fn enable(&mut self, side: Side) {
        self.wheel(side).sleep.set_high();
    }

    fn disable(&mut self, side: Side) {
        self.wheel(side).sleep.set_low();
    }
}
