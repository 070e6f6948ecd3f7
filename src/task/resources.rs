//! Hardware Resource Assignment
//!
//! The single place where physical pins are bound to logical functions.
//! Each group is handed to exactly one task, so no two tasks ever touch the
//! same peripheral.
//!
//! # Resource Groups
//! - IR sensors: ADC block and the three analog pins (front, left, right)
//! - Motors: one PWM slice (A = left wheel, B = right wheel) plus the
//!   sleep/direction pins of both DRV8838 drivers
//! - Buttons: the two user buttons, active low
//! - RGB LED: mode indicator

use assign_resources::assign_resources;
use embassy_rp::adc::InterruptHandler as AdcInterruptHandler;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals;

assign_resources! {
    /// Sharp-style analog IR range sensors
    ir_sensors: IrSensorResources {
        adc: ADC,
        front_pin: PIN_26,
        left_pin: PIN_27,
        right_pin: PIN_28,
    },
    /// DRV8838 wheel drivers
    motors: MotorResources {
        slice: PWM_SLICE7,
        left_pwm_pin: PIN_14,
        right_pwm_pin: PIN_15,
        left_sleep_pin: PIN_10,
        left_dir_pin: PIN_11,
        right_sleep_pin: PIN_12,
        right_dir_pin: PIN_13,
    },
    /// User button A
    button_a: ButtonAResources {
        pin: PIN_16,
    },
    /// User button B
    button_b: ButtonBResources {
        pin: PIN_17,
    },
    /// Mode indicator LED
    rgb_led: RgbLedResources {
        pwm_red: PWM_SLICE1,
        red_pin: PIN_18,
        pwm_green: PWM_SLICE2,
        green_pin: PIN_20,
        pwm_blue: PWM_SLICE3,
        blue_pin: PIN_22,
    },
}

bind_interrupts!(pub struct Irqs {
    ADC_IRQ_FIFO => AdcInterruptHandler;
});
