//! Robot firmware entry point
//!
//! Initializes the RP2350, hands each task its hardware and spawns them.

#![no_std]
#![no_main]

use crate::task::{
    button_handle::{button_a_handle, button_b_handle},
    control::control,
    rgb_led_indicate::rgb_led_indicate,
};
use defmt::info;
use embassy_executor::Spawner;
use embassy_rp::block::ImageDef;
use embassy_rp::config::Config;
use task::resources::{
    AssignedResources, ButtonAResources, ButtonBResources, IrSensorResources, MotorResources,
    RgbLedResources,
};
use {defmt_rtt as _, panic_probe as _};

/// Firmware image type for bootloader
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = ImageDef::secure_exe();

/// Task implementations
mod task;

/// Firmware entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Config::default());
    info!("romi-follower starting");

    // Split the resources into separate groups, one per task.
    let r = split_resources!(p);

    // Indicator and buttons first so no early press or state change is missed
    spawner.spawn(rgb_led_indicate(r.rgb_led)).unwrap();
    spawner.spawn(button_a_handle(r.button_a)).unwrap();
    spawner.spawn(button_b_handle(r.button_b)).unwrap();
    spawner.spawn(control(r.ir_sensors, r.motors)).unwrap();
}
