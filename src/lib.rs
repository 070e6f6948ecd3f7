//! Romi follower core
//!
//! Sensor-to-actuation logic for a small wheeled robot that follows objects or
//! walls using three analog IR range sensors. Everything in here is hardware
//! agnostic: the ADC and the motor driver are reached through the
//! [`control::sampler::Sampler`] and [`control::motor::Actuator`] capabilities,
//! which the RP2350 firmware binary implements and the tests fake.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

/// Sensing, filtering, steering and actuation
pub mod control;
/// State and events shared between the control loop and other tasks
pub mod system;
