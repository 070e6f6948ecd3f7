//! User button handling
//!
//! Turns debounced presses of buttons A and B into events on the control
//! loop's queue. The buttons pull the pin low when pressed.

use defmt::{debug, warn};
use embassy_rp::gpio::{Input, Pull};
use embassy_time::{Duration, Timer};
use romi_follower::control::mode::Button;
use romi_follower::system::event;

use crate::task::resources::{ButtonAResources, ButtonBResources};

/// Button debounce delay
const DEBOUNCE_DURATION: Duration = Duration::from_millis(20);

/// Button A handler
#[embassy_executor::task]
pub async fn button_a_handle(r: ButtonAResources) {
    let mut btn = Input::new(r.pin, Pull::Up);
    handle_button(&mut btn, Button::A).await;
}

/// Button B handler
#[embassy_executor::task]
pub async fn button_b_handle(r: ButtonBResources) {
    let mut btn = Input::new(r.pin, Pull::Up);
    handle_button(&mut btn, Button::B).await;
}

/// Posts one event per press
///
/// An edge only counts if the pin is still low once the debounce window has
/// passed. Posting never waits; a press that finds the queue full is dropped.
async fn handle_button(button: &mut Input<'static>, id: Button) {
    loop {
        button.wait_for_falling_edge().await;
        Timer::after(DEBOUNCE_DURATION).await;
        if button.is_high() {
            continue;
        }

        match event::post(id) {
            Ok(()) => debug!("button {} pressed", id),
            Err(e) => warn!("press dropped: {}", e),
        }

        // ignore contact bounce on release
        button.wait_for_high().await;
        Timer::after(DEBOUNCE_DURATION).await;
    }
}
