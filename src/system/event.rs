//! Button Events
//!
//! Button tasks post debounced presses here; the control loop is the single
//! consumer and drains the queue at a fixed point in every iteration. Posting
//! never waits, so an input handler always runs to completion.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver};

use crate::control::mode::Button;

/// Presses that can be pending before new ones are dropped
pub const EVENT_QUEUE_DEPTH: usize = 4;

/// Queue type for button presses
pub type EventChannel = Channel<CriticalSectionRawMutex, Button, EVENT_QUEUE_DEPTH>;

/// Consumer end handed to the control loop
pub type EventReceiver<'a> = Receiver<'a, CriticalSectionRawMutex, Button, EVENT_QUEUE_DEPTH>;

/// System-wide button queue
pub static EVENT_CHANNEL: EventChannel = Channel::new();

/// Event posting errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EventError {
    /// The consumer is behind; the press was dropped
    QueueFull(Button),
}

/// Posts a press to `channel` without waiting
pub fn post_to(channel: &EventChannel, button: Button) -> Result<(), EventError> {
    channel
        .try_send(button)
        .map_err(|_| EventError::QueueFull(button))
}

/// Posts a press to the system queue
pub fn post(button: Button) -> Result<(), EventError> {
    post_to(&EVENT_CHANNEL, button)
}

/// Consumer end of the system queue
pub fn receiver() -> EventReceiver<'static> {
    EVENT_CHANNEL.receiver()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presses_are_delivered_in_order() {
        let channel = EventChannel::new();
        post_to(&channel, Button::A).unwrap();
        post_to(&channel, Button::B).unwrap();
        let receiver = channel.receiver();
        assert_eq!(receiver.try_receive().ok(), Some(Button::A));
        assert_eq!(receiver.try_receive().ok(), Some(Button::B));
        assert!(receiver.try_receive().is_err());
    }

    #[test]
    fn full_queue_drops_without_blocking() {
        let channel = EventChannel::new();
        for _ in 0..EVENT_QUEUE_DEPTH {
            post_to(&channel, Button::A).unwrap();
        }
        assert_eq!(post_to(&channel, Button::B), Err(EventError::QueueFull(Button::B)));
    }
}
