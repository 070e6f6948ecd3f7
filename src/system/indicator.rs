//! System Indicator Module
//!
//! Maps the control state to the color shown on the RGB indicator. The
//! indicator only ever reports mode, never faults, and never reaches into
//! motor state.

use crate::control::mode::{ControlState, SteeringMode};

/// Colors the indicator can show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IndicatorColor {
    Off,
    Red,
    Green,
    Blue,
}

impl IndicatorColor {
    /// Steady color for a state: red while inactive, blue when following an
    /// object, green when tracing a wall
    pub const fn for_state(state: ControlState) -> Self {
        if !state.active {
            return IndicatorColor::Red;
        }
        match state.mode {
            SteeringMode::ObjectFollow => IndicatorColor::Blue,
            SteeringMode::LeftWallFollow | SteeringMode::RightWallFollow => IndicatorColor::Green,
        }
    }

    /// Duty per LED die as (red, green, blue), each 0..=100 percent of `brightness`
    pub const fn channels(self, brightness: u8) -> (u8, u8, u8) {
        match self {
            IndicatorColor::Off => (0, 0, 0),
            IndicatorColor::Red => (brightness, 0, 0),
            IndicatorColor::Green => (0, brightness, 0),
            IndicatorColor::Blue => (0, 0, brightness),
        }
    }
}

/// Number of on/off toggles shown to acknowledge a state change
pub const AFFIRM_TOGGLES: usize = 6;

/// Color for each step of the acknowledgement blink, ending on the steady color
pub fn affirm_sequence(state: ControlState) -> impl Iterator<Item = IndicatorColor> {
    let steady = IndicatorColor::for_state(state);
    (0..AFFIRM_TOGGLES).map(move |step| {
        if step % 2 == 0 {
            IndicatorColor::Off
        } else {
            steady
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inactive_is_red_in_every_mode() {
        for mode in [
            SteeringMode::ObjectFollow,
            SteeringMode::LeftWallFollow,
            SteeringMode::RightWallFollow,
        ] {
            assert_eq!(
                IndicatorColor::for_state(ControlState::new(mode, false)),
                IndicatorColor::Red
            );
        }
    }

    #[test]
    fn active_modes_have_their_own_colors() {
        let color = |mode| IndicatorColor::for_state(ControlState::new(mode, true));
        assert_eq!(color(SteeringMode::ObjectFollow), IndicatorColor::Blue);
        assert_eq!(color(SteeringMode::LeftWallFollow), IndicatorColor::Green);
        assert_eq!(color(SteeringMode::RightWallFollow), IndicatorColor::Green);
    }

    #[test]
    fn affirm_blink_ends_on_steady_color() {
        let state = ControlState::new(SteeringMode::LeftWallFollow, true);
        let steps: Vec<_> = affirm_sequence(state).collect();
        assert_eq!(steps.len(), AFFIRM_TOGGLES);
        assert_eq!(steps.first(), Some(&IndicatorColor::Off));
        assert_eq!(steps.last(), Some(&IndicatorColor::Green));
    }

    #[test]
    fn channels_light_a_single_die() {
        assert_eq!(IndicatorColor::Blue.channels(20), (0, 0, 20));
        assert_eq!(IndicatorColor::Off.channels(20), (0, 0, 0));
    }
}
