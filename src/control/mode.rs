//! Mode/Event Controller
//!
//! Owns the (mode, active) pair and applies button events to it. Button
//! edges are posted by the input tasks into a queue; the control loop drains
//! that queue at the top of each iteration and hands every event to
//! [`ModeController::handle`], so a mode change can never land halfway
//! through computing a motor command.

use crate::control::channel::Readings;
use crate::control::config::ButtonScheme;

/// Robot behavior selected by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SteeringMode {
    /// Keep a target object at the follow distance
    ObjectFollow,
    /// Trace a wall on the left side
    LeftWallFollow,
    /// Trace a wall on the right side
    RightWallFollow,
}

impl SteeringMode {
    pub const fn is_wall_follow(self) -> bool {
        matches!(self, SteeringMode::LeftWallFollow | SteeringMode::RightWallFollow)
    }
}

/// Complete steering state, read once per control iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlState {
    pub mode: SteeringMode,
    pub active: bool,
}

impl ControlState {
    /// Power-on state: ObjectFollow, not moving
    pub const INITIAL: ControlState = ControlState {
        mode: SteeringMode::ObjectFollow,
        active: false,
    };

    pub const fn new(mode: SteeringMode, active: bool) -> Self {
        Self { mode, active }
    }
}

impl Default for ControlState {
    fn default() -> Self {
        Self::INITIAL
    }
}

/// The two user buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Activation (or mode sequence, depending on the scheme)
    A,
    /// Object/wall mode switch
    B,
}

/// Applies button events to the steering state
#[derive(Debug, Clone)]
pub struct ModeController {
    state: ControlState,
    scheme: ButtonScheme,
}

impl ModeController {
    pub const fn new(scheme: ButtonScheme) -> Self {
        Self {
            state: ControlState::INITIAL,
            scheme,
        }
    }

    pub const fn state(&self) -> ControlState {
        self.state
    }

    pub const fn scheme(&self) -> ButtonScheme {
        self.scheme
    }

    /// Handles one debounced button press
    ///
    /// `latest` holds the most recent filtered readings; button B uses them to
    /// pick the wall side. Button B is ignored while inactive. Returns the new
    /// state when it changed.
    pub fn handle(&mut self, button: Button, latest: &Readings) -> Option<ControlState> {
        let previous = self.state;
        self.state = match button {
            Button::A => self.on_button_a(),
            Button::B => self.on_button_b(latest),
        };
        (self.state != previous).then_some(self.state)
    }

    fn on_button_a(&self) -> ControlState {
        let ControlState { mode, active } = self.state;
        match self.scheme {
            ButtonScheme::ActiveToggle => ControlState::new(mode, !active),
            ButtonScheme::ModeCycle => match (active, mode) {
                (false, _) => ControlState::new(SteeringMode::ObjectFollow, true),
                (true, SteeringMode::ObjectFollow) => {
                    ControlState::new(SteeringMode::LeftWallFollow, true)
                }
                (true, SteeringMode::LeftWallFollow) => {
                    ControlState::new(SteeringMode::RightWallFollow, true)
                }
                (true, SteeringMode::RightWallFollow) => ControlState::INITIAL,
            },
        }
    }

    fn on_button_b(&self, latest: &Readings) -> ControlState {
        if !self.state.active {
            return self.state;
        }
        let mode = match self.state.mode {
            // The wall is taken to be on the side with more open space,
            // away from the object currently being tracked.
            SteeringMode::ObjectFollow if latest.left > latest.right => {
                SteeringMode::LeftWallFollow
            }
            SteeringMode::ObjectFollow => SteeringMode::RightWallFollow,
            SteeringMode::LeftWallFollow | SteeringMode::RightWallFollow => {
                SteeringMode::ObjectFollow
            }
        };
        ControlState::new(mode, self.state.active)
    }
}
