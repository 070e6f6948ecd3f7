//! Steering Policy
//!
//! A pure function of (mode, active, filtered readings) to a motor command.
//! It holds no state of its own and never changes the mode.
//!
//! # Rules
//!
//! Inactive: stop.
//!
//! ObjectFollow with the front reading above Follow + margin: back away.
//!
//! Any channel above its Close threshold: stop.
//!
//! ObjectFollow:
//! - front below Follow: creep forward at follow speed, running a wheel only
//!   while its own side is below Follow, so a nearer object on one side
//!   stalls that wheel and turns the chassis toward it
//! - otherwise: cruise straight ahead
//!
//! LeftWallFollow (RightWallFollow mirrors it):
//! - no wall on the left (below Far): curve forward toward the left
//! - wall ahead (front above Follow): pivot right in place
//! - otherwise: cruise straight ahead

use crate::control::channel::{Channel, Readings};
use crate::control::config::Config;
use crate::control::mode::{ControlState, SteeringMode};
use crate::control::motor::{Direction, MotorCommand};

/// Computes this iteration's motor command
pub fn steer(state: ControlState, readings: &Readings, config: &Config) -> MotorCommand {
    if !state.active {
        return MotorCommand::stop();
    }

    // Keeps backing off until the front reading is back under the margin,
    // not just until it drops below Close.
    if state.mode == SteeringMode::ObjectFollow && readings.front > config.escape_level() {
        return MotorCommand::both(Direction::Backward, config.speeds.reverse);
    }

    if collision_imminent(readings, config) {
        return MotorCommand::stop();
    }

    match state.mode {
        SteeringMode::ObjectFollow => follow_object(readings, config),
        SteeringMode::LeftWallFollow => follow_wall(WallSide::Left, readings, config),
        SteeringMode::RightWallFollow => follow_wall(WallSide::Right, readings, config),
    }
}

/// True if any channel reads above its Close threshold
pub fn collision_imminent(readings: &Readings, config: &Config) -> bool {
    Channel::ALL
        .iter()
        .any(|&channel| config.thresholds(channel).is_too_close(readings.get(channel)))
}

fn follow_object(readings: &Readings, config: &Config) -> MotorCommand {
    if !config.front.is_within_follow(readings.front) {
        return MotorCommand::both(Direction::Forward, config.speeds.cruise);
    }

    let speed = config.speeds.follow;
    MotorCommand {
        direction: Direction::Forward,
        left_duty: speed,
        right_duty: speed,
        left_enabled: config.left.is_within_follow(readings.left),
        right_enabled: config.right.is_within_follow(readings.right),
    }
}

#[derive(Clone, Copy)]
enum WallSide {
    Left,
    Right,
}

fn follow_wall(side: WallSide, readings: &Readings, config: &Config) -> MotorCommand {
    let speeds = &config.speeds;
    let (channel, toward_wall, away_pivot) = match side {
        WallSide::Left => (
            Channel::Left,
            MotorCommand::curve(speeds.curve_slow, speeds.curve_fast),
            Direction::RightPivot,
        ),
        WallSide::Right => (
            Channel::Right,
            MotorCommand::curve(speeds.curve_fast, speeds.curve_slow),
            Direction::LeftPivot,
        ),
    };

    if config.thresholds(channel).is_clear(readings.get(channel)) {
        toward_wall
    } else if readings.front > config.front.follow() {
        MotorCommand::both(away_pivot, speeds.pivot)
    } else {
        MotorCommand::both(Direction::Forward, speeds.cruise)
    }
}
