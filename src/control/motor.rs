//! Motor Actuator Module
//!
//! Describes what the wheels should do and the capability that makes them do it.
//!
//! The chassis has one DRV8838-style driver per wheel, each with a sleep pin, a
//! direction pin and a PWM input. A [`MotorCommand`] is computed fresh every
//! control iteration, pushed through an [`Actuator`] and discarded; the latest
//! call always wins and nothing is queued.

/// PWM period in timer ticks; duty presets are expressed against it
pub const PWM_PERIOD: u16 = 10_000;

/// Wheel selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Side {
    Left,
    Right,
}

/// Rotational sense of a single wheel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WheelSense {
    Forward,
    Reverse,
}

/// Chassis direction, realized as one sense per wheel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Forward,
    Backward,
    /// Rotate in place counter-clockwise (left wheel back, right wheel forward)
    LeftPivot,
    /// Rotate in place clockwise (left wheel forward, right wheel back)
    RightPivot,
}

impl Direction {
    /// Senses for the (left, right) wheels
    pub const fn wheel_senses(self) -> (WheelSense, WheelSense) {
        match self {
            Direction::Forward => (WheelSense::Forward, WheelSense::Forward),
            Direction::Backward => (WheelSense::Reverse, WheelSense::Reverse),
            Direction::LeftPivot => (WheelSense::Reverse, WheelSense::Forward),
            Direction::RightPivot => (WheelSense::Forward, WheelSense::Reverse),
        }
    }

    pub const fn sense(self, side: Side) -> WheelSense {
        let (left, right) = self.wheel_senses();
        match side {
            Side::Left => left,
            Side::Right => right,
        }
    }
}

/// Named duty cycle presets
///
/// Speeds are bucketed, never continuous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DutyPreset {
    Stop,
    Low,
    Medium,
    High,
    Max,
}

impl DutyPreset {
    /// Compare value in ticks out of [`PWM_PERIOD`]
    pub const fn ticks(self) -> u16 {
        match self {
            DutyPreset::Stop => 1,
            DutyPreset::Low => 3_500,
            DutyPreset::Medium => 6_000,
            DutyPreset::High => 8_000,
            DutyPreset::Max => 9_800,
        }
    }
}

/// Everything the actuator needs for one control iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotorCommand {
    pub direction: Direction,
    pub left_duty: DutyPreset,
    pub right_duty: DutyPreset,
    pub left_enabled: bool,
    pub right_enabled: bool,
}

impl MotorCommand {
    /// Both wheels disabled
    pub const fn stop() -> Self {
        Self {
            direction: Direction::Forward,
            left_duty: DutyPreset::Stop,
            right_duty: DutyPreset::Stop,
            left_enabled: false,
            right_enabled: false,
        }
    }

    /// Both wheels running in `direction` at the same speed
    pub const fn both(direction: Direction, speed: DutyPreset) -> Self {
        Self {
            direction,
            left_duty: speed,
            right_duty: speed,
            left_enabled: true,
            right_enabled: true,
        }
    }

    /// Both wheels forward at different speeds; the slower side is the one turned toward
    pub const fn curve(left: DutyPreset, right: DutyPreset) -> Self {
        Self {
            direction: Direction::Forward,
            left_duty: left,
            right_duty: right,
            left_enabled: true,
            right_enabled: true,
        }
    }

    pub const fn duty(&self, side: Side) -> DutyPreset {
        match side {
            Side::Left => self.left_duty,
            Side::Right => self.right_duty,
        }
    }

    pub const fn enabled(&self, side: Side) -> bool {
        match side {
            Side::Left => self.left_enabled,
            Side::Right => self.right_enabled,
        }
    }

    /// True when neither wheel is driven
    pub const fn is_stopped(&self) -> bool {
        !self.left_enabled && !self.right_enabled
    }

    /// Pushes the command to the hardware: direction first, then duty, then enables
    pub fn apply<A: Actuator + ?Sized>(&self, actuator: &mut A) {
        actuator.set_direction(self.direction);
        for side in [Side::Left, Side::Right] {
            actuator.set_duty_cycle(side, self.duty(side));
            if self.enabled(side) {
                actuator.enable(side);
            } else {
                actuator.disable(side);
            }
        }
    }
}

/// Wheel driver capability
///
/// Every call takes effect immediately. There is no failure path: no stall
/// detection, no current sensing.
pub trait Actuator {
    fn set_direction(&mut self, direction: Direction);

    fn set_duty_cycle(&mut self, side: Side, duty: DutyPreset);

    fn enable(&mut self, side: Side);

    fn disable(&mut self, side: Side);

    fn start_both(&mut self) {
        self.enable(Side::Right);
        self.enable(Side::Left);
    }

    fn stop_both(&mut self) {
        self.disable(Side::Left);
        self.disable(Side::Right);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Call {
        Direction(Direction),
        Duty(Side, DutyPreset),
        Enable(Side),
        Disable(Side),
    }

    #[derive(Default)]
    struct MockActuator {
        calls: Vec<Call>,
    }

    impl Actuator for MockActuator {
        fn set_direction(&mut self, direction: Direction) {
            self.calls.push(Call::Direction(direction));
        }

        fn set_duty_cycle(&mut self, side: Side, duty: DutyPreset) {
            self.calls.push(Call::Duty(side, duty));
        }

        fn enable(&mut self, side: Side) {
            self.calls.push(Call::Enable(side));
        }

        fn disable(&mut self, side: Side) {
            self.calls.push(Call::Disable(side));
        }
    }

    #[test]
    fn pivots_drive_wheels_in_opposite_senses() {
        for direction in [Direction::LeftPivot, Direction::RightPivot] {
            let (left, right) = direction.wheel_senses();
            assert_ne!(left, right);
        }
        assert_eq!(Direction::LeftPivot.sense(Side::Right), WheelSense::Forward);
        assert_eq!(Direction::RightPivot.sense(Side::Right), WheelSense::Reverse);
        assert_eq!(Direction::Backward.sense(Side::Left), WheelSense::Reverse);
    }

    #[test]
    fn presets_are_ordered_and_fit_the_period() {
        assert_eq!(DutyPreset::Stop.ticks(), 1);
        assert_eq!(DutyPreset::Max.ticks(), 9_800);
        let all = [
            DutyPreset::Stop,
            DutyPreset::Low,
            DutyPreset::Medium,
            DutyPreset::High,
            DutyPreset::Max,
        ];
        for pair in all.windows(2) {
            assert!(pair[0].ticks() < pair[1].ticks());
        }
        assert!(DutyPreset::Max.ticks() < PWM_PERIOD);
    }

    #[test]
    fn apply_sets_direction_before_wheels() {
        let mut actuator = MockActuator::default();
        let command = MotorCommand {
            direction: Direction::Forward,
            left_duty: DutyPreset::Low,
            right_duty: DutyPreset::High,
            left_enabled: true,
            right_enabled: false,
        };

        command.apply(&mut actuator);

        assert_eq!(
            actuator.calls,
            vec![
                Call::Direction(Direction::Forward),
                Call::Duty(Side::Left, DutyPreset::Low),
                Call::Enable(Side::Left),
                Call::Duty(Side::Right, DutyPreset::High),
                Call::Disable(Side::Right),
            ]
        );
    }

    #[test]
    fn composite_helpers_touch_both_wheels() {
        let mut actuator = MockActuator::default();
        actuator.start_both();
        actuator.stop_both();
        assert_eq!(
            actuator.calls,
            vec![
                Call::Enable(Side::Right),
                Call::Enable(Side::Left),
                Call::Disable(Side::Left),
                Call::Disable(Side::Right),
            ]
        );
    }

    #[test]
    fn stop_disables_both_wheels() {
        assert!(MotorCommand::stop().is_stopped());
        assert!(!MotorCommand::both(Direction::Backward, DutyPreset::Low).is_stopped());
    }
}
