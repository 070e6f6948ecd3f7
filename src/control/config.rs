//! Calibration and behavior configuration
//!
//! Thresholds are raw ADC counts, calibrated empirically on the Sharp-style IR
//! sensors: higher counts mean a closer object. Each channel gets a
//! (Far, Follow, Close) triple:
//! - below Far: nothing there
//! - around Follow: the distance the robot tries to hold
//! - above Close: collision imminent

use crate::control::channel::Channel;
use crate::control::filter::FilterKind;
use crate::control::motor::DutyPreset;

/// Side channel defaults
pub const SIDE_DIST_FAR: u16 = 1500;
pub const SIDE_DIST_FOLLOW: u16 = 2400;
pub const SIDE_DIST_CLOSE: u16 = 2900;

/// Front channel defaults (stops slightly earlier than the sides)
pub const FRONT_DIST_FAR: u16 = 1500;
pub const FRONT_DIST_FOLLOW: u16 = 2400;
pub const FRONT_DIST_CLOSE: u16 = 2800;

/// How far past Follow the front reading must be before the robot backs off
pub const ESCAPE_MARGIN: u16 = 200;

/// Sample+filter cycles run before the first steering decision
pub const WARM_UP_CYCLES: u8 = 10;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A triple violates `far <= follow <= close`
    UnorderedThresholds(Channel),
}

/// Calibrated zones for one channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Thresholds {
    far: u16,
    follow: u16,
    close: u16,
}

impl Thresholds {
    /// Checked constructor; `channel` is only used for the error
    pub fn new(channel: Channel, far: u16, follow: u16, close: u16) -> Result<Self, ConfigError> {
        let thresholds = Self::new_unchecked(far, follow, close);
        if thresholds.is_ordered() {
            Ok(thresholds)
        } else {
            Err(ConfigError::UnorderedThresholds(channel))
        }
    }

    const fn new_unchecked(far: u16, follow: u16, close: u16) -> Self {
        Self { far, follow, close }
    }

    const fn is_ordered(&self) -> bool {
        self.far <= self.follow && self.follow <= self.close
    }

    pub const fn far(&self) -> u16 {
        self.far
    }

    pub const fn follow(&self) -> u16 {
        self.follow
    }

    pub const fn close(&self) -> u16 {
        self.close
    }

    /// Nothing detected on this channel
    pub const fn is_clear(&self, reading: u16) -> bool {
        reading < self.far
    }

    /// Reading below the follow level, i.e. the object is farther than the held distance
    pub const fn is_within_follow(&self, reading: u16) -> bool {
        reading < self.follow
    }

    /// Collision imminent
    pub const fn is_too_close(&self, reading: u16) -> bool {
        reading > self.close
    }
}

/// What the two buttons do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonScheme {
    /// Button A toggles Active
    ActiveToggle,
    /// Button A steps Inactive → ObjectFollow → LeftWallFollow → RightWallFollow → Inactive
    ModeCycle,
}

/// Speeds used by each manoeuvre
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Speeds {
    /// Differential drive while tracking an object
    pub follow: DutyPreset,
    /// Straight ahead with nothing to react to
    pub cruise: DutyPreset,
    /// Inner wheel when angling toward a wall
    pub curve_slow: DutyPreset,
    /// Outer wheel when angling toward a wall
    pub curve_fast: DutyPreset,
    pub pivot: DutyPreset,
    /// Backing away from an object that came too close
    pub reverse: DutyPreset,
}

/// Complete control configuration, immutable once the loop starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    pub front: Thresholds,
    pub left: Thresholds,
    pub right: Thresholds,
    pub escape_margin: u16,
    pub speeds: Speeds,
    pub filter: FilterKind,
    pub buttons: ButtonScheme,
    pub warm_up_cycles: u8,
}

impl Config {
    pub const DEFAULT: Config = Config {
        front: Thresholds::new_unchecked(FRONT_DIST_FAR, FRONT_DIST_FOLLOW, FRONT_DIST_CLOSE),
        left: Thresholds::new_unchecked(SIDE_DIST_FAR, SIDE_DIST_FOLLOW, SIDE_DIST_CLOSE),
        right: Thresholds::new_unchecked(SIDE_DIST_FAR, SIDE_DIST_FOLLOW, SIDE_DIST_CLOSE),
        escape_margin: ESCAPE_MARGIN,
        speeds: Speeds {
            follow: DutyPreset::Low,
            cruise: DutyPreset::Max,
            curve_slow: DutyPreset::Low,
            curve_fast: DutyPreset::High,
            pivot: DutyPreset::Max,
            reverse: DutyPreset::Low,
        },
        filter: FilterKind::Median,
        buttons: ButtonScheme::ActiveToggle,
        warm_up_cycles: WARM_UP_CYCLES,
    };

    pub const fn thresholds(&self, channel: Channel) -> &Thresholds {
        match channel {
            Channel::Front => &self.front,
            Channel::Left => &self.left,
            Channel::Right => &self.right,
        }
    }

    /// Checks every channel's triple
    pub fn validate(&self) -> Result<(), ConfigError> {
        for channel in Channel::ALL {
            if !self.thresholds(channel).is_ordered() {
                return Err(ConfigError::UnorderedThresholds(channel));
            }
        }
        Ok(())
    }

    /// Front reading above which the robot reverses out of a close encounter
    pub const fn escape_level(&self) -> u16 {
        self.front.follow.saturating_add(self.escape_margin)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::DEFAULT
    }
}
