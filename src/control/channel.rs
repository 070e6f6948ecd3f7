//! Sensor channels and reading trios

/// Largest value a 12-bit conversion can produce
pub const RAW_MAX: u16 = 0x0FFF;

/// One of the three IR range sensors
///
/// The declaration order is the conversion order of a sampling trio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    Front,
    Left,
    Right,
}

impl Channel {
    /// All channels, in the order a trio is converted and read back
    pub const ALL: [Channel; 3] = [Channel::Front, Channel::Left, Channel::Right];

    /// Stable slot for per-channel arrays
    pub const fn index(self) -> usize {
        match self {
            Channel::Front => 0,
            Channel::Left => 1,
            Channel::Right => 2,
        }
    }
}

/// One value per channel
///
/// Used for both raw conversions and filtered distances. Higher values mean a
/// closer object; the numbers are raw ADC counts, not a distance unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Readings {
    pub front: u16,
    pub left: u16,
    pub right: u16,
}

impl Readings {
    pub const fn new(front: u16, left: u16, right: u16) -> Self {
        Self { front, left, right }
    }

    pub fn get(&self, channel: Channel) -> u16 {
        match channel {
            Channel::Front => self.front,
            Channel::Left => self.left,
            Channel::Right => self.right,
        }
    }

    pub fn set(&mut self, channel: Channel, value: u16) {
        match channel {
            Channel::Front => self.front = value,
            Channel::Left => self.left = value,
            Channel::Right => self.right = value,
        }
    }

    /// Builds a trio by evaluating `f` once per channel, in conversion order
    pub fn from_fn(mut f: impl FnMut(Channel) -> u16) -> Self {
        let mut readings = Self::default();
        for channel in Channel::ALL {
            readings.set(channel, f(channel));
        }
        readings
    }
}
