//! Noise Filter Module
//!
//! The IR range sensors output occasional erroneous spikes, so every channel
//! runs through its own stateful filter before the steering policy sees it.
//! Three interchangeable policies are available:
//!
//! ```text
//! Median-of-3:  y(n) = median(x(n), x(n-1), x(n-2))
//! FIR 2-tap:    y(n) = (x(n) + x(n-1)) / 2
//! IIR a=0.5:    y(n) = (x(n) + y(n-1)) / 2
//! ```
//!
//! All history starts at zero, so the first outputs of every channel are
//! biased toward zero. The IIR filter never fully forgets that bias.

use crate::control::channel::{Channel, Readings};

/// Selects the filter applied to every channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FilterKind {
    Median,
    Fir,
    Iir,
}

/// A per-channel smoothing stage fed one raw sample per cycle
pub trait NoiseFilter {
    /// Consumes the newest raw sample and returns the filtered value
    fn update(&mut self, newest: u16) -> u16;

    /// Returns the history to its startup state
    fn reset(&mut self);
}

/// Median of three values
///
/// The comparison order is kept exactly as calibrated: `newest` against
/// `middle` first, then the losing chain against `oldest`.
pub fn median(newest: u16, middle: u16, oldest: u16) -> u16 {
    if newest > middle {
        if middle > oldest {
            middle
        } else if newest > oldest {
            oldest
        } else {
            newest
        }
    } else if oldest > middle {
        middle
    } else if newest > oldest {
        newest
    } else {
        oldest
    }
}

/// Median-of-3 over the two previous raw samples
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MedianFilter {
    oldest: u16,
    middle: u16,
}

impl NoiseFilter for MedianFilter {
    fn update(&mut self, newest: u16) -> u16 {
        let value = median(newest, self.middle, self.oldest);
        self.oldest = self.middle;
        self.middle = newest;
        value
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Two-tap moving average over raw samples
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FirFilter {
    previous: u16,
}

impl NoiseFilter for FirFilter {
    fn update(&mut self, newest: u16) -> u16 {
        let value = average(newest, self.previous);
        self.previous = newest;
        value
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Exponential smoothing with alpha = 0.5, feeding back the previous output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IirFilter {
    previous_output: u16,
}

impl NoiseFilter for IirFilter {
    fn update(&mut self, newest: u16) -> u16 {
        self.previous_output = average(newest, self.previous_output);
        self.previous_output
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Truncating mean of two samples
fn average(a: u16, b: u16) -> u16 {
    ((u32::from(a) + u32::from(b)) / 2) as u16
}

/// Filter state for one channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelFilter {
    Median(MedianFilter),
    Fir(FirFilter),
    Iir(IirFilter),
}

impl ChannelFilter {
    pub fn new(kind: FilterKind) -> Self {
        match kind {
            FilterKind::Median => ChannelFilter::Median(MedianFilter::default()),
            FilterKind::Fir => ChannelFilter::Fir(FirFilter::default()),
            FilterKind::Iir => ChannelFilter::Iir(IirFilter::default()),
        }
    }

    pub fn kind(&self) -> FilterKind {
        match self {
            ChannelFilter::Median(_) => FilterKind::Median,
            ChannelFilter::Fir(_) => FilterKind::Fir,
            ChannelFilter::Iir(_) => FilterKind::Iir,
        }
    }
}

impl NoiseFilter for ChannelFilter {
    fn update(&mut self, newest: u16) -> u16 {
        match self {
            ChannelFilter::Median(f) => f.update(newest),
            ChannelFilter::Fir(f) => f.update(newest),
            ChannelFilter::Iir(f) => f.update(newest),
        }
    }

    fn reset(&mut self) {
        match self {
            ChannelFilter::Median(f) => f.reset(),
            ChannelFilter::Fir(f) => f.reset(),
            ChannelFilter::Iir(f) => f.reset(),
        }
    }
}

/// Exactly one independent filter per channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterBank {
    filters: [ChannelFilter; 3],
}

impl FilterBank {
    pub fn new(kind: FilterKind) -> Self {
        Self {
            filters: [ChannelFilter::new(kind); 3],
        }
    }

    pub fn kind(&self) -> FilterKind {
        self.filters[0].kind()
    }

    /// Runs one sampling cycle through every channel's filter
    pub fn apply(&mut self, raw: &Readings) -> Readings {
        Readings::from_fn(|channel| self.filter(channel, raw.get(channel)))
    }

    /// Feeds a single channel
    pub fn filter(&mut self, channel: Channel, raw: u16) -> u16 {
        self.filters[channel.index()].update(raw)
    }

    pub fn reset(&mut self) {
        self.filters.iter_mut().for_each(|f| f.reset());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canonical_median(a: u16, b: u16, c: u16) -> u16 {
        let mut v = [a, b, c];
        v.sort_unstable();
        v[1]
    }

    #[test]
    fn median_matches_canonical_middle_value() {
        let values = [0u16, 1, 7, 7, 1500, 2400, 4095];
        for &a in &values {
            for &b in &values {
                for &c in &values {
                    assert_eq!(median(a, b, c), canonical_median(a, b, c), "{a} {b} {c}");
                }
            }
        }
    }

    #[test]
    fn median_rejects_a_single_spike() {
        let mut filter = MedianFilter::default();
        filter.update(2000);
        filter.update(2010);
        assert_eq!(filter.update(4095), 2010);
        assert_eq!(filter.update(2020), 2020);
    }

    #[test]
    fn median_startup_is_biased_toward_zero() {
        let mut filter = MedianFilter::default();
        assert_eq!(filter.update(3000), 0);
        assert_eq!(filter.update(3000), 3000);
        assert_eq!(filter.update(3000), 3000);
    }

    #[test]
    fn median_holds_a_constant_stream() {
        let mut filter = MedianFilter::default();
        filter.update(1234);
        filter.update(1234);
        for _ in 0..5 {
            assert_eq!(filter.update(1234), 1234);
        }
    }

    #[test]
    fn fir_averages_with_previous_raw_sample() {
        let mut filter = FirFilter::default();
        assert_eq!(filter.update(1001), 500);
        assert_eq!(filter.update(2000), 1500);
        assert_eq!(filter.update(2001), 2000);
        assert_eq!(filter.update(4095), 3048);
    }

    #[test]
    fn iir_converges_geometrically_without_overshoot() {
        const V: u16 = 4000;
        let mut filter = IirFilter::default();
        let mut expected: u16 = 0;
        let mut last = 0;
        for _ in 0..20 {
            expected = (expected + V) / 2;
            let value = filter.update(V);
            assert_eq!(value, expected);
            assert!(value <= V);
            assert!(value >= last);
            last = value;
        }
        assert_eq!(last, V - 1);
    }

    #[test]
    fn iir_first_steps_follow_closed_form() {
        let mut filter = IirFilter::default();
        assert_eq!(filter.update(1024), 512);
        assert_eq!(filter.update(1024), 768);
        assert_eq!(filter.update(1024), 896);
        assert_eq!(filter.update(1024), 960);
    }

    #[test]
    fn channels_never_share_state() {
        let mut bank = FilterBank::new(FilterKind::Median);
        for _ in 0..3 {
            bank.apply(&Readings::new(100, 2000, 4000));
        }
        assert_eq!(bank.apply(&Readings::new(100, 2000, 4000)), Readings::new(100, 2000, 4000));
        assert_eq!(bank.filter(Channel::Front, 100), 100);
        assert_eq!(bank.filter(Channel::Right, 4000), 4000);
    }

    #[test]
    fn reset_restores_startup_history() {
        let mut bank = FilterBank::new(FilterKind::Iir);
        bank.apply(&Readings::new(4000, 4000, 4000));
        bank.reset();
        assert_eq!(bank.apply(&Readings::new(2000, 2000, 2000)), Readings::new(1000, 1000, 1000));
        assert_eq!(bank.kind(), FilterKind::Iir);
    }
}
