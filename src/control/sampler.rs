//! Analog Sampler capability
//!
//! A sampler converts all three channels as one trio and hands the raw counts
//! back keyed by channel, never by position in the conversion queue.

use crate::control::channel::{Channel, Readings};

/// Why a trio could not be read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SampleError {
    /// The converter never signalled completion for this channel
    Timeout(Channel),
    /// The converter reported an error for this channel
    Conversion(Channel),
}

impl SampleError {
    pub const fn channel(&self) -> Channel {
        match self {
            SampleError::Timeout(channel) | SampleError::Conversion(channel) => *channel,
        }
    }
}

/// Raw sensor capability
///
/// `sample` triggers conversion on every channel and waits until they are
/// done. Implementations must bound that wait and report a
/// [`SampleError::Timeout`] instead of hanging.
#[allow(async_fn_in_trait)]
pub trait Sampler {
    async fn sample(&mut self) -> Result<Readings, SampleError>;
}
