//! IR Range Sampler
//!
//! Reads the three analog IR sensors through the RP2350 ADC as one trio.
//!
//! # Operation
//! - Channels are converted in a fixed order: front, left, right
//! - Each result is stored under its channel, never by queue position
//! - Every conversion wait is bounded; a converter that never completes
//!   yields [`SampleError::Timeout`] instead of hanging the control loop

use embassy_rp::adc::{self, Adc, Async};
use embassy_rp::gpio::Pull;
use embassy_time::{with_timeout, Duration};
use romi_follower::control::channel::{Channel, Readings, RAW_MAX};
use romi_follower::control::sampler::{SampleError, Sampler};

use crate::task::resources::{IrSensorResources, Irqs};

/// Longest a single conversion may take before it is reported as a fault
const CONVERSION_TIMEOUT: Duration = Duration::from_millis(5);

/// ADC-backed [`Sampler`]
pub struct IrSampler {
    adc: Adc<'static, Async>,
    /// Indexed by [`Channel::index`]
    channels: [adc::Channel<'static>; 3],
}

impl IrSampler {
    pub fn new(r: IrSensorResources) -> Self {
        let adc = Adc::new(r.adc, Irqs, adc::Config::default());
        // No pull resistors; the sensors drive their outputs actively.
        let channels = [
            adc::Channel::new_pin(r.front_pin, Pull::None),
            adc::Channel::new_pin(r.left_pin, Pull::None),
            adc::Channel::new_pin(r.right_pin, Pull::None),
        ];
        Self { adc, channels }
    }
}

impl Sampler for IrSampler {
    async fn sample(&mut self) -> Result<Readings, SampleError> {
        let mut readings = Readings::default();
        for channel in Channel::ALL {
            let pin = &mut self.channels[channel.index()];
            let raw = with_timeout(CONVERSION_TIMEOUT, self.adc.read(pin))
                .await
                .map_err(|_| SampleError::Timeout(channel))?
                .map_err(|_| SampleError::Conversion(channel))?;
            readings.set(channel, raw & RAW_MAX);
        }
        Ok(readings)
    }
}
