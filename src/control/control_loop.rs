//! Control Loop
//!
//! One iteration, in this order:
//! 1. drain pending button events and apply them to the mode state
//! 2. sample the three sensors
//! 3. filter every channel
//! 4. steer
//! 5. push the motor command to the actuator
//!
//! Mode changes only happen in step 1, so a command is always computed from a
//! single consistent (mode, active) pair.

use crate::control::channel::Readings;
use crate::control::config::Config;
use crate::control::filter::FilterBank;
use crate::control::mode::{ControlState, ModeController};
use crate::control::motor::{Actuator, MotorCommand};
use crate::control::policy;
use crate::control::sampler::{SampleError, Sampler};
use crate::system::event::EventReceiver;
use crate::system::state::SharedState;

/// The foreground sensor-to-actuation loop
pub struct ControlLoop<'a, S, A> {
    sampler: S,
    actuator: A,
    config: Config,
    filters: FilterBank,
    modes: ModeController,
    events: EventReceiver<'a>,
    shared: &'a SharedState,
    latest: Readings,
    consecutive_faults: u32,
}

impl<'a, S, A> ControlLoop<'a, S, A>
where
    S: Sampler,
    A: Actuator,
{
    pub fn new(
        sampler: S,
        actuator: A,
        config: Config,
        events: EventReceiver<'a>,
        shared: &'a SharedState,
    ) -> Self {
        let modes = ModeController::new(config.buttons);
        shared.publish(modes.state());
        Self {
            sampler,
            actuator,
            filters: FilterBank::new(config.filter),
            modes,
            config,
            events,
            shared,
            latest: Readings::default(),
            consecutive_faults: 0,
        }
    }

    /// Primes the filters before the first steering decision
    ///
    /// Motors are held stopped while the history fills.
    pub async fn warm_up(&mut self) -> Result<(), SampleError> {
        MotorCommand::stop().apply(&mut self.actuator);
        for _ in 0..self.config.warm_up_cycles {
            self.sense().await?;
        }
        info!("filters primed with {} samples", self.config.warm_up_cycles);
        Ok(())
    }

    /// Runs one full iteration and returns the command that was applied
    ///
    /// A sampling fault stops both wheels and leaves the filter history as it was.
    pub async fn step(&mut self) -> Result<MotorCommand, SampleError> {
        self.poll_events();

        let readings = match self.sense().await {
            Ok(readings) => readings,
            Err(e) => {
                self.actuator.stop_both();
                return Err(e);
            }
        };

        let command = policy::steer(self.modes.state(), &readings, &self.config);
        command.apply(&mut self.actuator);
        Ok(command)
    }

    /// Iterates forever; faults are logged and retried on the next pass
    pub async fn run(&mut self) {
        loop {
            // A failed step has already stopped the wheels and logged the fault.
            let _ = self.step().await;
        }
    }

    /// Applies every pending button event in arrival order
    fn poll_events(&mut self) {
        while let Ok(button) = self.events.try_receive() {
            let previous = self.modes.state();
            match self.modes.handle(button, &self.latest) {
                Some(state) => {
                    info!(
                        "button {}: {} (active {}) -> {} (active {})",
                        button, previous.mode, previous.active, state.mode, state.active
                    );
                    self.shared.publish(state);
                }
                None => debug!("button {}: no state change", button),
            }
        }
    }

    /// Samples and filters one trio, tracking faults
    async fn sense(&mut self) -> Result<Readings, SampleError> {
        let raw = match self.sampler.sample().await {
            Ok(raw) => raw,
            Err(e) => {
                self.consecutive_faults = self.consecutive_faults.saturating_add(1);
                warn!("sampling failed: {} ({} in a row)", e, self.consecutive_faults);
                return Err(e);
            }
        };

        if self.consecutive_faults > 0 {
            info!("sampling recovered after {} faults", self.consecutive_faults);
            self.consecutive_faults = 0;
        }

        self.latest = self.filters.apply(&raw);
        Ok(self.latest)
    }

    pub fn state(&self) -> ControlState {
        self.modes.state()
    }

    /// Most recent filtered readings
    pub fn latest(&self) -> Readings {
        self.latest
    }

    pub fn consecutive_faults(&self) -> u32 {
        self.consecutive_faults
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn actuator(&self) -> &A {
        &self.actuator
    }
}
