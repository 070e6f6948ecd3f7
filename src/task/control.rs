//! Control Task
//!
//! Owns the sampler and the motors and runs the control loop in the
//! foreground: warm the filters up, then iterate forever.

use defmt::{error, info, warn};
use embassy_time::{Duration, Timer};
use romi_follower::control::config::Config;
use romi_follower::control::control_loop::ControlLoop;
use romi_follower::system::event;
use romi_follower::system::state::SHARED_STATE;

use crate::task::ir_sampler::IrSampler;
use crate::task::motor_driver::RomiMotors;
use crate::task::resources::{IrSensorResources, MotorResources};

/// Pause before retrying a warm-up that hit a sampling fault
const WARM_UP_RETRY_DELAY: Duration = Duration::from_millis(100);

#[embassy_executor::task]
pub async fn control(sensors: IrSensorResources, motors: MotorResources) {
    let config = Config::DEFAULT;
    if let Err(e) = config.validate() {
        error!("refusing to drive with invalid configuration: {}", e);
        return;
    }
    info!("control config: {}", config);

    let mut control = ControlLoop::new(
        IrSampler::new(sensors),
        RomiMotors::new(motors),
        config,
        event::receiver(),
        &SHARED_STATE,
    );

    while let Err(e) = control.warm_up().await {
        warn!("warm-up interrupted by {}, retrying", e);
        Timer::after(WARM_UP_RETRY_DELAY).await;
    }

    control.run().await;
}
