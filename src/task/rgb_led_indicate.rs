//! RGB LED Indicator Task
//!
//! Shows the current steering state on the RGB LED: red while inactive, blue
//! in object follow, green in either wall follow mode. Every change is
//! acknowledged with a short blink before the steady color is shown.
use defmt::info;
use embassy_rp::pwm::{self, Pwm};
use embassy_time::{Duration, Timer};
use romi_follower::system::indicator::{affirm_sequence, IndicatorColor};
use romi_follower::system::state::SHARED_STATE;

use crate::task::resources::RgbLedResources;

/// Interval for LED blinking when affirming state change
const AFFIRM_BLINK_INTERVAL: Duration = Duration::from_millis(60);

/// Percentage of full PWM used for a lit die
const BRIGHTNESS_PERCENT: u8 = 30;

/// One PWM channel per LED die
struct RgbLed {
    red: Pwm<'static>,
    green: Pwm<'static>,
    blue: Pwm<'static>,
    config: pwm::Config,
}

impl RgbLed {
    fn new(r: RgbLedResources) -> Self {
        // configure pwm for rgb led, 100Hz
        let desired_freq_hz = 100;
        let clock_freq_hz = embassy_rp::clocks::clk_sys_freq();

        // Calculate minimum divider needed to keep period under 16-bit limit (65535)
        let divider = ((clock_freq_hz / desired_freq_hz) / 65535 + 1) as u8;
        let period = (clock_freq_hz / (desired_freq_hz * divider as u32)) as u16 - 1;

        let mut config = pwm::Config::default();
        config.divider = divider.into();
        config.top = period;
        config.compare_a = 0;

        Self {
            red: Pwm::new_output_a(r.pwm_red, r.red_pin, config.clone()),
            green: Pwm::new_output_a(r.pwm_green, r.green_pin, config.clone()),
            blue: Pwm::new_output_a(r.pwm_blue, r.blue_pin, config.clone()),
            config,
        }
    }

    fn show(&mut self, color: IndicatorColor) {
        let (red, green, blue) = color.channels(BRIGHTNESS_PERCENT);
        let top = u32::from(self.config.top);
        let mut config = self.config.clone();
        for (led, percent) in [
            (&mut self.red, red),
            (&mut self.green, green),
            (&mut self.blue, blue),
        ] {
            config.compare_a = (top * u32::from(percent) / 100) as u16;
            led.set_config(&config);
        }
    }
}

/// Follows the shared control state on the RGB LED
#[embassy_executor::task]
pub async fn rgb_led_indicate(r: RgbLedResources) {
    let mut led = RgbLed::new(r);
    led.show(IndicatorColor::for_state(SHARED_STATE.snapshot()));

    loop {
        // Wait for a change in control state
        let state = SHARED_STATE.wait_changed().await;
        info!("indicator: {} (active {})", state.mode, state.active);

        for color in affirm_sequence(state) {
            led.show(color);
            Timer::after(AFFIRM_BLINK_INTERVAL).await;
        }
        led.show(IndicatorColor::for_state(state));
    }
}
