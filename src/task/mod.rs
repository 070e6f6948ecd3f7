pub mod button_handle;
pub mod control;
pub mod ir_sampler;
pub mod motor_driver;
pub mod resources;
pub mod rgb_led_indicate;
