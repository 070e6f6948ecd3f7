//! Control pipeline: Sampler → Filter → Steering Policy → Motor Actuator
pub mod channel;
pub mod config;
pub mod control_loop;
pub mod filter;
pub mod mode;
pub mod motor;
pub mod policy;
pub mod sampler;
