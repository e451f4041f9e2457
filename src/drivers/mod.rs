//! Actuator drivers and peripheral helpers.

pub mod isr;
pub mod relay;
pub mod status_light;
pub mod watchdog;
