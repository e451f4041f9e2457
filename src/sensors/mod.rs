//! Sensor subsystem: individual drivers and the aggregating [`SensorHub`].
//!
//! The hub owns every sensor driver and produces one [`SensorSnapshot`]
//! per control cycle: obstacle inputs OR-combined, motion inputs counted
//! and compared against the sensitivity threshold.  All pins are sampled
//! back to back inside [`SensorHub::read_all`], so the controller always
//! sees a consistent view.

pub mod motion;
pub mod obstacle;

use embedded_hal::digital::InputPin;
use heapless::Vec;
use log::info;

use crate::config::{MAX_MOTION_SENSORS, MAX_OBSTACLE_SENSORS};
use crate::fsm::context::SensorSnapshot;
use motion::MotionSensor;
use obstacle::ObstacleSensor;

/// Aggregates all sensor drivers and produces a unified snapshot.
pub struct SensorHub<P> {
    obstacles: Vec<ObstacleSensor<P>, MAX_OBSTACLE_SENSORS>,
    motions: Vec<MotionSensor<P>, MAX_MOTION_SENSORS>,
    motion_threshold: u8,
}

impl<P: InputPin> SensorHub<P> {
    /// Construct a new hub.  Pass in pre-built drivers (built in main
    /// where peripheral ownership is established).
    pub fn new(
        obstacles: Vec<ObstacleSensor<P>, MAX_OBSTACLE_SENSORS>,
        motions: Vec<MotionSensor<P>, MAX_MOTION_SENSORS>,
        motion_threshold: u8,
    ) -> Self {
        info!(
            "SensorHub: {} obstacle, {} motion sensor(s), threshold {}",
            obstacles.len(),
            motions.len(),
            motion_threshold
        );
        Self {
            obstacles,
            motions,
            motion_threshold,
        }
    }

    /// Read every sensor and return a unified snapshot.
    ///
    /// Every obstacle sensor is read even after one reports an object, so
    /// each ISR latch is consumed in the same cycle.
    pub fn read_all(&mut self) -> SensorSnapshot {
        let obstacle_present = self
            .obstacles
            .iter_mut()
            .fold(false, |any, sensor| sensor.read() | any);

        let active_motion_sensors = self
            .motions
            .iter_mut()
            .map(MotionSensor::read)
            .filter(|&active| active)
            .count() as u8;

        SensorSnapshot::new(obstacle_present, active_motion_sensors, self.motion_threshold)
    }
}
