//! PIR motion sensors on the approaches to the door.
//!
//! Push-pull output, HIGH while presence is detected.  The module's own
//! retrigger time keeps the line up for a few seconds, so no software
//! debounce is applied here.

use embedded_hal::digital::InputPin;
use log::warn;

use crate::error::{Error, SensorError};

pub struct MotionSensor<P> {
    pin: P,
    index: u8,
}

impl<P: InputPin> MotionSensor<P> {
    pub fn new(pin: P, index: u8) -> Self {
        Self { pin, index }
    }

    /// Whether this sensor currently signals presence.  An unreadable pin
    /// counts as inactive; the obstacle beams still guard the opening.
    pub fn read(&mut self) -> bool {
        match self.pin.is_high() {
            Ok(level) => level,
            Err(_) => {
                warn!("{}", Error::from(SensorError::MotionReadFailed(self.index)));
                false
            }
        }
    }
}
