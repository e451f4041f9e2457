//! Through-beam obstacle sensors across the door opening.
//!
//! Each emitter/receiver pair drives one digital input.  The receiver
//! output is open-collector: the line is pulled HIGH while the beam is
//! intact and goes LOW when something breaks it, so `active_low` is the
//! usual wiring.
//!
//! ## Short interruptions
//!
//! A person stepping through the beam can break it for less than one
//! polling interval.  On the device the falling edge is caught by a GPIO
//! interrupt that sets an [`ObstacleLatch`]; the next [`read`] reports an
//! obstacle even if the beam has already been restored, then clears it.
//!
//! [`read`]: ObstacleSensor::read

use core::sync::atomic::{AtomicBool, Ordering};

use embedded_hal::digital::InputPin;
use log::warn;

use crate::error::{Error, SensorError};

/// Edge latch written from the GPIO ISR, consumed by the polling loop.
/// Lock-free, so safe to set from interrupt context.
pub struct ObstacleLatch(AtomicBool);

impl ObstacleLatch {
    pub const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    /// Record a beam break.  Call from the ISR.
    pub fn set_from_isr(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Consume the latch, returning whether a break was recorded.
    fn take(&self) -> bool {
        self.0.swap(false, Ordering::AcqRel)
    }
}

impl Default for ObstacleLatch {
    fn default() -> Self {
        Self::new()
    }
}

pub struct ObstacleSensor<P> {
    pin: P,
    index: u8,
    active_low: bool,
    latch: Option<&'static ObstacleLatch>,
}

impl<P: InputPin> ObstacleSensor<P> {
    pub fn new(pin: P, index: u8, active_low: bool) -> Self {
        Self {
            pin,
            index,
            active_low,
            latch: None,
        }
    }

    /// Attach an ISR edge latch.
    #[must_use]
    pub fn with_latch(mut self, latch: &'static ObstacleLatch) -> Self {
        self.latch = Some(latch);
        self
    }

    /// Whether an object is, or was since the last read, in the beam.
    ///
    /// A pin that cannot be read reports an obstacle: the door must not
    /// close on a sensor it cannot see.
    pub fn read(&mut self) -> bool {
        let latched = self.latch.is_some_and(ObstacleLatch::take);
        match self.read_level() {
            Ok(blocked) => blocked || latched,
            Err(e) => {
                warn!("{}, treating as blocked", Error::from(e));
                true
            }
        }
    }

    fn read_level(&mut self) -> Result<bool, SensorError> {
        let high = self
            .pin
            .is_high()
            .map_err(|_| SensorError::ObstacleReadFailed(self.index))?;
        Ok(high != self.active_low)
    }
}
