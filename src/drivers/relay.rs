//! Single-channel relay driver.
//!
//! Opto-isolated relay boards come in both polarities; most energise the
//! coil when the input is pulled LOW.  The driver hides that so callers
//! only ever say "energised" or "released".
//!
//! Every [`set`](RelayDriver::set) writes the pin, even when the level is
//! unchanged: outputs are re-issued each cycle, so a relay that glitched
//! is corrected on the next one.

use embedded_hal::digital::{OutputPin, PinState};
use log::{info, warn};

use crate::error::{ActuatorError, Error};

pub struct RelayDriver<P> {
    pin: P,
    name: &'static str,
    active_low: bool,
    energised: bool,
}

impl<P: OutputPin> RelayDriver<P> {
    /// Wrap `pin` and release the relay immediately.
    pub fn new(pin: P, name: &'static str, active_low: bool) -> Self {
        let mut relay = Self {
            pin,
            name,
            active_low,
            energised: false,
        };
        relay.set(false);
        relay
    }

    /// Energise (`true`) or release (`false`) the coil.
    pub fn set(&mut self, energised: bool) {
        if let Err(e) = self.write(energised) {
            warn!("{}", Error::from(e));
            return;
        }
        if energised != self.energised {
            info!(
                "relay {}: {}",
                self.name,
                if energised { "energised" } else { "released" }
            );
        }
        self.energised = energised;
    }

    pub fn is_energised(&self) -> bool {
        self.energised
    }

    fn write(&mut self, energised: bool) -> Result<(), ActuatorError> {
        let level = PinState::from(energised != self.active_low);
        self.pin
            .set_state(level)
            .map_err(|_| ActuatorError::RelayWriteFailed(self.name))
    }
}
