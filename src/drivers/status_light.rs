//! Two-lamp status light: green "safe to pass", amber "caution".
//!
//! Exactly one lamp is lit at a time.  The caution lamp is released
//! before the safe lamp is energised so the two are never on together.

use embedded_hal::digital::OutputPin;

use crate::drivers::relay::RelayDriver;
use crate::fsm::context::StatusLight as Indication;

pub struct StatusLight<P> {
    safe: RelayDriver<P>,
    caution: RelayDriver<P>,
    current: Option<Indication>,
}

impl<P: OutputPin> StatusLight<P> {
    pub fn new(safe: RelayDriver<P>, caution: RelayDriver<P>) -> Self {
        Self {
            safe,
            caution,
            current: None,
        }
    }

    pub fn show(&mut self, indication: Indication) {
        match indication {
            Indication::Safe => {
                self.caution.set(false);
                self.safe.set(true);
            }
            Indication::Caution => {
                self.safe.set(false);
                self.caution.set(true);
            }
        }
        self.current = Some(indication);
    }

    /// Both lamps dark.
    pub fn off(&mut self) {
        self.safe.set(false);
        self.caution.set(false);
        self.current = None;
    }

    pub fn current(&self) -> Option<Indication> {
        self.current
    }
}
