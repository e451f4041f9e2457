//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! Owns the [`SensorHub`] and all relay drivers, exposing them through
//! [`SensorPort`] and [`ActuatorPort`].  This is the only module in the
//! system that touches pins.  It is generic over the `embedded-hal` pin
//! traits, so the same code drives ESP-IDF `PinDriver`s on the device
//! and pin doubles on the host.

use embedded_hal::digital::{InputPin, OutputPin};

use crate::app::ports::{ActuatorPort, SensorPort};
use crate::drivers::relay::RelayDriver;
use crate::drivers::status_light::StatusLight as StatusLamps;
use crate::fsm::context::{SensorSnapshot, StatusLight};
use crate::sensors::SensorHub;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<I, O> {
    sensor_hub: SensorHub<I>,
    motor: RelayDriver<O>,
    alarm: RelayDriver<O>,
    lamps: StatusLamps<O>,
}

impl<I: InputPin, O: OutputPin> HardwareAdapter<I, O> {
    pub fn new(
        sensor_hub: SensorHub<I>,
        motor: RelayDriver<O>,
        alarm: RelayDriver<O>,
        lamps: StatusLamps<O>,
    ) -> Self {
        Self {
            sensor_hub,
            motor,
            alarm,
            lamps,
        }
    }

    pub fn motor_engaged(&self) -> bool {
        self.motor.is_energised()
    }

    pub fn alarm_active(&self) -> bool {
        self.alarm.is_energised()
    }

    pub fn status_light(&self) -> Option<StatusLight> {
        self.lamps.current()
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<I: InputPin, O: OutputPin> SensorPort for HardwareAdapter<I, O> {
    fn read_all(&mut self) -> SensorSnapshot {
        self.sensor_hub.read_all()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<I: InputPin, O: OutputPin> ActuatorPort for HardwareAdapter<I, O> {
    fn set_motor(&mut self, engaged: bool) {
        self.motor.set(engaged);
    }

    fn set_status_light(&mut self, light: StatusLight) {
        self.lamps.show(light);
    }

    fn set_alarm(&mut self, active: bool) {
        self.alarm.set(active);
    }

    fn all_off(&mut self) {
        self.motor.set(false);
        self.alarm.set(false);
        self.lamps.off();
    }
}
