//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (sensors, relays, event sinks) implement these traits.
//! The [`AppService`](super::service::AppService) consumes them via
//! generics, so the controller never touches hardware directly.

use crate::fsm::context::{SensorSnapshot, StatusLight};

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this once per cycle.
pub trait SensorPort {
    /// Read every sensor and return one consistent snapshot.
    ///
    /// Implementations never fail: a sensor that cannot be read is
    /// folded into the snapshot in its fail-safe sense.
    fn read_all(&mut self) -> SensorSnapshot;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to command the relays.
/// Every call is a level, not an edge; repeating it is harmless.
pub trait ActuatorPort {
    /// Energise or release the door motor contactor.
    fn set_motor(&mut self, engaged: bool);

    /// Select the status lamp indication.
    fn set_status_light(&mut self, light: StatusLight);

    /// Sound or silence the alarm buzzer.
    fn set_alarm(&mut self, active: bool);

    /// Release every relay.
    fn all_off(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
