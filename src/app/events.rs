//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  They are purely
//! observational: nothing an adapter does with them feeds back into the
//! controller.

use crate::fsm::DoorState;
use crate::fsm::context::StatusLight;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Periodic telemetry snapshot.
    Telemetry(TelemetryData),

    /// The door changed state.
    StateChanged { from: DoorState, to: DoorState },

    /// The safety override forced the door open.
    ForcedOpen { from: DoorState },

    /// An obstacle appeared in the door path.
    ObstacleDetected,

    /// The door path is clear again.
    ObstacleCleared,

    /// The application service has started (carries initial state).
    Started(DoorState),
}

/// A point-in-time telemetry snapshot suitable for logging or transmission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryData {
    pub state: DoorState,
    pub ms_in_state: u64,
    pub obstacle_present: bool,
    pub active_motion_sensors: u8,
    pub motor_engaged: bool,
    pub status_light: StatusLight,
    pub alarm_active: bool,
    pub forced_open_count: u32,
    /// Control cycles executed since boot.
    pub cycles: u64,
}
