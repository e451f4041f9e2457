//! Controller state threaded through every FSM handler.
//!
//! `FsmContext` holds the persistent controller state (timestamps,
//! configuration) together with the inputs of the cycle being evaluated.
//! State handlers read from it and the engine writes the timestamps; the
//! actuator outputs are derived from the final state after each cycle.

use crate::config::SystemConfig;

use super::DoorState;

// ---------------------------------------------------------------------------
// Sensor snapshot (read-only to state handlers; written by the sensor hub)
// ---------------------------------------------------------------------------

/// A consistent, point-in-time view of every door sensor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SensorSnapshot {
    /// True if any obstacle sensor reports an object in the door's path.
    pub obstacle_present: bool,
    /// Number of motion sensors currently signalling presence.
    pub active_motion_sensors: u8,
    /// `active_motion_sensors >= motion_sensitivity_threshold`.
    pub motion_detected: bool,
}

impl SensorSnapshot {
    /// Build a snapshot, deriving `motion_detected` from the threshold.
    pub fn new(obstacle_present: bool, active_motion_sensors: u8, threshold: u8) -> Self {
        Self {
            obstacle_present,
            active_motion_sensors,
            motion_detected: active_motion_sensors >= threshold,
        }
    }
}

// ---------------------------------------------------------------------------
// Actuator commands (derived from the final state of each cycle)
// ---------------------------------------------------------------------------

/// Status lamp indication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLight {
    /// Door fully open, safe to pass.
    Safe,
    /// Door closed or moving.
    Caution,
}

/// Commands the I/O shell applies to the relays every cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActuatorCommands {
    /// Motor contactor energised (drive toward / hold open).
    pub motor_engaged: bool,
    /// Status lamp indication.
    pub status_light: StatusLight,
    /// Alarm buzzer sounding.
    pub alarm_active: bool,
}

impl Default for ActuatorCommands {
    fn default() -> Self {
        Self::all_off()
    }
}

impl ActuatorCommands {
    /// All actuators off.
    pub const fn all_off() -> Self {
        Self {
            motor_engaged: false,
            status_light: StatusLight::Caution,
            alarm_active: false,
        }
    }

    /// Derive outputs from the final door state of a cycle.
    ///
    /// Motor and lamp follow the state; the buzzer follows the obstacle
    /// input directly, whatever the state.
    pub const fn derive(state: DoorState, obstacle_present: bool) -> Self {
        Self {
            motor_engaged: matches!(state, DoorState::Opening | DoorState::Open),
            status_light: if matches!(state, DoorState::Open) {
                StatusLight::Safe
            } else {
                StatusLight::Caution
            },
            alarm_active: obstacle_present,
        }
    }
}

// ---------------------------------------------------------------------------
// FsmContext
// ---------------------------------------------------------------------------

/// The shared context passed to every state handler function.
#[derive(Debug, Clone)]
pub struct FsmContext {
    // -- Timing --
    /// Timestamp of the cycle being evaluated (ms, monotonic).
    pub now_ms: u64,
    /// When the current state was entered (ms).
    pub state_entered_at: u64,
    /// Last cycle in which motion was detected; `None` = never.
    pub last_motion_at: Option<u64>,

    // -- Sensor data --
    /// Snapshot for the cycle being evaluated.
    pub sensors: SensorSnapshot,

    // -- Configuration --
    pub config: SystemConfig,
}

impl FsmContext {
    /// Create a fresh context at boot time `now_ms`.
    pub fn new(config: SystemConfig, now_ms: u64) -> Self {
        Self {
            now_ms,
            state_entered_at: now_ms,
            last_motion_at: None,
            sensors: SensorSnapshot::default(),
            config,
        }
    }

    /// Milliseconds since the current state was entered.
    pub fn ms_in_state(&self) -> u64 {
        self.now_ms.saturating_sub(self.state_entered_at)
    }

    /// True once the door has had a full travel time in the current state.
    pub fn travel_elapsed(&self) -> bool {
        self.ms_in_state() >= self.config.door_travel_time_ms
    }

    /// True once the open dwell has run out since the last motion.
    /// With no motion ever recorded the dwell counts as expired.
    pub fn dwell_elapsed(&self) -> bool {
        self.last_motion_at.is_none_or(|at| {
            self.now_ms.saturating_sub(at) >= self.config.door_open_dwell_time_ms
        })
    }
}
