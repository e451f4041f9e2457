//! System configuration parameters
//!
//! All tunable parameters for the ventilation door controller.  The
//! configuration is fixed for the lifetime of the process: it is built at
//! boot from defaults, optionally overridden by a JSON blob baked in at
//! build time, validated once, and never mutated afterwards.

use serde::{Deserialize, Serialize};

/// Maximum number of obstacle (beam) sensors the sensor hub can aggregate.
pub const MAX_OBSTACLE_SENSORS: usize = 4;
/// Maximum number of motion (PIR) sensors the sensor hub can aggregate.
pub const MAX_MOTION_SENSORS: usize = 4;
/// Task watchdog timeout.  The control loop must feed it well inside this.
pub const WATCHDOG_TIMEOUT_MS: u32 = 2_000;

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    // --- Door timing ---
    /// Time for the door to travel fully open or fully closed (milliseconds)
    pub door_travel_time_ms: u64,
    /// How long the door stays open after the last detected motion (milliseconds)
    pub door_open_dwell_time_ms: u64,

    // --- Sensors ---
    /// Number of motion sensors that must fire together to count as motion
    pub motion_sensitivity_threshold: u8,
    /// Number of wired obstacle sensors
    pub obstacle_sensor_count: u8,
    /// Number of wired motion sensors
    pub motion_sensor_count: u8,

    // --- Actuators ---
    /// Relay boards that energise on a LOW input
    pub relay_active_low: bool,

    // --- Timing ---
    /// Control loop polling interval (milliseconds)
    pub control_loop_interval_ms: u32,
    /// Telemetry report interval (milliseconds)
    pub telemetry_interval_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Door timing
            door_travel_time_ms: 15_000,
            door_open_dwell_time_ms: 10_000,

            // Sensors
            motion_sensitivity_threshold: 1,
            obstacle_sensor_count: 2,
            motion_sensor_count: 3,

            // Actuators
            relay_active_low: true,

            // Timing
            control_loop_interval_ms: 50,  // 20 Hz
            telemetry_interval_ms: 60_000, // 1/min
        }
    }
}

/// Errors raised while building or validating a [`SystemConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The override blob was not valid JSON for this schema.
    Parse,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Parse => write!(f, "config parse failed"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}

impl SystemConfig {
    /// Parse a JSON override.  Fields absent from `json` keep their
    /// default values.  The result is validated before it is returned.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|_| ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject out-of-range values.  Nothing is clamped: a bad value is a
    /// wiring or provisioning mistake that must be fixed at the source.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.door_travel_time_ms == 0 {
            return Err(ConfigError::ValidationFailed(
                "door_travel_time_ms must be > 0",
            ));
        }
        if self.door_open_dwell_time_ms == 0 {
            return Err(ConfigError::ValidationFailed(
                "door_open_dwell_time_ms must be > 0",
            ));
        }
        if self.obstacle_sensor_count == 0
            || self.obstacle_sensor_count as usize > MAX_OBSTACLE_SENSORS
        {
            return Err(ConfigError::ValidationFailed(
                "obstacle_sensor_count out of range",
            ));
        }
        if self.motion_sensor_count == 0 || self.motion_sensor_count as usize > MAX_MOTION_SENSORS
        {
            return Err(ConfigError::ValidationFailed(
                "motion_sensor_count out of range",
            ));
        }
        if self.motion_sensitivity_threshold == 0 {
            return Err(ConfigError::ValidationFailed(
                "motion_sensitivity_threshold must be >= 1",
            ));
        }
        if self.motion_sensitivity_threshold > self.motion_sensor_count {
            return Err(ConfigError::ValidationFailed(
                "motion_sensitivity_threshold exceeds motion_sensor_count",
            ));
        }
        if self.control_loop_interval_ms == 0
            || u64::from(self.control_loop_interval_ms) >= self.door_travel_time_ms
        {
            return Err(ConfigError::ValidationFailed(
                "control_loop_interval_ms must be > 0 and < door_travel_time_ms",
            ));
        }
        if self.control_loop_interval_ms >= WATCHDOG_TIMEOUT_MS / 2 {
            return Err(ConfigError::ValidationFailed(
                "control_loop_interval_ms must be < half the watchdog timeout",
            ));
        }
        if self.telemetry_interval_ms < self.control_loop_interval_ms {
            return Err(ConfigError::ValidationFailed(
                "telemetry_interval_ms must be >= control_loop_interval_ms",
            ));
        }
        Ok(())
    }
}
