//! Application service: the thin I/O shell around the controller.
//!
//! [`AppService`] owns the [`DoorController`] and runs one polling cycle
//! per [`tick`](AppService::tick).  All I/O flows through port traits
//! injected at call sites, making the entire service testable with mock
//! adapters.
//!
//! ```text
//!  SensorPort ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                 │       AppService        │
//! ActuatorPort ◀──│  DoorController · FSM   │
//!                 └────────────────────────┘
//! ```

use log::info;

use crate::config::SystemConfig;
use crate::controller::{DoorController, DoorEvent};
use crate::fsm::DoorState;
use crate::fsm::context::ActuatorCommands;

use super::events::{AppEvent, TelemetryData};
use super::ports::{ActuatorPort, EventSink, SensorPort};

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates one control cycle at a time.
pub struct AppService {
    controller: DoorController,
    tick_count: u64,
    obstacle_seen: bool,
    last_telemetry_ms: u64,
}

impl AppService {
    /// Construct the service at boot time `now_ms`.
    pub fn new(config: SystemConfig, now_ms: u64) -> Self {
        Self {
            controller: DoorController::new(config, now_ms),
            tick_count: 0,
            obstacle_seen: false,
            last_telemetry_ms: now_ms,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Drive every relay to the boot state and announce start-up.
    pub fn start(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        hw.all_off();
        Self::apply_actuators(&self.controller.commands(), hw);
        sink.emit(&AppEvent::Started(self.controller.state()));
        info!("AppService started in {}", self.controller.state());
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Run one full control cycle: read sensors → evaluate → actuators → events.
    ///
    /// The `hw` parameter satisfies **both** [`SensorPort`] and
    /// [`ActuatorPort`], which avoids a double mutable borrow while
    /// keeping the port boundary explicit.
    pub fn tick(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        now_ms: u64,
        sink: &mut impl EventSink,
    ) -> DoorState {
        self.tick_count += 1;

        // 1. One consistent snapshot for the whole cycle
        let snapshot = hw.read_all();

        // 2. Pure control step
        let (state, commands) = self.controller.evaluate(&snapshot, now_ms);

        // 3. Re-issue every output, every cycle
        Self::apply_actuators(&commands, hw);

        // 4. Diagnostics
        if snapshot.obstacle_present != self.obstacle_seen {
            self.obstacle_seen = snapshot.obstacle_present;
            sink.emit(&if snapshot.obstacle_present {
                AppEvent::ObstacleDetected
            } else {
                AppEvent::ObstacleCleared
            });
        }
        for event in self.controller.events() {
            sink.emit(&match *event {
                DoorEvent::ForcedOpen { from } => AppEvent::ForcedOpen { from },
                DoorEvent::Transition(change) => AppEvent::StateChanged {
                    from: change.from,
                    to: change.to,
                },
            });
        }

        state
    }

    /// Emit a telemetry event if `telemetry_interval_ms` has passed since
    /// the last one.  Returns `true` if one was emitted.
    pub fn emit_telemetry_if_due(&mut self, now_ms: u64, sink: &mut impl EventSink) -> bool {
        let interval = u64::from(self.controller.config().telemetry_interval_ms);
        if now_ms.saturating_sub(self.last_telemetry_ms) < interval {
            return false;
        }
        self.last_telemetry_ms = now_ms;
        sink.emit(&AppEvent::Telemetry(self.build_telemetry()));
        true
    }

    // ── Queries ───────────────────────────────────────────────

    /// Build a telemetry snapshot from the last evaluated cycle.
    pub fn build_telemetry(&self) -> TelemetryData {
        let snap = self.controller.last_snapshot();
        let cmds = self.controller.commands();
        TelemetryData {
            state: self.controller.state(),
            ms_in_state: self.controller.ms_in_state(),
            obstacle_present: snap.obstacle_present,
            active_motion_sensors: snap.active_motion_sensors,
            motor_engaged: cmds.motor_engaged,
            status_light: cmds.status_light,
            alarm_active: cmds.alarm_active,
            forced_open_count: self.controller.forced_open_count(),
            cycles: self.tick_count,
        }
    }

    /// Current door state.
    pub fn state(&self) -> DoorState {
        self.controller.state()
    }

    /// Read-only access to the controller.
    pub fn controller(&self) -> &DoorController {
        &self.controller
    }

    // ── Internal ──────────────────────────────────────────────

    fn apply_actuators(cmds: &ActuatorCommands, hw: &mut impl ActuatorPort) {
        hw.set_motor(cmds.motor_engaged);
        hw.set_status_light(cmds.status_light);
        hw.set_alarm(cmds.alarm_active);
    }
}
