//! Door controller: one deterministic step per polling cycle.
//!
//! [`DoorController`] owns the FSM, its context and the safety
//! supervisor.  It performs no I/O: the caller hands in one sensor
//! snapshot and the current monotonic time, and gets back the final door
//! state and the actuator commands for that cycle.
//!
//! Order of work inside [`DoorController::evaluate`]:
//!
//! 1. record motion (`last_motion_at = now`)
//! 2. safety override (`Closed`/`Closing` + obstacle → `Opening`)
//! 3. ordinary transition for the (possibly overridden) state
//! 4. derive outputs from the final state

use heapless::Vec;
use log::warn;

use crate::config::SystemConfig;
use crate::fsm::context::{ActuatorCommands, FsmContext, SensorSnapshot};
use crate::fsm::states::build_state_table;
use crate::fsm::{DoorState, Fsm, StateChange};
use crate::safety::SafetySupervisor;

/// Worst case per cycle: override (2 events) + one ordinary transition.
const MAX_EVENTS_PER_CYCLE: usize = 4;

/// Diagnostic events produced by a single cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorEvent {
    /// The safety supervisor forced the door open from `from`.
    ForcedOpen { from: DoorState },
    /// The door changed state.
    Transition(StateChange),
}

/// The per-cycle door control step and the state it persists.
pub struct DoorController {
    fsm: Fsm,
    ctx: FsmContext,
    safety: SafetySupervisor,
    commands: ActuatorCommands,
    events: Vec<DoorEvent, MAX_EVENTS_PER_CYCLE>,
}

impl DoorController {
    /// Create a controller at boot time `now_ms`: door `Closed`, entry
    /// stamped `now_ms`, no motion ever seen.
    pub fn new(config: SystemConfig, now_ms: u64) -> Self {
        let mut ctx = FsmContext::new(config, now_ms);
        let mut fsm = Fsm::new(build_state_table(), DoorState::Closed);
        fsm.start(&mut ctx);

        Self {
            fsm,
            ctx,
            safety: SafetySupervisor::new(),
            commands: ActuatorCommands::all_off(),
            events: Vec::new(),
        }
    }

    /// Run one control cycle.
    ///
    /// `now_ms` must be monotonically non-decreasing across calls.
    pub fn evaluate(&mut self, snapshot: &SensorSnapshot, now_ms: u64) -> (DoorState, ActuatorCommands) {
        self.events.clear();
        self.ctx.now_ms = now_ms;
        self.ctx.sensors = *snapshot;

        // 1. Motion refreshes the dwell clock.
        if snapshot.motion_detected {
            self.ctx.last_motion_at = Some(now_ms);
        }

        // 2. Safety override outranks every ordinary transition.
        let current = self.fsm.current_state();
        if self.safety.evaluate(snapshot, current) {
            if let Some(change) = self.fsm.force_transition(DoorState::Opening, &mut self.ctx) {
                self.record(DoorEvent::ForcedOpen { from: current });
                self.record(DoorEvent::Transition(change));
            }
        }

        // 3. Ordinary transition.
        if let Some(change) = self.fsm.tick(&mut self.ctx) {
            self.record(DoorEvent::Transition(change));
        }

        // 4. Outputs.
        let state = self.fsm.current_state();
        self.commands = ActuatorCommands::derive(state, snapshot.obstacle_present);
        (state, self.commands)
    }

    // ── Queries ───────────────────────────────────────────────

    /// Current door state.
    pub fn state(&self) -> DoorState {
        self.fsm.current_state()
    }

    /// Commands produced by the last cycle (all off before the first).
    pub fn commands(&self) -> ActuatorCommands {
        self.commands
    }

    /// Events produced by the last cycle, in order.
    pub fn events(&self) -> &[DoorEvent] {
        &self.events
    }

    /// Timestamp at which the current state was entered.
    pub fn state_entered_at(&self) -> u64 {
        self.ctx.state_entered_at
    }

    /// Timestamp of the last cycle with motion, `None` if never.
    pub fn last_motion_at(&self) -> Option<u64> {
        self.ctx.last_motion_at
    }

    /// Milliseconds spent in the current state as of the last cycle.
    pub fn ms_in_state(&self) -> u64 {
        self.ctx.ms_in_state()
    }

    /// Snapshot evaluated by the last cycle.
    pub fn last_snapshot(&self) -> SensorSnapshot {
        self.ctx.sensors
    }

    /// Forced-open overrides since boot.
    pub fn forced_open_count(&self) -> u32 {
        self.safety.forced_open_count()
    }

    pub fn config(&self) -> &SystemConfig {
        &self.ctx.config
    }

    // ── Internal ──────────────────────────────────────────────

    fn record(&mut self, event: DoorEvent) {
        if self.events.push(event).is_err() {
            warn!("controller event buffer full, dropped {:?}", event);
        }
    }
}
