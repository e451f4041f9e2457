//! Mock hardware adapter for integration tests.
//!
//! Plays back scripted sensor snapshots and records every actuator call,
//! so tests can assert on the full command history without touching
//! real GPIO.

use ventdoor::app::events::AppEvent;
use ventdoor::app::ports::{ActuatorPort, EventSink, SensorPort};
use ventdoor::fsm::context::{SensorSnapshot, StatusLight};

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum ActuatorCall {
    SetMotor(bool),
    SetStatusLight(StatusLight),
    SetAlarm(bool),
    AllOff,
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub calls: Vec<ActuatorCall>,
    pub obstacle: bool,
    pub active_motion: u8,
    pub threshold: u8,
    pub reads: usize,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new(threshold: u8) -> Self {
        Self {
            calls: Vec::new(),
            obstacle: false,
            active_motion: 0,
            threshold,
            reads: 0,
        }
    }

    /// Script the inputs returned by the next `read_all`.
    pub fn set_inputs(&mut self, obstacle: bool, active_motion: u8) {
        self.obstacle = obstacle;
        self.active_motion = active_motion;
    }

    pub fn motor_on(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActuatorCall::SetMotor(on) => Some(*on),
                ActuatorCall::AllOff => Some(false),
                _ => None,
            })
            .unwrap_or(false)
    }

    pub fn alarm_on(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActuatorCall::SetAlarm(on) => Some(*on),
                ActuatorCall::AllOff => Some(false),
                _ => None,
            })
            .unwrap_or(false)
    }

    pub fn light(&self) -> Option<StatusLight> {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActuatorCall::SetStatusLight(l) => Some(Some(*l)),
                ActuatorCall::AllOff => Some(None),
                _ => None,
            })
            .flatten()
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }
}

impl SensorPort for MockHardware {
    fn read_all(&mut self) -> SensorSnapshot {
        self.reads += 1;
        SensorSnapshot::new(self.obstacle, self.active_motion, self.threshold)
    }
}

impl ActuatorPort for MockHardware {
    fn set_motor(&mut self, engaged: bool) {
        self.calls.push(ActuatorCall::SetMotor(engaged));
    }

    fn set_status_light(&mut self, light: StatusLight) {
        self.calls.push(ActuatorCall::SetStatusLight(light));
    }

    fn set_alarm(&mut self, active: bool) {
        self.calls.push(ActuatorCall::SetAlarm(active));
    }

    fn all_off(&mut self) {
        self.calls.push(ActuatorCall::AllOff);
    }
}

// ── LogSink ───────────────────────────────────────────────────

/// Collects every emitted event for later inspection.
#[derive(Default)]
pub struct LogSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&mut self) -> Vec<AppEvent> {
        core::mem::take(&mut self.events)
    }
}

impl EventSink for LogSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
