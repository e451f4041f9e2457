//! Full-stack tests: `AppService` driving the real `HardwareAdapter`
//! (sensor hub, relay drivers, status lamps) over in-memory pins, with
//! events routed to the production `LogEventSink`.

use std::cell::Cell;
use std::rc::Rc;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use heapless::Vec;

use ventdoor::adapters::hardware::HardwareAdapter;
use ventdoor::adapters::log_sink::LogEventSink;
use ventdoor::app::service::AppService;
use ventdoor::config::SystemConfig;
use ventdoor::drivers::relay::RelayDriver;
use ventdoor::drivers::status_light::StatusLight as StatusLamps;
use ventdoor::fsm::DoorState;
use ventdoor::fsm::context::StatusLight;
use ventdoor::sensors::SensorHub;
use ventdoor::sensors::motion::MotionSensor;
use ventdoor::sensors::obstacle::{ObstacleLatch, ObstacleSensor};

// ── Pin doubles ───────────────────────────────────────────────

/// One wire shared between the test and the driver under test.
#[derive(Clone, Default)]
struct Wire(Rc<Cell<bool>>);

impl Wire {
    fn high() -> Self {
        Self(Rc::new(Cell::new(true)))
    }

    fn set(&self, level: bool) {
        self.0.set(level);
    }

    fn get(&self) -> bool {
        self.0.get()
    }
}

impl ErrorType for Wire {
    type Error = core::convert::Infallible;
}

impl InputPin for Wire {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.0.get())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.0.get())
    }
}

impl OutputPin for Wire {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.set(true);
        Ok(())
    }
}

// ── Rig ───────────────────────────────────────────────────────

struct Rig {
    beams: [Wire; 2],
    pirs: [Wire; 3],
    motor: Wire,
    alarm: Wire,
    safe: Wire,
    caution: Wire,
    hw: HardwareAdapter<Wire, Wire>,
}

/// Relays are wired active-low, as on the production board.
fn rig(config: &SystemConfig, latch: Option<&'static ObstacleLatch>) -> Rig {
    let beams = [Wire::high(), Wire::high()];
    let pirs = [Wire::default(), Wire::default(), Wire::default()];
    let (motor, alarm, safe, caution) = (
        Wire::default(),
        Wire::default(),
        Wire::default(),
        Wire::default(),
    );

    let mut obstacles = Vec::new();
    for (i, wire) in beams.iter().enumerate() {
        let mut sensor = ObstacleSensor::new(wire.clone(), i as u8, true);
        if let (0, Some(latch)) = (i, latch) {
            sensor = sensor.with_latch(latch);
        }
        assert!(obstacles.push(sensor).is_ok());
    }
    let mut motions = Vec::new();
    for (i, wire) in pirs.iter().enumerate() {
        assert!(motions.push(MotionSensor::new(wire.clone(), i as u8)).is_ok());
    }

    let hw = HardwareAdapter::new(
        SensorHub::new(obstacles, motions, config.motion_sensitivity_threshold),
        RelayDriver::new(motor.clone(), "motor", true),
        RelayDriver::new(alarm.clone(), "alarm", true),
        StatusLamps::new(
            RelayDriver::new(safe.clone(), "light-safe", true),
            RelayDriver::new(caution.clone(), "light-caution", true),
        ),
    );

    Rig {
        beams,
        pirs,
        motor,
        alarm,
        safe,
        caution,
        hw,
    }
}

fn start(config: SystemConfig, rig: &mut Rig, sink: &mut LogEventSink) -> AppService {
    let mut app = AppService::new(config, 0);
    app.start(&mut rig.hw, sink);
    app
}

// ── Tests ─────────────────────────────────────────────────────

#[test]
fn boot_energises_only_the_caution_lamp() {
    let config = SystemConfig::default();
    let mut r = rig(&config, None);
    let mut sink = LogEventSink::new();
    let _app = start(config, &mut r, &mut sink);

    // Active-low: released = HIGH.
    assert!(r.motor.get());
    assert!(r.alarm.get());
    assert!(r.safe.get());
    assert!(!r.caution.get());
}

#[test]
fn full_cycle_through_real_drivers() {
    let config = SystemConfig {
        motion_sensitivity_threshold: 2,
        ..SystemConfig::default()
    };
    let mut r = rig(&config, None);
    let mut sink = LogEventSink::new();
    let mut app = start(config, &mut r, &mut sink);

    // One PIR is below the threshold of two.
    r.pirs[0].set(true);
    assert_eq!(app.tick(&mut r.hw, 0, &mut sink), DoorState::Closed);

    r.pirs[2].set(true);
    assert_eq!(app.tick(&mut r.hw, 50, &mut sink), DoorState::Opening);
    assert!(!r.motor.get(), "motor relay energised");
    assert!(r.hw.motor_engaged());

    r.pirs[0].set(false);
    r.pirs[2].set(false);
    assert_eq!(app.tick(&mut r.hw, 15_050, &mut sink), DoorState::Open);
    assert_eq!(r.hw.status_light(), Some(StatusLight::Safe));
    assert!(!r.safe.get());
    assert!(r.caution.get());

    // Broken beam sounds the alarm but keeps the door open.
    r.beams[1].set(false);
    assert_eq!(app.tick(&mut r.hw, 30_000, &mut sink), DoorState::Open);
    assert!(!r.alarm.get(), "alarm relay energised");

    r.beams[1].set(true);
    assert_eq!(app.tick(&mut r.hw, 30_050, &mut sink), DoorState::Closing);
    assert!(r.motor.get(), "motor released while closing");
    assert!(r.alarm.get());
    assert_eq!(r.hw.status_light(), Some(StatusLight::Caution));

    assert!(app.emit_telemetry_if_due(60_000, &mut sink));
}

#[test]
fn latched_beam_break_reverses_closing_door() {
    static LATCH: ObstacleLatch = ObstacleLatch::new();

    let config = SystemConfig::default();
    let mut r = rig(&config, Some(&LATCH));
    let mut sink = LogEventSink::new();
    let mut app = start(config, &mut r, &mut sink);

    r.pirs[1].set(true);
    app.tick(&mut r.hw, 0, &mut sink);
    r.pirs[1].set(false);
    app.tick(&mut r.hw, 15_000, &mut sink);
    assert_eq!(app.tick(&mut r.hw, 25_000, &mut sink), DoorState::Closing);

    // A break shorter than one loop period: the beam reads intact again
    // by the time the hub samples it.
    LATCH.set_from_isr();
    assert_eq!(app.tick(&mut r.hw, 25_050, &mut sink), DoorState::Opening);
    assert_eq!(app.controller().forced_open_count(), 1);

    // The latch is consumed by that read.
    assert_eq!(app.tick(&mut r.hw, 25_100, &mut sink), DoorState::Opening);
    assert!(!app.controller().last_snapshot().obstacle_present);
}
