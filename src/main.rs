//! Ventilation Door Controller: main entry point
//!
//! Hexagonal layout around a pure, polled control core.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter        LogEventSink      MonotonicClock       │
//! │  (Sensor+Actuator)      (EventSink)       (now_ms)             │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              AppService (I/O shell)                    │    │
//! │  │  DoorController · Safety · FSM                         │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  Fixed-period loop · Task watchdog · Obstacle ISR latches      │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_svc::hal::delay::FreeRtos;
use esp_idf_svc::hal::gpio::{AnyIOPin, Input, Output, PinDriver, Pull};
use heapless::Vec;
use log::{info, warn};

use ventdoor::adapters::hardware::HardwareAdapter;
use ventdoor::adapters::log_sink::LogEventSink;
use ventdoor::adapters::time::MonotonicClock;
use ventdoor::app::service::AppService;
use ventdoor::config::{MAX_OBSTACLE_SENSORS, SystemConfig};
use ventdoor::drivers::relay::RelayDriver;
use ventdoor::drivers::status_light::StatusLight;
use ventdoor::drivers::{isr, watchdog::Watchdog};
use ventdoor::error::Error;
use ventdoor::pins;
use ventdoor::sensors::SensorHub;
use ventdoor::sensors::motion::MotionSensor;
use ventdoor::sensors::obstacle::{ObstacleLatch, ObstacleSensor};

type InPin = PinDriver<'static, AnyIOPin, Input>;
type OutPin = PinDriver<'static, AnyIOPin, Output>;

/// Beam receivers pull the line LOW when the beam is broken.
const BEAM_ACTIVE_LOW: bool = true;

static OBSTACLE_LATCHES: [ObstacleLatch; MAX_OBSTACLE_SENSORS] =
    [const { ObstacleLatch::new() }; MAX_OBSTACLE_SENSORS];

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  VentDoor v{}                        ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let clock = MonotonicClock::new();
    let watchdog = Watchdog::new();

    // ── 2. Configuration ──────────────────────────────────────
    let config = load_config();
    info!("Config: {:?}", config);

    // ── 3. Peripherals ────────────────────────────────────────
    isr::init_isr_service()?;
    let sensor_hub = build_sensor_hub(&config)?;

    let active_low = config.relay_active_low;
    let mut hw = HardwareAdapter::new(
        sensor_hub,
        RelayDriver::new(output(pins::MOTOR_RELAY_GPIO)?, "motor", active_low),
        RelayDriver::new(output(pins::ALARM_RELAY_GPIO)?, "alarm", active_low),
        StatusLight::new(
            RelayDriver::new(output(pins::LIGHT_SAFE_RELAY_GPIO)?, "light-safe", active_low),
            RelayDriver::new(
                output(pins::LIGHT_CAUTION_RELAY_GPIO)?,
                "light-caution",
                active_low,
            ),
        ),
    );

    // ── 4. Application service ────────────────────────────────
    let mut sink = LogEventSink::new();
    let interval_ms = config.control_loop_interval_ms;
    let mut app = AppService::new(config, clock.now_ms());
    app.start(&mut hw, &mut sink);

    info!("System ready. Entering control loop ({}ms period).", interval_ms);

    // ── 5. Control loop ───────────────────────────────────────
    loop {
        let now_ms = clock.now_ms();
        app.tick(&mut hw, now_ms, &mut sink);
        app.emit_telemetry_if_due(now_ms, &mut sink);
        watchdog.feed();
        FreeRtos::delay_ms(interval_ms);
    }
}

/// Defaults, optionally overridden by JSON baked in at build time.
fn load_config() -> SystemConfig {
    let Some(json) = option_env!("VENTDOOR_CONFIG_JSON") else {
        info!("Config: built-in defaults");
        return SystemConfig::default();
    };
    match SystemConfig::from_json(json) {
        Ok(cfg) => {
            info!("Config: loaded from VENTDOOR_CONFIG_JSON");
            cfg
        }
        Err(e) => {
            warn!("VENTDOOR_CONFIG_JSON rejected ({}), using defaults", e);
            SystemConfig::default()
        }
    }
}

fn build_sensor_hub(config: &SystemConfig) -> Result<SensorHub<InPin>> {
    let obstacle_pins = pins::OBSTACLE_GPIOS
        .get(..config.obstacle_sensor_count as usize)
        .ok_or(Error::Config("more obstacle sensors than wired inputs"))?;
    let motion_pins = pins::MOTION_GPIOS
        .get(..config.motion_sensor_count as usize)
        .ok_or(Error::Config("more motion sensors than wired inputs"))?;

    let mut obstacles = Vec::new();
    for (i, (&gpio, latch)) in obstacle_pins.iter().zip(&OBSTACLE_LATCHES).enumerate() {
        let mut pin = input(gpio)?;
        pin.set_pull(Pull::Up)?;
        let sensor = match isr::attach_obstacle_latch(gpio, BEAM_ACTIVE_LOW, latch) {
            Ok(()) => ObstacleSensor::new(pin, i as u8, BEAM_ACTIVE_LOW).with_latch(latch),
            Err(e) => {
                warn!("{} on GPIO{}, polling only", e, gpio);
                ObstacleSensor::new(pin, i as u8, BEAM_ACTIVE_LOW)
            }
        };
        if obstacles.push(sensor).is_err() {
            return Err(Error::Init("obstacle sensor table full").into());
        }
    }

    let mut motions = Vec::new();
    for (i, &gpio) in motion_pins.iter().enumerate() {
        let mut pin = input(gpio)?;
        pin.set_pull(Pull::Down)?;
        if motions.push(MotionSensor::new(pin, i as u8)).is_err() {
            return Err(Error::Init("motion sensor table full").into());
        }
    }

    Ok(SensorHub::new(
        obstacles,
        motions,
        config.motion_sensitivity_threshold,
    ))
}

fn input(gpio: i32) -> Result<InPin> {
    // SAFETY: each GPIO number in `pins` is claimed by exactly one driver.
    let pin = unsafe { AnyIOPin::new(gpio) };
    Ok(PinDriver::input(pin)?)
}

fn output(gpio: i32) -> Result<OutPin> {
    // SAFETY: as for `input`.
    let pin = unsafe { AnyIOPin::new(gpio) };
    Ok(PinDriver::output(pin)?)
}
