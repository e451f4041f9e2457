//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade (the ESP-IDF logger routes it to UART in production).

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::fsm::context::StatusLight;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(t) => {
                info!(
                    "TELEM | state={} for {}ms | obstacle={} motion={} | \
                     motor={} light={} alarm={} | overrides={} cycles={}",
                    t.state,
                    t.ms_in_state,
                    if t.obstacle_present { "YES" } else { "no" },
                    t.active_motion_sensors,
                    if t.motor_engaged { "ON" } else { "off" },
                    match t.status_light {
                        StatusLight::Safe => "SAFE",
                        StatusLight::Caution => "CAUTION",
                    },
                    if t.alarm_active { "ON" } else { "off" },
                    t.forced_open_count,
                    t.cycles,
                );
            }
            AppEvent::StateChanged { from, to } => {
                info!("STATE | {} -> {}", from, to);
            }
            AppEvent::ForcedOpen { from } => {
                warn!("OVERRIDE | obstacle, forced open from {}", from);
            }
            AppEvent::ObstacleDetected => {
                warn!("OBSTACLE | detected in door path");
            }
            AppEvent::ObstacleCleared => {
                info!("OBSTACLE | cleared");
            }
            AppEvent::Started(state) => {
                info!("START | initial_state={}", state);
            }
        }
    }
}
