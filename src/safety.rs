//! Safety supervisor.
//!
//! The supervisor runs **every cycle before the FSM**.  It owns the one
//! rule that outranks every timer and motion input: while something is
//! in the door's path, a door that is closed or closing must be driven
//! open.
//!
//! ## Obstacle lifecycle
//!
//! 1. A beam sensor breaks; the snapshot reports `obstacle_present`.
//! 2. The supervisor logs the rising edge and, if the door is `Closed`
//!    or `Closing`, requests a forced transition to `Opening`.
//! 3. `Opening` and `Open` already keep the door moving away from the
//!    obstacle, so no override is requested there; `Open` additionally
//!    withholds its dwell-driven close while the obstacle remains.
//! 4. When the beam clears, the supervisor logs the falling edge.  The
//!    door then follows the ordinary transitions again.

use crate::fsm::DoorState;
use crate::fsm::context::SensorSnapshot;
use log::{error, info, warn};

/// Safety supervisor.
#[derive(Debug, Default)]
pub struct SafetySupervisor {
    /// Obstacle state seen on the previous cycle (for edge logging).
    obstacle_latched: bool,
    /// Forced-open overrides issued since boot.
    forced_open_count: u32,
}

impl SafetySupervisor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate the override rule against this cycle's snapshot.
    ///
    /// Returns `true` when the door must be forced to `Opening`.
    pub fn evaluate(&mut self, snap: &SensorSnapshot, current: DoorState) -> bool {
        self.track_obstacle(snap.obstacle_present);

        let override_required = snap.obstacle_present
            && !matches!(current, DoorState::Opening | DoorState::Open);

        if override_required {
            self.forced_open_count = self.forced_open_count.saturating_add(1);
            warn!("SAFETY OVERRIDE: obstacle while {current}, forcing door open");
        }
        override_required
    }

    /// Forced-open overrides issued since boot.
    pub fn forced_open_count(&self) -> u32 {
        self.forced_open_count
    }

    // ── Internal ──────────────────────────────────────────────────

    fn track_obstacle(&mut self, present: bool) {
        if present && !self.obstacle_latched {
            error!("SAFETY: obstacle detected in door path");
        } else if !present && self.obstacle_latched {
            info!("SAFETY: door path clear");
        }
        self.obstacle_latched = present;
    }
}
