//! Concrete state handler functions and table builder.
//!
//! Each state is defined by plain `fn` pointers: no closures, no dynamic
//! dispatch, no heap.  Handlers only read the context; the engine owns
//! the timestamps and the current state.
//!
//! ```text
//!  CLOSED ──[motion]──▶ OPENING ──[travel elapsed]──▶ OPEN
//!    ▲                     ▲                            │
//!    │                     │                 [dwell elapsed && !obstacle]
//!    │                     │                            ▼
//!    └──[travel elapsed]── CLOSING ◀────────────────────┘
//!
//!  CLOSED / CLOSING ──[obstacle]──▶ OPENING   (safety override, see crate::safety)
//! ```

use super::context::FsmContext;
use super::{DoorState, StateDescriptor};
use log::info;

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table.  Called once at startup.
pub fn build_state_table() -> [StateDescriptor; DoorState::COUNT] {
    [
        // Index 0 — Closed
        StateDescriptor {
            id: DoorState::Closed,
            on_enter: Some(closed_enter),
            on_update: closed_update,
        },
        // Index 1 — Opening
        StateDescriptor {
            id: DoorState::Opening,
            on_enter: Some(opening_enter),
            on_update: opening_update,
        },
        // Index 2 — Open
        StateDescriptor {
            id: DoorState::Open,
            on_enter: Some(open_enter),
            on_update: open_update,
        },
        // Index 3 — Closing
        StateDescriptor {
            id: DoorState::Closing,
            on_enter: Some(closing_enter),
            on_update: closing_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  CLOSED — barrier sealed, waiting for traffic
// ═══════════════════════════════════════════════════════════════════════════

fn closed_enter(ctx: &FsmContext) {
    info!("CLOSED: door sealed at t={}ms", ctx.now_ms);
}

fn closed_update(ctx: &FsmContext) -> Option<DoorState> {
    ctx.sensors.motion_detected.then_some(DoorState::Opening)
}

// ═══════════════════════════════════════════════════════════════════════════
//  OPENING — motor driving the door up
// ═══════════════════════════════════════════════════════════════════════════

fn opening_enter(ctx: &FsmContext) {
    info!(
        "OPENING: motor engaged, {} active motion sensor(s), travel {}ms",
        ctx.sensors.active_motion_sensors, ctx.config.door_travel_time_ms
    );
}

fn opening_update(ctx: &FsmContext) -> Option<DoorState> {
    ctx.travel_elapsed().then_some(DoorState::Open)
}

// ═══════════════════════════════════════════════════════════════════════════
//  OPEN — door held up, dwell timer running from the last motion
// ═══════════════════════════════════════════════════════════════════════════

fn open_enter(ctx: &FsmContext) {
    info!(
        "OPEN: safe to pass, closing {}ms after last motion",
        ctx.config.door_open_dwell_time_ms
    );
}

fn open_update(ctx: &FsmContext) -> Option<DoorState> {
    if !ctx.dwell_elapsed() {
        return None;
    }

    // Dwell expired but something is in the opening: hold, and keep the
    // dwell clock as is so closing starts on the first clear cycle.
    if ctx.sensors.obstacle_present {
        return None;
    }

    Some(DoorState::Closing)
}

// ═══════════════════════════════════════════════════════════════════════════
//  CLOSING — motor released, door lowering
// ═══════════════════════════════════════════════════════════════════════════

fn closing_enter(ctx: &FsmContext) {
    info!(
        "CLOSING: dwell elapsed, lowering for {}ms",
        ctx.config.door_travel_time_ms
    );
}

fn closing_update(ctx: &FsmContext) -> Option<DoorState> {
    ctx.travel_elapsed().then_some(DoorState::Closed)
}
