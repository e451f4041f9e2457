//! Function-pointer finite state machine engine for the door.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  StateTable                                  │
//! │  ┌─────────┬───────────┬───────────────────┐ │
//! │  │ State   │ on_enter  │ on_update         │ │
//! │  ├─────────┼───────────┼───────────────────┤ │
//! │  │ Closed  │ fn(ctx)   │ fn(ctx)->Option<> │ │
//! │  │ Opening │ fn(ctx)   │ fn(ctx)->Option<> │ │
//! │  │ Open    │ fn(ctx)   │ fn(ctx)->Option<> │ │
//! │  │ Closing │ fn(ctx)   │ fn(ctx)->Option<> │ │
//! │  └─────────┴───────────┴───────────────────┘ │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! Each cycle the engine calls `on_update` for the **current** state.
//! If it returns `Some(next)`, the engine stamps `state_entered_at`,
//! switches the current state and runs `on_enter` for the next one.
//! At most one ordinary transition happens per cycle.

pub mod context;
pub mod states;

use context::FsmContext;
use log::info;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Door position state.  Exactly one holds at any instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DoorState {
    Closed = 0,
    Opening = 1,
    Open = 2,
    Closing = 3,
}

impl DoorState {
    /// Total number of states, used to size the table array.
    pub const COUNT: usize = 4;

    /// Every state, in table order.
    pub const ALL: [Self; Self::COUNT] = [Self::Closed, Self::Opening, Self::Open, Self::Closing];
}

impl core::fmt::Display for DoorState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Self::Closed => "Closed",
            Self::Opening => "Opening",
            Self::Open => "Open",
            Self::Closing => "Closing",
        };
        f.write_str(name)
    }
}

/// A completed transition, reported back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateChange {
    pub from: DoorState,
    pub to: DoorState,
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter` actions.  Runs exactly once per transition.
pub type StateActionFn = fn(&FsmContext);

/// Signature for the per-cycle update handler.
/// Returns `Some(next)` to trigger a transition, or `None` to stay.
pub type StateUpdateFn = fn(&FsmContext) -> Option<DoorState>;

// ---------------------------------------------------------------------------
// State descriptor (one row in the table)
// ---------------------------------------------------------------------------

/// Static descriptor for a single FSM state.
/// Stored in a fixed-size array: no heap, no `dyn`.
pub struct StateDescriptor {
    pub id: DoorState,
    pub on_enter: Option<StateActionFn>,
    pub on_update: StateUpdateFn,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// The finite state machine engine.
pub struct Fsm {
    /// Fixed-size table indexed by `DoorState as usize`.
    table: [StateDescriptor; DoorState::COUNT],
    current: DoorState,
}

impl Fsm {
    /// Construct a new FSM with the given state table, starting in `initial`.
    pub fn new(table: [StateDescriptor; DoorState::COUNT], initial: DoorState) -> Self {
        debug_assert!(
            table.iter().enumerate().all(|(i, d)| d.id as usize == i),
            "state table out of order"
        );
        Self {
            table,
            current: initial,
        }
    }

    /// Run the initial `on_enter` for the starting state.
    /// Call once after construction, before the first `tick()`.
    pub fn start(&mut self, ctx: &mut FsmContext) {
        info!("FSM starting in state: {}", self.current);
        ctx.state_entered_at = ctx.now_ms;
        if let Some(enter) = self.descriptor().on_enter {
            enter(ctx);
        }
    }

    /// Evaluate the ordinary transition for the current state.
    pub fn tick(&mut self, ctx: &mut FsmContext) -> Option<StateChange> {
        let next = (self.descriptor().on_update)(ctx)?;
        Some(self.transition(next, ctx))
    }

    /// Force an immediate transition regardless of what `on_update` would
    /// return.  No-op if already in `next`.
    pub fn force_transition(&mut self, next: DoorState, ctx: &mut FsmContext) -> Option<StateChange> {
        (next != self.current).then(|| self.transition(next, ctx))
    }

    /// The current state.
    pub fn current_state(&self) -> DoorState {
        self.current
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn descriptor(&self) -> &StateDescriptor {
        &self.table[self.current as usize]
    }

    fn transition(&mut self, next: DoorState, ctx: &mut FsmContext) -> StateChange {
        let change = StateChange {
            from: self.current,
            to: next,
        };
        info!("FSM transition: {} -> {}", change.from, change.to);

        self.current = next;
        ctx.state_entered_at = ctx.now_ms;

        if let Some(enter) = self.descriptor().on_enter {
            enter(ctx);
        }
        change
    }
}
