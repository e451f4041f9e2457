//! Application core: the I/O shell around the door controller.
//!
//! The pure control step lives in [`crate::controller`].  This module
//! wires it to the outside world through **port traits** defined in
//! [`ports`], keeping the whole loop testable without real relays.

pub mod events;
pub mod ports;
pub mod service;
