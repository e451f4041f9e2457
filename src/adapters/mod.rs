//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements   | Connects to                  |
//! |------------|--------------|------------------------------|
//! | `hardware` | SensorPort   | beam + PIR inputs (GPIO)     |
//! |            | ActuatorPort | motor / lamp / alarm relays  |
//! | `log_sink` | EventSink    | Serial log output            |
//! | `time`     | —            | ESP32 system timer           |

pub mod hardware;
pub mod log_sink;
pub mod time;
