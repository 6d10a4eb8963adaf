//! Task timers, shift reservations and the workday clock for a content
//! production crew.
//!
//! All state lives in memory for one session. Callers pass the current time
//! into every operation, so the state machines are deterministic.

pub mod config;
pub mod console;
pub mod domain;
pub mod error;
pub mod ticker;
pub mod workday;

pub use error::StateError;
pub use workday::{ShiftPrompt, Snapshot, Workday};
