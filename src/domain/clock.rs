use super::enums::ClockStatus;
use super::timer::span;
use crate::error::StateError;
use chrono::{DateTime, Duration, Local};

/// The workday clock: one clock-in/clock-out session at a time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClockSession {
    pub clocked_in: bool,
    pub clock_in_at: Option<DateTime<Local>>,
    pub clock_out_at: Option<DateTime<Local>>,
}

impl ClockSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> ClockStatus {
        if self.clocked_in {
            ClockStatus::In
        } else {
            ClockStatus::Out
        }
    }

    /// Start a new session. Clears any previous clock-out time.
    pub fn clock_in(&mut self, now: DateTime<Local>) -> Result<(), StateError> {
        if self.clocked_in {
            return Err(StateError::AlreadyClockedIn);
        }
        self.clocked_in = true;
        self.clock_in_at = Some(now);
        self.clock_out_at = None;
        Ok(())
    }

    /// End the current session
    pub fn clock_out(&mut self, now: DateTime<Local>) -> Result<(), StateError> {
        if !self.clocked_in {
            return Err(StateError::NotClockedIn);
        }
        self.clocked_in = false;
        self.clock_out_at = Some(now);
        Ok(())
    }

    /// Running time of the open session
    pub fn elapsed(&self, now: DateTime<Local>) -> Option<Duration> {
        if !self.clocked_in {
            return None;
        }
        self.clock_in_at.map(|start| span(start, now))
    }

    /// Length of the last closed session
    pub fn total(&self) -> Option<Duration> {
        if self.clocked_in {
            return None;
        }
        match (self.clock_in_at, self.clock_out_at) {
            (Some(start), Some(end)) => Some(span(start, end)),
            _ => None,
        }
    }
}
