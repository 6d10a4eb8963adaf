//! Errors returned by the timer, reservation and clock state machines.

use crate::domain::TaskId;
use thiserror::Error;

/// A refused state transition. All variants are local and recoverable; the
/// caller decides how to surface them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    /// Shift already held by someone else.
    #[error("Shift {shift} is already reserved by {holder}")]
    AlreadyReserved { shift: String, holder: String },

    /// Release requested on a shift nobody holds.
    #[error("Shift {0} is not reserved")]
    NotReserved(String),

    #[error("Already clocked in")]
    AlreadyClockedIn,

    #[error("Not clocked in")]
    NotClockedIn,

    /// Task timers are disabled until the workday clock is running.
    #[error("Clock in before starting task timers")]
    ClockInRequired,

    #[error("Task not found: {0}")]
    UnknownTask(TaskId),

    #[error("Shift not found: {0}")]
    UnknownShift(String),

    /// A new shift reused an id already in the roster.
    #[error("Shift {0} already exists")]
    DuplicateShift(String),
}

impl StateError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            Self::AlreadyReserved { .. } => "already_reserved",
            Self::NotReserved(_) => "not_reserved",
            Self::AlreadyClockedIn => "already_clocked_in",
            Self::NotClockedIn => "not_clocked_in",
            Self::ClockInRequired => "clock_in_required",
            Self::UnknownTask(_) => "unknown_task",
            Self::UnknownShift(_) => "unknown_shift",
            Self::DuplicateShift(_) => "duplicate_shift",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(StateError::NotClockedIn.code(), "not_clocked_in");
        assert_eq!(StateError::NotReserved("a".into()).code(), "not_reserved");
        assert_eq!(StateError::UnknownTask(7).code(), "unknown_task");
        assert_eq!(StateError::DuplicateShift("1".into()).code(), "duplicate_shift");
    }

    #[test]
    fn test_error_display() {
        let err = StateError::AlreadyReserved {
            shift: "shiftA".to_string(),
            holder: "Alice".to_string(),
        };
        assert_eq!(err.to_string(), "Shift shiftA is already reserved by Alice");
        assert_eq!(StateError::AlreadyClockedIn.to_string(), "Already clocked in");
        assert_eq!(StateError::DuplicateShift("4".into()).to_string(), "Shift 4 already exists");
    }
}
