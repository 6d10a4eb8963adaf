use serde::{Deserialize, Serialize};

/// Lifecycle phase of a task timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerPhase {
    Idle,
    Running,
    Completed,
}

impl TimerPhase {
    /// Convert phase to its tag
    pub fn to_tag(&self) -> &'static str {
        match self {
            Self::Idle => "IDLE",
            Self::Running => "RUNNING",
            Self::Completed => "COMPLETED",
        }
    }

    /// Terminal phases accept no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Nominal status of a task as recorded in the roster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    NotStarted,
    InProgress,
    Completed,
    Blocked,
}

impl TaskStatus {
    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::NotStarted => "Not Started",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Blocked => "Blocked",
        }
    }
}

/// Whether the workday clock is running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockStatus {
    Out,
    In,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_phase_to_tag() {
        assert_eq!(TimerPhase::Idle.to_tag(), "IDLE");
        assert_eq!(TimerPhase::Running.to_tag(), "RUNNING");
        assert_eq!(TimerPhase::Completed.to_tag(), "COMPLETED");
    }

    #[test]
    fn test_timer_phase_is_terminal() {
        assert!(!TimerPhase::Idle.is_terminal());
        assert!(!TimerPhase::Running.is_terminal());
        assert!(TimerPhase::Completed.is_terminal());
    }

    #[test]
    fn test_task_status_serde_names() {
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
        let parsed: TaskStatus = serde_json::from_str("\"not_started\"").unwrap();
        assert_eq!(parsed, TaskStatus::NotStarted);
    }
}
