use super::clock::ClockSession;
use super::enums::{TaskStatus, TimerPhase};
use super::roster::TaskEntry;
use super::timer::TimerState;
use chrono::Duration;

/// Format a duration as zero-padded "HH:MM:SS". Hours are not wrapped.
pub fn format_duration(duration: Duration) -> String {
    let total_seconds = std::cmp::max(0, duration.num_seconds());
    let hours = total_seconds / 3600;
    let minutes = (total_seconds / 60) % 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Badge text for a task timer
pub fn timer_badge(state: &TimerState) -> &'static str {
    match state.phase() {
        TimerPhase::Idle => "▶ START",
        TimerPhase::Running => "■ STOP",
        TimerPhase::Completed => "✓ DONE",
    }
}

/// Status to display for a task: a completed timer overrides the nominal status
pub fn effective_status(task: &TaskEntry, state: &TimerState) -> TaskStatus {
    if state.completed {
        TaskStatus::Completed
    } else {
        task.status
    }
}

/// One of the two clock pseudo-tasks shown at the top of the day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockRow {
    pub name: &'static str,
    pub status: TaskStatus,
    /// Whether the row's action is currently available
    pub enabled: bool,
}

/// Build the "Clock In" and "Clock Out" rows for the current session
pub fn clock_rows(clock: &ClockSession) -> [ClockRow; 2] {
    let clock_in = ClockRow {
        name: "Clock In",
        status: if clock.clocked_in {
            TaskStatus::Completed
        } else {
            TaskStatus::NotStarted
        },
        enabled: !clock.clocked_in,
    };

    let clock_out = ClockRow {
        name: "Clock Out",
        status: if clock.clock_out_at.is_some() {
            TaskStatus::Completed
        } else if clock.clocked_in {
            TaskStatus::InProgress
        } else {
            TaskStatus::NotStarted
        },
        enabled: clock.clocked_in,
    };

    [clock_in, clock_out]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    fn create_task(status: TaskStatus) -> TaskEntry {
        TaskEntry {
            id: 1,
            name: "Photo Editing".to_string(),
            status,
            due_date: None,
        }
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::zero()), "00:00:00");
        assert_eq!(format_duration(Duration::seconds(3723)), "01:02:03");
        assert_eq!(format_duration(Duration::hours(27)), "27:00:00");
        assert_eq!(format_duration(Duration::milliseconds(59_999)), "00:00:59");
    }

    #[test]
    fn test_format_negative_duration_clamps() {
        assert_eq!(format_duration(Duration::seconds(-5)), "00:00:00");
    }

    #[test]
    fn test_timer_badge() {
        let mut state = TimerState::default();
        assert_eq!(timer_badge(&state), "▶ START");

        state.is_running = true;
        assert_eq!(timer_badge(&state), "■ STOP");

        state.is_running = false;
        state.completed = true;
        assert_eq!(timer_badge(&state), "✓ DONE");
    }

    #[test]
    fn test_effective_status() {
        let task = create_task(TaskStatus::InProgress);
        let mut state = TimerState::default();
        assert_eq!(effective_status(&task, &state), TaskStatus::InProgress);

        state.completed = true;
        assert_eq!(effective_status(&task, &state), TaskStatus::Completed);
    }

    #[test]
    fn test_clock_rows_follow_session() {
        let mut clock = ClockSession::new();
        let [clock_in, clock_out] = clock_rows(&clock);
        assert_eq!(clock_in.status, TaskStatus::NotStarted);
        assert!(clock_in.enabled);
        assert_eq!(clock_out.status, TaskStatus::NotStarted);
        assert!(!clock_out.enabled);

        let start = Local.with_ymd_and_hms(2024, 1, 25, 9, 0, 0).unwrap();
        clock.clock_in(start).unwrap();
        let [clock_in, clock_out] = clock_rows(&clock);
        assert_eq!(clock_in.status, TaskStatus::Completed);
        assert!(!clock_in.enabled);
        assert_eq!(clock_out.status, TaskStatus::InProgress);
        assert!(clock_out.enabled);

        clock.clock_out(start + Duration::hours(8)).unwrap();
        let [_, clock_out] = clock_rows(&clock);
        assert_eq!(clock_out.status, TaskStatus::Completed);
    }
}
