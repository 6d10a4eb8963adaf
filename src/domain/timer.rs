use super::enums::TimerPhase;
use chrono::{DateTime, Duration, Local};
use std::collections::HashMap;

/// Task identifier as used by the roster
pub type TaskId = u32;

/// Timer state for a single task
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimerState {
    /// Whether the timer is currently active
    pub is_running: bool,
    /// Whether the task has been marked done (terminal)
    pub completed: bool,
    /// When the timer was started
    pub started_at: Option<DateTime<Local>>,
    /// Duration recorded at completion, never changed afterwards
    pub completed_duration: Option<Duration>,
}

impl TimerState {
    pub fn phase(&self) -> TimerPhase {
        if self.completed {
            TimerPhase::Completed
        } else if self.is_running {
            TimerPhase::Running
        } else {
            TimerPhase::Idle
        }
    }

    /// Elapsed time while running, None otherwise
    pub fn elapsed_since(&self, now: DateTime<Local>) -> Option<Duration> {
        if !self.is_running {
            return None;
        }
        self.started_at.map(|started| span(started, now))
    }
}

/// Non-negative span between two instants
pub(crate) fn span(from: DateTime<Local>, to: DateTime<Local>) -> Duration {
    std::cmp::max(Duration::zero(), to.signed_duration_since(from))
}

/// Per-task timers. Each task moves idle -> running -> completed and stays
/// completed.
#[derive(Debug, Clone, Default)]
pub struct TimerRegistry {
    timers: HashMap<TaskId, TimerState>,
}

impl TimerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the task's timer one step and return its new state.
    ///
    /// Idle starts running at `now`; running completes with `now - started_at`.
    /// A completed task is returned unchanged.
    pub fn toggle(&mut self, task_id: TaskId, now: DateTime<Local>) -> TimerState {
        let state = self.timers.entry(task_id).or_default();

        if state.phase().is_terminal() {
            return state.clone();
        }

        if !state.is_running {
            state.is_running = true;
            state.started_at = Some(now);
        } else {
            state.is_running = false;
            state.completed = true;
            state.completed_duration = Some(
                state
                    .started_at
                    .map(|started| span(started, now))
                    .unwrap_or_else(Duration::zero),
            );
        }

        state.clone()
    }

    /// Look up a task's timer; unknown tasks are idle
    pub fn get(&self, task_id: TaskId) -> TimerState {
        self.timers.get(&task_id).cloned().unwrap_or_default()
    }

    /// Time since start, only while the task is running
    pub fn elapsed_since(&self, task_id: TaskId, now: DateTime<Local>) -> Option<Duration> {
        self.timers
            .get(&task_id)
            .and_then(|state| state.elapsed_since(now))
    }

    /// IDs of tasks currently being timed, sorted
    pub fn running_ids(&self) -> Vec<TaskId> {
        let mut ids: Vec<TaskId> = self
            .timers
            .iter()
            .filter(|(_, state)| state.is_running)
            .map(|(id, _)| *id)
            .collect();
        ids.sort_unstable();
        ids
    }

    pub fn completed_count(&self) -> usize {
        self.timers.values().filter(|state| state.completed).count()
    }

    /// Sum of all recorded completion durations
    pub fn total_completed(&self) -> Duration {
        self.timers
            .values()
            .filter_map(|state| state.completed_duration)
            .fold(Duration::zero(), |acc, d| acc + d)
    }
}
