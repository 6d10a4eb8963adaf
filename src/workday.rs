use crate::domain::{
    ClockSession, ClockStatus, Roster, Shift, ShiftReservation, TaskEntry, TaskId, TimerRegistry,
    TimerState,
};
use crate::error::StateError;
use chrono::{DateTime, Duration, Local};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// What the presentation layer should ask before changing a shift
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShiftPrompt {
    /// Shift is free: ask who wants it
    AskHolder,
    /// Shift is held: confirm releasing it
    ConfirmRelease { holder: String },
}

/// Read-only view of the workday used for display ticks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub clock: ClockStatus,
    pub clock_elapsed: Option<Duration>,
    pub clock_total: Option<Duration>,
    pub running: Vec<(TaskId, Duration)>,
    pub completed_count: usize,
    pub completed_total: Duration,
    pub reserved_count: usize,
}

/// Single owner of the timer, reservation and clock state for one session
pub struct Workday {
    pub session_id: Uuid,
    pub roster: Roster,
    pub identity: String,
    /// Refuse task timers while clocked out
    pub require_clock_in: bool,
    timers: TimerRegistry,
    reservations: ShiftReservation,
    clock: ClockSession,
}

impl Workday {
    pub fn new(roster: Roster, identity: String, require_clock_in: bool) -> Self {
        let session_id = Uuid::new_v4();
        let mut reservations = ShiftReservation::new();

        for shift in &roster.shifts {
            if let Some(holder) = &shift.reserved_by {
                if let Err(e) = reservations.reserve(&shift.id, holder) {
                    warn!(%session_id, shift = %shift.id, "Skipping roster reservation: {}", e);
                }
            }
        }

        info!(
            %session_id,
            shifts = roster.shifts.len(),
            tasks = roster.tasks.len(),
            "Workday started"
        );

        Self {
            session_id,
            roster,
            identity,
            require_clock_in,
            timers: TimerRegistry::new(),
            reservations,
            clock: ClockSession::new(),
        }
    }

    pub fn clock(&self) -> &ClockSession {
        &self.clock
    }

    pub fn timers(&self) -> &TimerRegistry {
        &self.timers
    }

    pub fn reservations(&self) -> &ShiftReservation {
        &self.reservations
    }

    pub fn clock_in(&mut self, now: DateTime<Local>) -> Result<(), StateError> {
        self.clock.clock_in(now)?;
        info!(session_id = %self.session_id, at = %now, "Clocked in");
        Ok(())
    }

    pub fn clock_out(&mut self, now: DateTime<Local>) -> Result<(), StateError> {
        self.clock.clock_out(now)?;
        info!(
            session_id = %self.session_id,
            at = %now,
            total_secs = self.clock.total().map(|d| d.num_seconds()).unwrap_or(0),
            "Clocked out"
        );
        Ok(())
    }

    /// Start or finish a task's timer.
    ///
    /// The clock-in gate applies to every known task, completed ones included:
    /// re-toggling a completed task while clocked out is `ClockInRequired`,
    /// not the no-op it is while clocked in.
    pub fn toggle_task(&mut self, task_id: TaskId, now: DateTime<Local>) -> Result<TimerState, StateError> {
        if self.roster.task(task_id).is_none() {
            return Err(StateError::UnknownTask(task_id));
        }
        if self.require_clock_in && !self.clock.clocked_in {
            return Err(StateError::ClockInRequired);
        }

        let before = self.timers.get(task_id);
        let after = self.timers.toggle(task_id, now);

        if before.completed {
            debug!(
                session_id = %self.session_id,
                task_id,
                phase = after.phase().to_tag(),
                "Toggle ignored on completed task"
            );
        } else if after.completed {
            info!(
                session_id = %self.session_id,
                task_id,
                secs = after.completed_duration.map(|d| d.num_seconds()).unwrap_or(0),
                "Task completed"
            );
        } else {
            info!(session_id = %self.session_id, task_id, "Task timer started");
        }

        Ok(after)
    }

    pub fn task_state(&self, task_id: TaskId) -> TimerState {
        self.timers.get(task_id)
    }

    /// Decide what clicking a shift should ask for
    pub fn shift_click(&self, shift_id: &str) -> Result<ShiftPrompt, StateError> {
        self.known_shift(shift_id)?;
        Ok(match self.reservations.status(shift_id) {
            Some(holder) => ShiftPrompt::ConfirmRelease {
                holder: holder.to_string(),
            },
            None => ShiftPrompt::AskHolder,
        })
    }

    pub fn reserve_shift(&mut self, shift_id: &str, holder: &str) -> Result<(), StateError> {
        self.known_shift(shift_id)?;
        self.reservations.reserve(shift_id, holder)?;
        info!(session_id = %self.session_id, shift_id, holder, "Shift reserved");
        Ok(())
    }

    pub fn release_shift(&mut self, shift_id: &str) -> Result<String, StateError> {
        self.known_shift(shift_id)?;
        let holder = self.reservations.release(shift_id)?;
        info!(session_id = %self.session_id, shift_id, holder = %holder, "Shift released");
        Ok(holder)
    }

    /// Add a shift to the roster, optionally reserving it on creation.
    /// A holder passed here wins over the record's own `reserved_by`.
    pub fn add_shift(&mut self, mut shift: Shift, reserved_by: Option<&str>) -> Result<(), StateError> {
        if self.roster.shift(&shift.id).is_some() {
            return Err(StateError::DuplicateShift(shift.id));
        }

        if let Some(holder) = reserved_by {
            shift.reserved_by = Some(holder.to_string());
        }
        if let Some(holder) = &shift.reserved_by {
            self.reservations.reserve(&shift.id, holder)?;
        }

        info!(
            session_id = %self.session_id,
            shift_id = %shift.id,
            holder = shift.reserved_by.as_deref().unwrap_or(""),
            "Shift added"
        );
        self.roster.shifts.push(shift);
        Ok(())
    }

    pub fn shift_holder(&self, shift_id: &str) -> Option<&str> {
        self.reservations.status(shift_id)
    }

    fn known_shift(&self, shift_id: &str) -> Result<&Shift, StateError> {
        self.roster
            .shift(shift_id)
            .ok_or_else(|| StateError::UnknownShift(shift_id.to_string()))
    }

    /// Tasks paired with their timer state, in roster order
    pub fn task_rows(&self) -> Vec<(&TaskEntry, TimerState)> {
        self.roster
            .tasks
            .iter()
            .map(|task| (task, self.timers.get(task.id)))
            .collect()
    }

    /// Gather everything a display refresh needs. Never mutates.
    pub fn snapshot(&self, now: DateTime<Local>) -> Snapshot {
        let running = self
            .timers
            .running_ids()
            .into_iter()
            .filter_map(|id| self.timers.elapsed_since(id, now).map(|d| (id, d)))
            .collect();

        Snapshot {
            clock: self.clock.status(),
            clock_elapsed: self.clock.elapsed(now),
            clock_total: self.clock.total(),
            running,
            completed_count: self.timers.completed_count(),
            completed_total: self.timers.total_completed(),
            reserved_count: self.reservations.reserved_count(),
        }
    }
}
