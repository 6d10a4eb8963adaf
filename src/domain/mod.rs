pub mod clock;
pub mod enums;
pub mod reservation;
pub mod roster;
pub mod timer;
pub mod views;

pub use clock::ClockSession;
pub use enums::{ClockStatus, TaskStatus, TimerPhase};
pub use reservation::{ReservationState, ShiftReservation};
pub use roster::{Roster, Shift, TaskEntry};
pub use timer::{TaskId, TimerRegistry, TimerState};
pub use views::{clock_rows, effective_status, format_duration, timer_badge, ClockRow};
