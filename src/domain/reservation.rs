use crate::error::StateError;
use std::collections::HashMap;

/// Reservation state for a single shift
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationState {
    pub reserved_by: Option<String>,
}

/// Single-holder reservations keyed by shift ID
#[derive(Debug, Clone, Default)]
pub struct ShiftReservation {
    shifts: HashMap<String, ReservationState>,
}

impl ShiftReservation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim a shift for `holder`.
    ///
    /// Re-reserving with the current holder succeeds; a different holder is
    /// refused until the shift is released.
    pub fn reserve(&mut self, shift_id: &str, holder: &str) -> Result<(), StateError> {
        let state = self.shifts.entry(shift_id.to_string()).or_default();

        match &state.reserved_by {
            Some(current) if current != holder => Err(StateError::AlreadyReserved {
                shift: shift_id.to_string(),
                holder: current.clone(),
            }),
            Some(_) => Ok(()),
            None => {
                state.reserved_by = Some(holder.to_string());
                Ok(())
            }
        }
    }

    /// Clear a reservation, returning whoever held it
    pub fn release(&mut self, shift_id: &str) -> Result<String, StateError> {
        self.shifts
            .get_mut(shift_id)
            .and_then(|state| state.reserved_by.take())
            .ok_or_else(|| StateError::NotReserved(shift_id.to_string()))
    }

    /// Current holder, if any
    pub fn status(&self, shift_id: &str) -> Option<&str> {
        self.shifts
            .get(shift_id)
            .and_then(|state| state.reserved_by.as_deref())
    }

    /// Number of shifts currently held
    pub fn reserved_count(&self) -> usize {
        self.shifts
            .values()
            .filter(|state| state.reserved_by.is_some())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreserved_status_is_none() {
        let reservations = ShiftReservation::new();
        assert_eq!(reservations.status("shiftA"), None);
    }

    #[test]
    fn test_reserve_sets_holder() {
        let mut reservations = ShiftReservation::new();
        reservations.reserve("shiftA", "Alice").unwrap();
        assert_eq!(reservations.status("shiftA"), Some("Alice"));
        assert_eq!(reservations.reserved_count(), 1);

        // Lookups leave the holder in place
        assert_eq!(reservations.status("shiftA"), reservations.status("shiftA"));
        assert_eq!(reservations.status("shiftA"), Some("Alice"));
        assert_eq!(reservations.reserved_count(), 1);
    }

    #[test]
    fn test_reserve_by_other_holder_fails() {
        let mut reservations = ShiftReservation::new();
        reservations.reserve("shiftA", "Alice").unwrap();

        let err = reservations.reserve("shiftA", "Bob").unwrap_err();
        assert_eq!(
            err,
            StateError::AlreadyReserved {
                shift: "shiftA".to_string(),
                holder: "Alice".to_string(),
            }
        );
        assert_eq!(reservations.status("shiftA"), Some("Alice"));
    }

    #[test]
    fn test_reserve_by_same_holder_is_ok() {
        let mut reservations = ShiftReservation::new();
        reservations.reserve("shiftA", "Alice").unwrap();
        assert!(reservations.reserve("shiftA", "Alice").is_ok());
        assert_eq!(reservations.status("shiftA"), Some("Alice"));
    }

    #[test]
    fn test_release_then_release_again() {
        let mut reservations = ShiftReservation::new();
        reservations.reserve("shiftA", "Alice").unwrap();

        assert_eq!(reservations.release("shiftA"), Ok("Alice".to_string()));
        assert_eq!(reservations.status("shiftA"), None);
        assert_eq!(
            reservations.release("shiftA"),
            Err(StateError::NotReserved("shiftA".to_string()))
        );
    }

    #[test]
    fn test_release_unknown_shift() {
        let mut reservations = ShiftReservation::new();
        assert!(matches!(
            reservations.release("nope"),
            Err(StateError::NotReserved(_))
        ));
    }

    #[test]
    fn test_new_holder_after_release() {
        let mut reservations = ShiftReservation::new();
        reservations.reserve("shiftA", "Alice").unwrap();
        reservations.release("shiftA").unwrap();
        reservations.reserve("shiftA", "Bob").unwrap();
        assert_eq!(reservations.status("shiftA"), Some("Bob"));
    }
}
