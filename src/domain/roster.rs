use super::enums::TaskStatus;
use super::timer::TaskId;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// A scheduled block of time that one person can reserve
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    pub id: String,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub assigned_to: Vec<String>,
    /// Holder at session start, if the shift was already claimed
    #[serde(default)]
    pub reserved_by: Option<String>,
}

impl Shift {
    pub fn is_assigned_to(&self, identity: &str) -> bool {
        self.assigned_to.iter().any(|name| name == identity)
    }

    pub fn length(&self) -> Duration {
        std::cmp::max(Duration::zero(), self.end - self.start)
    }
}

/// A task that can be timed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskEntry {
    pub id: TaskId,
    pub name: String,
    pub status: TaskStatus,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}

/// The shifts and tasks a workday operates on
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    #[serde(default)]
    pub shifts: Vec<Shift>,
    #[serde(default)]
    pub tasks: Vec<TaskEntry>,
}

impl Roster {
    pub fn shift(&self, shift_id: &str) -> Option<&Shift> {
        self.shifts.iter().find(|shift| shift.id == shift_id)
    }

    pub fn task(&self, task_id: TaskId) -> Option<&TaskEntry> {
        self.tasks.iter().find(|task| task.id == task_id)
    }

    /// Smallest numeric id above every numeric id in use
    pub fn next_shift_id(&self) -> String {
        self.shifts
            .iter()
            .filter_map(|shift| shift.id.parse::<u64>().ok())
            .max()
            .map_or(1, |max| max + 1)
            .to_string()
    }

    /// Upcoming shifts assigned to `identity`, earliest first
    pub fn my_shifts(&self, identity: &str, now: NaiveDateTime) -> Vec<&Shift> {
        self.upcoming(now, |shift| shift.is_assigned_to(identity))
    }

    /// Upcoming shifts not assigned to `identity`, earliest first
    pub fn open_shifts(&self, identity: &str, now: NaiveDateTime) -> Vec<&Shift> {
        self.upcoming(now, |shift| !shift.is_assigned_to(identity))
    }

    fn upcoming<F>(&self, now: NaiveDateTime, keep: F) -> Vec<&Shift>
    where
        F: Fn(&Shift) -> bool,
    {
        let mut shifts: Vec<&Shift> = self
            .shifts
            .iter()
            .filter(|shift| shift.start >= now && keep(shift))
            .collect();
        shifts.sort_by_key(|shift| shift.start);
        shifts
    }

    /// Built-in roster used when no config provides one, anchored on `today`
    pub fn sample(today: NaiveDate) -> Self {
        let at = |days: i64, hour: u32| {
            (today + Duration::days(days)).and_time(NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or_default())
        };

        let shifts = vec![
            Shift {
                id: "1".to_string(),
                title: "Morning Shift".to_string(),
                start: at(1, 9),
                end: at(1, 17),
                location: Some("Studio A".to_string()),
                assigned_to: vec!["You".to_string()],
                reserved_by: None,
            },
            Shift {
                id: "2".to_string(),
                title: "Evening Shift".to_string(),
                start: at(2, 14),
                end: at(2, 22),
                location: Some("Studio B".to_string()),
                assigned_to: vec!["Alice".to_string(), "Bob".to_string()],
                reserved_by: Some("Alice".to_string()),
            },
            Shift {
                id: "3".to_string(),
                title: "Morning Shift".to_string(),
                start: at(5, 9),
                end: at(5, 17),
                location: Some("Studio A".to_string()),
                assigned_to: vec!["You".to_string()],
                reserved_by: None,
            },
        ];

        let tasks = vec![
            TaskEntry {
                id: 1,
                name: "Photo Shoot".to_string(),
                status: TaskStatus::Completed,
                due_date: Some(today),
            },
            TaskEntry {
                id: 2,
                name: "Photo Editing".to_string(),
                status: TaskStatus::InProgress,
                due_date: Some(today + Duration::days(2)),
            },
            TaskEntry {
                id: 3,
                name: "Post Creation".to_string(),
                status: TaskStatus::NotStarted,
                due_date: Some(today + Duration::days(5)),
            },
        ];

        Self { shifts, tasks }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 24).unwrap()
    }

    fn noon(date: NaiveDate) -> NaiveDateTime {
        date.and_hms_opt(12, 0, 0).unwrap()
    }

    #[test]
    fn test_lookup_by_id() {
        let roster = Roster::sample(today());
        assert_eq!(roster.shift("2").map(|s| s.title.as_str()), Some("Evening Shift"));
        assert_eq!(roster.task(3).map(|t| t.name.as_str()), Some("Post Creation"));
        assert!(roster.shift("99").is_none());
        assert!(roster.task(99).is_none());
    }

    #[test]
    fn test_my_shifts_sorted_and_upcoming() {
        let mut roster = Roster::sample(today());
        roster.shifts.reverse();

        let mine: Vec<&str> = roster
            .my_shifts("You", noon(today()))
            .into_iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(mine, vec!["1", "3"]);

        // Past shifts drop out
        let later = noon(today() + Duration::days(3));
        let mine: Vec<&str> = roster.my_shifts("You", later).into_iter().map(|s| s.id.as_str()).collect();
        assert_eq!(mine, vec!["3"]);
    }

    #[test]
    fn test_open_shifts_excludes_mine() {
        let roster = Roster::sample(today());
        let open: Vec<&str> = roster
            .open_shifts("You", noon(today()))
            .into_iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(open, vec!["2"]);
    }

    #[test]
    fn test_shift_length() {
        let roster = Roster::sample(today());
        assert_eq!(roster.shifts[0].length(), Duration::hours(8));
    }

    #[test]
    fn test_next_shift_id() {
        let mut roster = Roster::sample(today());
        assert_eq!(roster.next_shift_id(), "4");

        roster.shifts.retain(|shift| shift.id == "2");
        roster.shifts[0].id = "night".to_string();
        assert_eq!(roster.next_shift_id(), "1");
    }

    #[test]
    fn test_roster_json_defaults() {
        let json = r#"{
            "shifts": [
                {"id": "s1", "title": "Night Shift", "start": "2024-01-25T22:00:00", "end": "2024-01-26T06:00:00"}
            ]
        }"#;
        let roster: Roster = serde_json::from_str(json).unwrap();
        assert_eq!(roster.shifts.len(), 1);
        assert!(roster.shifts[0].assigned_to.is_empty());
        assert_eq!(roster.shifts[0].reserved_by, None);
        assert!(roster.tasks.is_empty());
    }
}
