//! Derived statistics
//!
//! Nothing here is persisted; every value is recomputed from the current
//! snapshot of students.

use crate::types::{AttendanceRecord, Presence, Student};
use chrono::NaiveDate;

/// Attendance rate as a whole percent, rounding halves up
///
/// Zero records give a rate of 0.
pub fn attendance_rate(present: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    // round(100 * p / t) in integers: (200p + t) / 2t
    ((200 * present + total) / (2 * total)) as u32
}

/// Present, absent and unmarked counts over a set of marks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PresenceTally {
    pub present: usize,
    pub absent: usize,
    pub unmarked: usize,
}

impl PresenceTally {
    pub fn marked(&self) -> usize {
        self.present + self.absent
    }
}

impl FromIterator<Presence> for PresenceTally {
    fn from_iter<I: IntoIterator<Item = Presence>>(iter: I) -> Self {
        iter.into_iter().fold(Self::default(), |mut tally, presence| {
            match presence {
                Presence::Present => tally.present += 1,
                Presence::Absent => tally.absent += 1,
                Presence::Unmarked => tally.unmarked += 1,
            }
            tally
        })
    }
}

impl Student {
    pub fn present_count(&self) -> usize {
        self.attendance.iter().filter(|a| a.present).count()
    }

    pub fn attendance_rate(&self) -> u32 {
        attendance_rate(self.present_count(), self.attendance.len())
    }

    pub fn completed_assignments(&self) -> usize {
        self.assignments.iter().filter(|a| a.completed).count()
    }

    /// The attendance record for `date`, if one was saved
    pub fn attendance_on(&self, date: NaiveDate) -> Option<&AttendanceRecord> {
        self.attendance.iter().find(|a| a.date == date)
    }

    pub fn was_present_on(&self, date: NaiveDate) -> bool {
        self.attendance_on(date).is_some_and(|a| a.present)
    }

    /// Attendance records, most recent date first
    pub fn attendance_history(&self) -> Vec<&AttendanceRecord> {
        let mut history: Vec<&AttendanceRecord> = self.attendance.iter().collect();
        history.sort_by(|a, b| b.date.cmp(&a.date));
        history
    }

    /// Up to two upper-case initials, e.g. "ana maria ray" -> "AM"
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .take(2)
            .collect()
    }
}
