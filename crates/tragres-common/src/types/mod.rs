//! Domain types shared by the Tragres client
//!
//! Field names follow the JSON the student API speaks (`camelCase` on the
//! wire, `snake_case` in Rust).

mod records;
mod student;

pub use records::{Assignment, AttendanceRecord, NewAssignment, NewAttendance};
pub use student::{NewStudent, SavedStudent, Student, StudentUpdate};

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Attendance decision for one student on one date
///
/// `Unmarked` means nothing has been decided yet; unmarked students are
/// skipped when attendance is saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Presence {
    Present,
    Absent,
    #[default]
    Unmarked,
}

impl Presence {
    /// Presence recorded on the server for `present`
    pub fn from_flag(present: bool) -> Self {
        if present {
            Presence::Present
        } else {
            Presence::Absent
        }
    }

    /// The flag to send, or `None` when unmarked
    pub fn as_flag(self) -> Option<bool> {
        match self {
            Presence::Present => Some(true),
            Presence::Absent => Some(false),
            Presence::Unmarked => None,
        }
    }

    pub fn is_marked(self) -> bool {
        self != Presence::Unmarked
    }

    /// Result of pressing the Present (`true`) or Absent (`false`) button
    ///
    /// Pressing the button that is already active clears the mark.
    pub fn press(self, present: bool) -> Self {
        let pressed = Presence::from_flag(present);
        if self == pressed {
            Presence::Unmarked
        } else {
            pressed
        }
    }
}

impl std::fmt::Display for Presence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Presence::Present => write!(f, "present"),
            Presence::Absent => write!(f, "absent"),
            Presence::Unmarked => write!(f, "unmarked"),
        }
    }
}

/// Parse an ISO `YYYY-MM-DD` calendar date
pub fn parse_date(value: &str) -> crate::Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| crate::DomainError::InvalidDate(value.to_string()))
}

/// The API stores blank optional text as `""`; read that back as absent.
pub(crate) fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
