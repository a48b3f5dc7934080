use super::empty_as_none;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day's attendance for a student
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: String,
    pub date: NaiveDate,
    pub present: bool,
    /// Topic covered in the lesson
    #[serde(
        default,
        alias = "topicCovered",
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub topic: Option<String>,
}

/// Body of a create-attendance request
///
/// The server keeps one record per student and date, so sending this again
/// for the same date replaces the earlier record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAttendance {
    pub date: NaiveDate,
    pub present: bool,
    /// Always sent; an empty string means no topic
    pub topic: String,
}

impl NewAttendance {
    pub fn new(date: NaiveDate, present: bool, topic: Option<&str>) -> Self {
        Self {
            date,
            present,
            topic: topic.unwrap_or_default().to_string(),
        }
    }
}

/// A piece of work assigned to a student
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: String,
    pub title: String,
    pub assigned_date: NaiveDate,
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<NaiveDate>,
}

impl Assignment {
    /// The state the server produces when this assignment is toggled on `today`
    ///
    /// Completing stamps the completion date, reopening clears it.
    pub fn toggled(&self, today: NaiveDate) -> Self {
        let completed = !self.completed;
        Self {
            completed,
            completed_date: completed.then_some(today),
            ..self.clone()
        }
    }
}

/// Body of a create-assignment request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAssignment {
    pub title: String,
    pub assigned_date: NaiveDate,
    pub completed: bool,
}

impl NewAssignment {
    pub fn new(title: impl Into<String>, assigned_date: NaiveDate) -> Self {
        Self {
            title: title.into(),
            assigned_date,
            completed: false,
        }
    }
}
