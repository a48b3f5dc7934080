use super::{empty_as_none, Assignment, AttendanceRecord};
use crate::{DomainError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered student with their attendance and assignment history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub name: String,
    pub phone: String,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub course: String,
    /// Data-URI or URL of the profile image
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub profile_photo: Option<String>,
    #[serde(default)]
    pub attendance: Vec<AttendanceRecord>,
    #[serde(default)]
    pub assignments: Vec<Assignment>,
    pub created_at: DateTime<Utc>,
}

/// A student as echoed back by a create or update
///
/// Some servers answer writes with the submitted fields only, without the
/// id, timestamps or collections. Those parts are optional here; use
/// [`SavedStudent::into_student`] when the full record came back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedStudent {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub phone: String,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub course: String,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub profile_photo: Option<String>,
    #[serde(default)]
    pub attendance: Option<Vec<AttendanceRecord>>,
    #[serde(default)]
    pub assignments: Option<Vec<Assignment>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl SavedStudent {
    /// The full record, if the echo carried an id and creation time
    pub fn into_student(self) -> Option<Student> {
        Some(Student {
            id: self.id?,
            name: self.name,
            phone: self.phone,
            email: self.email,
            course: self.course,
            profile_photo: self.profile_photo,
            attendance: self.attendance.unwrap_or_default(),
            assignments: self.assignments.unwrap_or_default(),
            created_at: self.created_at?,
        })
    }
}

impl From<Student> for SavedStudent {
    fn from(student: Student) -> Self {
        Self {
            id: Some(student.id),
            name: student.name,
            phone: student.phone,
            email: student.email,
            course: student.course,
            profile_photo: student.profile_photo,
            attendance: Some(student.attendance),
            assignments: Some(student.assignments),
            created_at: Some(student.created_at),
        }
    }
}

/// Fields accepted when registering a student
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStudent {
    pub name: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub course: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_photo: Option<String>,
}

impl NewStudent {
    pub fn new(name: impl Into<String>, phone: impl Into<String>, course: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            course: course.into(),
            ..Self::default()
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_profile_photo(mut self, photo: impl Into<String>) -> Self {
        self.profile_photo = Some(photo.into());
        self
    }

    /// Check the required fields, in form order
    pub fn validate(&self) -> Result<()> {
        require("Name", &self.name)?;
        require("Phone number", &self.phone)?;
        require("Course", &self.course)
    }
}

/// Partial update of a student's own fields
///
/// `None` leaves a field untouched. Collections and timestamps are owned by
/// the server and cannot be changed here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_photo: Option<String>,
}

impl StudentUpdate {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Required fields may be left out of an update but never blanked
    pub fn validate(&self) -> Result<()> {
        if let Some(ref name) = self.name {
            require("Name", name)?;
        }
        if let Some(ref phone) = self.phone {
            require("Phone number", phone)?;
        }
        if let Some(ref course) = self.course {
            require("Course", course)?;
        }
        Ok(())
    }
}

fn require(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DomainError::required(field));
    }
    Ok(())
}
