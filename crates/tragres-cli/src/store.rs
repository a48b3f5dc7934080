//! Data-access façade
//!
//! [`StudentStore`] is the only way controllers reach student data. Every
//! call goes straight to the server: nothing is cached and returned values
//! are never updated in place, so callers re-fetch after a mutation to see
//! the new state.

use crate::api::{endpoints, ApiClient};
use crate::error::{CliError, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::{debug, info};
use tragres_common::types::{
    Assignment, AttendanceRecord, NewAssignment, NewAttendance, NewStudent, SavedStudent, Student,
    StudentUpdate,
};

/// Outcome of fetching one student
#[derive(Debug)]
pub enum StudentLookup {
    Found(Student),
    /// The server has no student with this id
    NotFound,
    /// The fetch itself failed; the student may or may not exist
    Failed(CliError),
}

impl StudentLookup {
    /// Collapse to `Option`, treating failures as absence
    pub fn into_option(self) -> Option<Student> {
        match self {
            StudentLookup::Found(student) => Some(student),
            StudentLookup::NotFound | StudentLookup::Failed(_) => None,
        }
    }

    /// The student, with `NotFound` reported as `None` and failures as errors
    pub fn into_result(self) -> Result<Option<Student>> {
        match self {
            StudentLookup::Found(student) => Ok(Some(student)),
            StudentLookup::NotFound => Ok(None),
            StudentLookup::Failed(err) => Err(err),
        }
    }
}

impl From<Result<Student>> for StudentLookup {
    fn from(result: Result<Student>) -> Self {
        match result {
            Ok(student) => StudentLookup::Found(student),
            Err(err) if err.is_not_found() => StudentLookup::NotFound,
            Err(err) => StudentLookup::Failed(err),
        }
    }
}

/// Domain verbs over students, attendance and assignments
#[async_trait]
pub trait StudentStore: Send + Sync {
    /// All students, in server order
    async fn list_students(&self) -> Result<Vec<Student>>;

    async fn get_student(&self, id: &str) -> StudentLookup;

    /// Register a student; the echo may lack the id and collections
    async fn create_student(&self, student: NewStudent) -> Result<SavedStudent>;

    /// Change a student's fields; re-fetch to see the full record
    async fn update_student(&self, id: &str, update: StudentUpdate) -> Result<SavedStudent>;

    async fn delete_student(&self, id: &str) -> Result<()>;

    /// Record one day's attendance; the server replaces any record for the same date
    async fn record_attendance(
        &self,
        student_id: &str,
        date: NaiveDate,
        present: bool,
        topic: Option<&str>,
    ) -> Result<AttendanceRecord>;

    /// Add a not-yet-completed assignment
    async fn add_assignment(
        &self,
        student_id: &str,
        title: &str,
        assigned_date: NaiveDate,
    ) -> Result<Assignment>;

    /// Flip the completion flag of an assignment
    async fn toggle_assignment(&self, student_id: &str, assignment_id: &str) -> Result<Assignment>;

    async fn delete_assignment(&self, student_id: &str, assignment_id: &str) -> Result<()>;
}

/// [`StudentStore`] backed by the HTTP API
#[derive(Debug, Clone)]
pub struct ApiStore {
    client: ApiClient,
}

impl ApiStore {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }
}

#[async_trait]
impl StudentStore for ApiStore {
    async fn list_students(&self) -> Result<Vec<Student>> {
        let students: Vec<Student> = self.client.get(&endpoints::students_path()).await?;
        debug!(count = students.len(), "Fetched students");
        Ok(students)
    }

    async fn get_student(&self, id: &str) -> StudentLookup {
        let result: Result<Student> = self.client.get(&endpoints::student_path(id)).await;
        let lookup = StudentLookup::from(result);
        if let StudentLookup::NotFound = lookup {
            debug!(student_id = %id, "Student not found");
        }
        lookup
    }

    async fn create_student(&self, student: NewStudent) -> Result<SavedStudent> {
        let created: SavedStudent = self.client.post(&endpoints::students_path(), &student).await?;
        info!(
            student_id = created.id.as_deref().unwrap_or("-"),
            name = %created.name,
            "Created student"
        );
        Ok(created)
    }

    async fn update_student(&self, id: &str, update: StudentUpdate) -> Result<SavedStudent> {
        let updated: SavedStudent = self.client.patch(&endpoints::student_path(id), &update).await?;
        info!(student_id = %id, "Updated student");
        Ok(updated)
    }

    async fn delete_student(&self, id: &str) -> Result<()> {
        self.client.delete(&endpoints::student_path(id)).await?;
        info!(student_id = %id, "Deleted student");
        Ok(())
    }

    async fn record_attendance(
        &self,
        student_id: &str,
        date: NaiveDate,
        present: bool,
        topic: Option<&str>,
    ) -> Result<AttendanceRecord> {
        let body = NewAttendance::new(date, present, topic);
        let record: AttendanceRecord = self
            .client
            .post(&endpoints::attendance_path(student_id), &body)
            .await?;
        info!(student_id = %student_id, %date, present, "Recorded attendance");
        Ok(record)
    }

    async fn add_assignment(
        &self,
        student_id: &str,
        title: &str,
        assigned_date: NaiveDate,
    ) -> Result<Assignment> {
        let body = NewAssignment::new(title, assigned_date);
        let assignment: Assignment = self
            .client
            .post(&endpoints::assignments_path(student_id), &body)
            .await?;
        info!(student_id = %student_id, assignment_id = %assignment.id, "Added assignment");
        Ok(assignment)
    }

    async fn toggle_assignment(&self, student_id: &str, assignment_id: &str) -> Result<Assignment> {
        let assignment: Assignment = self
            .client
            .put(&endpoints::assignment_toggle_path(student_id, assignment_id))
            .await?;
        info!(
            student_id = %student_id,
            assignment_id = %assignment_id,
            completed = assignment.completed,
            "Toggled assignment"
        );
        Ok(assignment)
    }

    async fn delete_assignment(&self, student_id: &str, assignment_id: &str) -> Result<()> {
        self.client
            .delete(&endpoints::assignment_path(student_id, assignment_id))
            .await?;
        info!(student_id = %student_id, assignment_id = %assignment_id, "Deleted assignment");
        Ok(())
    }
}
