//! Student profile: details, edit mode, assignments and history
//!
//! Every mutation is one store call followed by a re-fetch of this
//! student, so derived values always come from server state.

use super::{today, Notifications, ViewState};
use crate::error::{CliError, Result};
use crate::store::{StudentLookup, StudentStore};
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::warn;
use tragres_common::types::{AttendanceRecord, Student, StudentUpdate};
use tragres_common::DomainError;

/// Field values staged while editing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditDraft {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub course: String,
    pub profile_photo: String,
}

impl EditDraft {
    pub fn from_student(student: &Student) -> Self {
        Self {
            name: student.name.clone(),
            phone: student.phone.clone(),
            email: student.email.clone().unwrap_or_default(),
            course: student.course.clone(),
            profile_photo: student.profile_photo.clone().unwrap_or_default(),
        }
    }

    /// Every field is sent; blank email or photo clears it on the server
    pub fn to_update(&self) -> StudentUpdate {
        StudentUpdate {
            name: Some(self.name.trim().to_string()),
            phone: Some(self.phone.trim().to_string()),
            email: Some(self.email.trim().to_string()),
            course: Some(self.course.trim().to_string()),
            profile_photo: Some(self.profile_photo.clone()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProfileStats {
    pub attendance_rate: u32,
    pub present: usize,
    pub total_attendance: usize,
    pub completed_assignments: usize,
    pub total_assignments: usize,
}

pub struct ProfileController {
    store: Arc<dyn StudentStore>,
    student_id: String,
    today: NaiveDate,
    /// `Empty` means the server has no such student
    state: ViewState<Student>,
    draft: Option<EditDraft>,
    deleted: bool,
    notices: Notifications,
}

impl ProfileController {
    pub fn new(store: Arc<dyn StudentStore>, student_id: impl Into<String>) -> Self {
        Self {
            store,
            student_id: student_id.into(),
            today: today(),
            state: ViewState::Loading,
            draft: None,
            deleted: false,
            notices: Notifications::default(),
        }
    }

    /// Date stamped on new assignments
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub async fn activate(&mut self) {
        self.refresh().await;
    }

    pub fn state(&self) -> &ViewState<Student> {
        &self.state
    }

    pub fn student(&self) -> Option<&Student> {
        self.state.data()
    }

    pub fn student_id(&self) -> &str {
        &self.student_id
    }

    /// Set once the student has been deleted; the screen should close
    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    pub fn stats(&self) -> ProfileStats {
        match self.student() {
            Some(s) => ProfileStats {
                attendance_rate: s.attendance_rate(),
                present: s.present_count(),
                total_attendance: s.attendance.len(),
                completed_assignments: s.completed_assignments(),
                total_assignments: s.assignments.len(),
            },
            None => ProfileStats::default(),
        }
    }

    /// Attendance records, newest first
    pub fn history(&self) -> Vec<&AttendanceRecord> {
        self.student()
            .map(Student::attendance_history)
            .unwrap_or_default()
    }

    // ------------------------------------------------------------------
    // Edit mode
    // ------------------------------------------------------------------

    /// Enter edit mode with the current values; `false` if nothing is loaded
    pub fn begin_edit(&mut self) -> bool {
        match self.state.data() {
            Some(student) => {
                self.draft = Some(EditDraft::from_student(student));
                true
            }
            None => false,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    pub fn draft(&self) -> Option<&EditDraft> {
        self.draft.as_ref()
    }

    pub fn draft_mut(&mut self) -> Option<&mut EditDraft> {
        self.draft.as_mut()
    }

    pub fn cancel_edit(&mut self) {
        self.draft = None;
    }

    /// Validate the draft and send it as one update
    pub async fn save_edit(&mut self) -> Result<()> {
        let Some(draft) = self.draft.as_ref() else {
            return Err(CliError::validation("Not editing this profile"));
        };

        let update = draft.to_update();
        if let Err(err) = update.validate() {
            let err = CliError::from(err);
            self.notices.failure(&err);
            return Err(err);
        }

        // The write echo may be partial, so the profile is re-read instead
        if let Err(err) = self.store.update_student(&self.student_id, update).await {
            return self.report(err);
        }
        self.draft = None;
        self.notices.success("Success", "Profile updated successfully");
        self.refresh().await;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Assignments
    // ------------------------------------------------------------------

    /// Add an assignment dated today
    pub async fn add_assignment(&mut self, title: &str) -> Result<()> {
        let title = title.trim();
        if title.is_empty() {
            let err = CliError::from(DomainError::required("Assignment title"));
            self.notices.failure(&err);
            return Err(err);
        }
        self.ensure_loaded()?;

        if let Err(err) = self
            .store
            .add_assignment(&self.student_id, title, self.today)
            .await
        {
            return self.report(err);
        }
        self.notices.success("Success", "Assignment added");
        self.refresh().await;
        Ok(())
    }

    pub async fn toggle_assignment(&mut self, assignment_id: &str) -> Result<()> {
        self.ensure_loaded()?;

        if let Err(err) = self
            .store
            .toggle_assignment(&self.student_id, assignment_id)
            .await
        {
            return self.report(err);
        }
        self.refresh().await;
        Ok(())
    }

    pub async fn delete_assignment(&mut self, assignment_id: &str) -> Result<()> {
        self.ensure_loaded()?;

        if let Err(err) = self
            .store
            .delete_assignment(&self.student_id, assignment_id)
            .await
        {
            return self.report(err);
        }
        self.notices.success("Success", "Assignment removed");
        self.refresh().await;
        Ok(())
    }

    /// Delete the student and everything recorded for them
    pub async fn delete_student(&mut self) -> Result<()> {
        self.ensure_loaded()?;

        if let Err(err) = self.store.delete_student(&self.student_id).await {
            return self.report(err);
        }
        self.deleted = true;
        self.draft = None;
        self.state = ViewState::Empty;
        self.notices.success("Success", "Student deleted successfully");
        Ok(())
    }

    pub fn notices(&self) -> &Notifications {
        &self.notices
    }

    pub fn notices_mut(&mut self) -> &mut Notifications {
        &mut self.notices
    }

    /// Re-fetch this student
    ///
    /// After a committed write a failed re-fetch leaves `Failed` in place;
    /// the write's success notice stays ahead of the error notice.
    pub async fn refresh(&mut self) {
        self.state = match self.store.get_student(&self.student_id).await {
            StudentLookup::Found(student) => ViewState::Ready(student),
            StudentLookup::NotFound => ViewState::Empty,
            StudentLookup::Failed(err) => {
                warn!(student_id = %self.student_id, error = %err, "Profile failed to load student");
                self.notices.failure(&err);
                ViewState::Failed(err.to_string())
            }
        };
    }

    fn ensure_loaded(&self) -> Result<()> {
        if self.state.is_ready() {
            Ok(())
        } else {
            Err(CliError::validation(format!(
                "Student '{}' is not loaded",
                self.student_id
            )))
        }
    }

    fn report<T>(&mut self, err: CliError) -> Result<T> {
        warn!(student_id = %self.student_id, error = %err, "Profile action failed");
        self.notices.failure(&err);
        Err(err)
    }
}
