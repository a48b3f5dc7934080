//! Attendance entry for one date across every student
//!
//! Marks are staged locally and only reach the server on [`save`], which
//! sends one record per marked student, one call at a time, in list order.
//!
//! [`save`]: AttendanceController::save

use super::{Notifications, ViewState};
use crate::error::{CliError, Result};
use crate::store::StudentStore;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};
use tragres_common::stats::PresenceTally;
use tragres_common::types::{Presence, Student};

/// Message shown when save is pressed with nothing marked
pub const NOTHING_MARKED: &str = "Mark at least one student's attendance";

/// Locally staged attendance for one student
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mark {
    pub presence: Presence,
    pub topic: String,
}

impl Mark {
    /// Seed from the record saved for `date`, if any
    fn seeded(student: &Student, date: NaiveDate) -> Self {
        match student.attendance_on(date) {
            Some(record) => Self {
                presence: Presence::from_flag(record.present),
                topic: record.topic.clone().unwrap_or_default(),
            },
            None => Self::default(),
        }
    }
}

/// The call that stopped a save
#[derive(Debug)]
pub struct SaveFailure {
    pub student_id: String,
    pub error: CliError,
}

/// Result of a save
///
/// Records saved before a failure stay saved on the server.
#[derive(Debug)]
pub struct SaveOutcome {
    pub saved: usize,
    /// Number of students that were marked when save started
    pub attempted: usize,
    pub failure: Option<SaveFailure>,
}

impl SaveOutcome {
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }
}

pub struct AttendanceController {
    store: Arc<dyn StudentStore>,
    date: NaiveDate,
    state: ViewState<Vec<Student>>,
    marks: HashMap<String, Mark>,
    notices: Notifications,
}

impl AttendanceController {
    pub fn new(store: Arc<dyn StudentStore>, date: NaiveDate) -> Self {
        Self {
            store,
            date,
            state: ViewState::Loading,
            marks: HashMap::new(),
            notices: Notifications::default(),
        }
    }

    pub async fn activate(&mut self) {
        self.reload().await;
    }

    /// Switch to another date, reloading students and re-seeding marks
    pub async fn select_date(&mut self, date: NaiveDate) {
        if date == self.date && !self.state.is_loading() {
            return;
        }
        self.date = date;
        self.reload().await;
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn state(&self) -> &ViewState<Vec<Student>> {
        &self.state
    }

    pub fn students(&self) -> &[Student] {
        self.state.items()
    }

    /// The staged mark for a student, unmarked if none
    pub fn mark(&self, student_id: &str) -> Mark {
        self.marks.get(student_id).cloned().unwrap_or_default()
    }

    /// Press Present (`true`) or Absent (`false`) for a student
    ///
    /// Pressing the active button again clears the mark. Returns `false`
    /// for an unknown student.
    pub fn press(&mut self, student_id: &str, present: bool) -> bool {
        match self.marks.get_mut(student_id) {
            Some(mark) => {
                mark.presence = mark.presence.press(present);
                true
            }
            None => false,
        }
    }

    /// Set the presence of a student directly
    pub fn set_presence(&mut self, student_id: &str, presence: Presence) -> bool {
        match self.marks.get_mut(student_id) {
            Some(mark) => {
                mark.presence = presence;
                true
            }
            None => false,
        }
    }

    pub fn set_topic(&mut self, student_id: &str, topic: impl Into<String>) -> bool {
        match self.marks.get_mut(student_id) {
            Some(mark) => {
                mark.topic = topic.into();
                true
            }
            None => false,
        }
    }

    /// Overwrite every student's staged topic; a blank topic is ignored
    pub fn apply_topic_to_all(&mut self, topic: &str) -> bool {
        if topic.trim().is_empty() {
            return false;
        }
        for mark in self.marks.values_mut() {
            mark.topic = topic.to_string();
        }
        self.notices.success("Applied", "Topic applied to all students");
        true
    }

    /// Present, absent and unmarked counts over the loaded students
    pub fn tally(&self) -> PresenceTally {
        self.students()
            .iter()
            .map(|s| self.mark(&s.id).presence)
            .collect()
    }

    /// Send every marked student's attendance, then reload
    ///
    /// With nothing marked this fails validation without calling the
    /// server. Calls run one after another and stop at the first failure;
    /// the failed and unsent marks survive the reload.
    pub async fn save(&mut self) -> Result<SaveOutcome> {
        let pending: Vec<(String, bool, String)> = self
            .students()
            .iter()
            .filter_map(|s| {
                let mark = self.marks.get(&s.id)?;
                let present = mark.presence.as_flag()?;
                Some((s.id.clone(), present, mark.topic.clone()))
            })
            .collect();

        if pending.is_empty() {
            self.notices.error("No changes", NOTHING_MARKED);
            return Err(CliError::validation(NOTHING_MARKED));
        }

        let mut outcome = SaveOutcome {
            saved: 0,
            attempted: pending.len(),
            failure: None,
        };
        let mut unsent = Vec::new();

        for (index, (student_id, present, topic)) in pending.iter().enumerate() {
            // Sent as typed; only a blank topic is dropped
            let topic = Some(topic.as_str()).filter(|t| !t.trim().is_empty());
            match self
                .store
                .record_attendance(student_id, self.date, *present, topic)
                .await
            {
                Ok(_) => outcome.saved += 1,
                Err(error) => {
                    warn!(student_id = %student_id, date = %self.date, error = %error, "Attendance save stopped");
                    outcome.failure = Some(SaveFailure {
                        student_id: student_id.clone(),
                        error,
                    });
                    unsent = pending[index..].to_vec();
                    break;
                }
            }
        }

        match outcome.failure {
            None => {
                info!(date = %self.date, saved = outcome.saved, "Attendance saved");
                self.notices.success(
                    "Saved",
                    format!("Attendance saved for {} student(s)", outcome.saved),
                );
            }
            Some(ref failure) => {
                let name = self
                    .students()
                    .iter()
                    .find(|s| s.id == failure.student_id)
                    .map_or_else(|| failure.student_id.clone(), |s| s.name.clone());
                let description = format!(
                    "Saved {} of {} before failing for {}: {}",
                    outcome.saved, outcome.attempted, name, failure.error
                );
                self.notices.error("Attendance not fully saved", description);
            }
        }

        if outcome.saved > 0 {
            self.reload().await;
            // Marks that never reached the server stay staged for a retry
            for (student_id, present, topic) in unsent {
                if let Some(mark) = self.marks.get_mut(&student_id) {
                    *mark = Mark {
                        presence: Presence::from_flag(present),
                        topic,
                    };
                }
            }
        }

        Ok(outcome)
    }

    pub fn notices(&self) -> &Notifications {
        &self.notices
    }

    pub fn notices_mut(&mut self) -> &mut Notifications {
        &mut self.notices
    }

    async fn reload(&mut self) {
        self.state = ViewState::Loading;
        match self.store.list_students().await {
            Ok(students) => {
                self.marks = students
                    .iter()
                    .map(|s| (s.id.clone(), Mark::seeded(s, self.date)))
                    .collect();
                self.state = ViewState::from_items(students);
            }
            Err(err) => {
                warn!(date = %self.date, error = %err, "Attendance failed to load students");
                self.notices.failure(&err);
                self.marks.clear();
                self.state = ViewState::Failed(err.to_string());
            }
        }
    }
}
