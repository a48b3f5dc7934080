//! Dashboard: headline counts and the most recently added students

use super::{today, Notifications, ViewState};
use crate::store::StudentStore;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::warn;
use tragres_common::types::Student;

/// How many students the "recent" list shows
pub const RECENT_STUDENTS_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardSummary {
    pub total_students: usize,
    /// Students with a present record dated today
    pub present_today: usize,
    pub total_assignments: usize,
    pub completed_assignments: usize,
}

pub struct DashboardController {
    store: Arc<dyn StudentStore>,
    today: NaiveDate,
    state: ViewState<Vec<Student>>,
    notices: Notifications,
}

impl DashboardController {
    pub fn new(store: Arc<dyn StudentStore>) -> Self {
        Self {
            store,
            today: today(),
            state: ViewState::Loading,
            notices: Notifications::default(),
        }
    }

    /// Use a fixed date as "today"
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Load the student list
    pub async fn activate(&mut self) {
        self.state = ViewState::Loading;
        self.state = match self.store.list_students().await {
            Ok(students) => ViewState::from_items(students),
            Err(err) => {
                warn!(error = %err, "Dashboard failed to load students");
                self.notices.failure(&err);
                ViewState::Failed(err.to_string())
            }
        };
    }

    pub fn state(&self) -> &ViewState<Vec<Student>> {
        &self.state
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn summary(&self) -> DashboardSummary {
        let students = self.state.items();
        DashboardSummary {
            total_students: students.len(),
            present_today: students
                .iter()
                .filter(|s| s.was_present_on(self.today))
                .count(),
            total_assignments: students.iter().map(|s| s.assignments.len()).sum(),
            completed_assignments: students.iter().map(Student::completed_assignments).sum(),
        }
    }

    /// Newest students first, at most [`RECENT_STUDENTS_LIMIT`]
    pub fn recent_students(&self) -> Vec<&Student> {
        let mut recent: Vec<&Student> = self.state.items().iter().collect();
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recent.truncate(RECENT_STUDENTS_LIMIT);
        recent
    }

    pub fn notices(&self) -> &Notifications {
        &self.notices
    }

    pub fn notices_mut(&mut self) -> &mut Notifications {
        &mut self.notices
    }
}
