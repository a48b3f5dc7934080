//! Student directory with client-side search

use super::{Notifications, ViewState};
use crate::store::StudentStore;
use std::sync::Arc;
use tracing::warn;
use tragres_common::types::Student;

/// Why the directory shows no rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryEmpty {
    /// Nobody has been registered yet
    NoStudents,
    /// Students exist but none match the query
    NoMatches,
}

pub struct DirectoryController {
    store: Arc<dyn StudentStore>,
    state: ViewState<Vec<Student>>,
    query: String,
    notices: Notifications,
}

impl DirectoryController {
    pub fn new(store: Arc<dyn StudentStore>) -> Self {
        Self {
            store,
            state: ViewState::Loading,
            query: String::new(),
            notices: Notifications::default(),
        }
    }

    pub async fn activate(&mut self) {
        self.state = ViewState::Loading;
        self.state = match self.store.list_students().await {
            Ok(students) => ViewState::from_items(students),
            Err(err) => {
                warn!(error = %err, "Directory failed to load students");
                self.notices.failure(&err);
                ViewState::Failed(err.to_string())
            }
        };
    }

    /// Change the search text; filtering happens locally
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn state(&self) -> &ViewState<Vec<Student>> {
        &self.state
    }

    /// Students matching the query, in list order
    pub fn filtered(&self) -> Vec<&Student> {
        let needle = self.query.to_lowercase();
        self.state
            .items()
            .iter()
            .filter(|s| matches(s, &needle))
            .collect()
    }

    /// Set when the directory has nothing to show after loading
    pub fn empty_reason(&self) -> Option<DirectoryEmpty> {
        if !self.filtered().is_empty() || self.state.is_loading() {
            return None;
        }
        if self.state.items().is_empty() {
            Some(DirectoryEmpty::NoStudents)
        } else {
            Some(DirectoryEmpty::NoMatches)
        }
    }

    pub fn notices(&self) -> &Notifications {
        &self.notices
    }

    pub fn notices_mut(&mut self) -> &mut Notifications {
        &mut self.notices
    }
}

/// Case-insensitive substring match on name, course or phone
///
/// `needle` must already be lower-case.
fn matches(student: &Student, needle: &str) -> bool {
    [&student.name, &student.course, &student.phone]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}
