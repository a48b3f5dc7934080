//! Per-screen view-state controllers
//!
//! A controller owns one screen's snapshot of student data: it loads from
//! the injected [`StudentStore`], derives what the screen shows and turns
//! user actions into store calls followed by a re-fetch. Controllers never
//! share data; two screens can disagree until both reload.
//!
//! [`StudentStore`]: crate::store::StudentStore

pub mod attendance;
pub mod dashboard;
pub mod directory;
pub mod profile;

#[cfg(test)]
pub(crate) mod memory;

pub use attendance::{AttendanceController, Mark, SaveFailure, SaveOutcome};
pub use dashboard::{DashboardController, DashboardSummary, RECENT_STUDENTS_LIMIT};
pub use directory::{DirectoryController, DirectoryEmpty};
pub use profile::{EditDraft, ProfileController, ProfileStats};

use crate::error::CliError;
use chrono::NaiveDate;

/// Load state of a screen
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Ready(T),
    /// Loaded, but there is nothing to show
    Empty,
    /// Loading failed; the reason is also posted as a notice
    Failed(String),
}

impl<T> ViewState<T> {
    pub fn data(&self) -> Option<&T> {
        match self {
            ViewState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ViewState::Ready(_))
    }
}

impl<T> ViewState<Vec<T>> {
    /// `Ready` for a non-empty collection, `Empty` otherwise
    pub fn from_items(items: Vec<T>) -> Self {
        if items.is_empty() {
            ViewState::Empty
        } else {
            ViewState::Ready(items)
        }
    }

    /// The loaded items, or an empty slice in every other state
    pub fn items(&self) -> &[T] {
        self.data().map(Vec::as_slice).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A user-visible, dismissable message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub description: String,
}

/// Notices raised by a controller, oldest first
#[derive(Debug, Clone, Default)]
pub struct Notifications {
    items: Vec<Notice>,
}

impl Notifications {
    pub fn success(&mut self, title: impl Into<String>, description: impl Into<String>) {
        self.push(NoticeLevel::Success, title.into(), description.into());
    }

    pub fn error(&mut self, title: impl Into<String>, description: impl Into<String>) {
        self.push(NoticeLevel::Error, title.into(), description.into());
    }

    /// Post an error notice describing `err`
    pub fn failure(&mut self, err: &CliError) {
        let title = if err.is_validation() { "Invalid input" } else { "Error" };
        self.error(title, err.to_string());
    }

    /// Remove one notice, returning it
    pub fn dismiss(&mut self, index: usize) -> Option<Notice> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// Remove and return every notice
    pub fn drain(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.items)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.items.iter()
    }

    pub fn last(&self) -> Option<&Notice> {
        self.items.last()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn push(&mut self, level: NoticeLevel, title: String, description: String) {
        self.items.push(Notice {
            level,
            title,
            description,
        });
    }
}

/// Today's date on the operator's clock
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
