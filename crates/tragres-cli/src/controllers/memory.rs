//! In-memory [`StudentStore`] for controller tests
//!
//! Keeps students in a vector, records every call in order and can be told
//! to fail specific operations.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::error::{CliError, Result};
use crate::store::{StudentLookup, StudentStore};
use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tragres_common::types::{
    Assignment, AttendanceRecord, NewStudent, SavedStudent, Student, StudentUpdate,
};

pub fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
}

/// A student created on 2026-09-`created_day`, with no records
pub fn student(id: &str, name: &str, course: &str, phone: &str, created_day: u32) -> Student {
    Student {
        id: id.to_string(),
        name: name.to_string(),
        phone: phone.to_string(),
        email: None,
        course: course.to_string(),
        profile_photo: None,
        attendance: Vec::new(),
        assignments: Vec::new(),
        created_at: Utc.with_ymd_and_hms(2026, 9, created_day, 9, 0, 0).unwrap(),
    }
}

pub fn record(id: &str, date: NaiveDate, present: bool, topic: Option<&str>) -> AttendanceRecord {
    AttendanceRecord {
        id: id.to_string(),
        date,
        present,
        topic: topic.map(str::to_string),
    }
}

pub fn assignment(id: &str, title: &str, completed: bool) -> Assignment {
    Assignment {
        id: id.to_string(),
        title: title.to_string(),
        assigned_date: day(1),
        completed,
        completed_date: completed.then(|| day(2)),
    }
}

#[derive(Default)]
pub struct MemoryStore {
    students: Mutex<Vec<Student>>,
    calls: Mutex<Vec<String>>,
    failing: Mutex<Vec<String>>,
    next_id: AtomicUsize,
    today: Option<NaiveDate>,
}

impl MemoryStore {
    pub fn with_students(students: Vec<Student>) -> Self {
        Self {
            students: Mutex::new(students),
            today: Some(day(14)),
            ..Self::default()
        }
    }

    /// Make every call whose log entry starts with `prefix` fail with HTTP 500
    pub fn fail_on(&self, prefix: &str) {
        self.failing.lock().unwrap().push(prefix.to_string());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls whose log entry starts with `prefix`
    pub fn calls_to(&self, prefix: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.starts_with(prefix))
            .collect()
    }

    pub fn snapshot(&self, id: &str) -> Option<Student> {
        self.students.lock().unwrap().iter().find(|s| s.id == id).cloned()
    }

    fn enter(&self, call: String) -> Result<()> {
        let failing = self
            .failing
            .lock()
            .unwrap()
            .iter()
            .any(|prefix| call.starts_with(prefix.as_str()));
        self.calls.lock().unwrap().push(call);
        if failing {
            return Err(CliError::request_failed(500, "Request failed"));
        }
        Ok(())
    }

    fn mint(&self, prefix: &str) -> String {
        format!("{}{}", prefix, self.next_id.fetch_add(1, Ordering::SeqCst) + 1)
    }

    fn with_student<T>(&self, id: &str, f: impl FnOnce(&mut Student) -> Result<T>) -> Result<T> {
        let mut students = self.students.lock().unwrap();
        match students.iter_mut().find(|s| s.id == id) {
            Some(student) => f(student),
            None => Err(CliError::request_failed(404, "Not found.")),
        }
    }
}

#[async_trait]
impl StudentStore for MemoryStore {
    async fn list_students(&self) -> Result<Vec<Student>> {
        self.enter("list".to_string())?;
        Ok(self.students.lock().unwrap().clone())
    }

    async fn get_student(&self, id: &str) -> StudentLookup {
        if let Err(err) = self.enter(format!("get {}", id)) {
            return StudentLookup::Failed(err);
        }
        StudentLookup::from(self.with_student(id, |s| Ok(s.clone())))
    }

    async fn create_student(&self, new: NewStudent) -> Result<SavedStudent> {
        self.enter(format!("create {}", new.name))?;
        let created = Student {
            id: self.mint("s"),
            name: new.name,
            phone: new.phone,
            email: new.email,
            course: new.course,
            profile_photo: new.profile_photo,
            attendance: Vec::new(),
            assignments: Vec::new(),
            created_at: Utc::now(),
        };
        self.students.lock().unwrap().push(created.clone());
        Ok(SavedStudent::from(created))
    }

    async fn update_student(&self, id: &str, update: StudentUpdate) -> Result<SavedStudent> {
        self.enter(format!("update {}", id))?;
        self.with_student(id, |s| {
            if let Some(name) = update.name {
                s.name = name;
            }
            if let Some(phone) = update.phone {
                s.phone = phone;
            }
            if let Some(email) = update.email {
                s.email = Some(email).filter(|e| !e.is_empty());
            }
            if let Some(course) = update.course {
                s.course = course;
            }
            if let Some(photo) = update.profile_photo {
                s.profile_photo = Some(photo).filter(|p| !p.is_empty());
            }
            Ok(SavedStudent::from(s.clone()))
        })
    }

    async fn delete_student(&self, id: &str) -> Result<()> {
        self.enter(format!("delete {}", id))?;
        let mut students = self.students.lock().unwrap();
        let before = students.len();
        students.retain(|s| s.id != id);
        if students.len() == before {
            return Err(CliError::request_failed(404, "Not found."));
        }
        Ok(())
    }

    async fn record_attendance(
        &self,
        student_id: &str,
        date: NaiveDate,
        present: bool,
        topic: Option<&str>,
    ) -> Result<AttendanceRecord> {
        self.enter(format!("attendance {} {} {}", student_id, date, present))?;
        let id = self.mint("a");
        self.with_student(student_id, |s| {
            s.attendance.retain(|a| a.date != date);
            let created = record(&id, date, present, topic.filter(|t| !t.is_empty()));
            s.attendance.push(created.clone());
            Ok(created)
        })
    }

    async fn add_assignment(
        &self,
        student_id: &str,
        title: &str,
        assigned_date: NaiveDate,
    ) -> Result<Assignment> {
        self.enter(format!("assign {} {}", student_id, title))?;
        let id = self.mint("h");
        self.with_student(student_id, |s| {
            let created = Assignment {
                id,
                title: title.to_string(),
                assigned_date,
                completed: false,
                completed_date: None,
            };
            s.assignments.push(created.clone());
            Ok(created)
        })
    }

    async fn toggle_assignment(&self, student_id: &str, assignment_id: &str) -> Result<Assignment> {
        self.enter(format!("toggle {} {}", student_id, assignment_id))?;
        let today = self.today.unwrap_or_else(|| day(14));
        self.with_student(student_id, |s| {
            let found = s
                .assignments
                .iter_mut()
                .find(|a| a.id == assignment_id)
                .ok_or_else(|| CliError::request_failed(404, "Not found."))?;
            *found = found.toggled(today);
            Ok(found.clone())
        })
    }

    async fn delete_assignment(&self, student_id: &str, assignment_id: &str) -> Result<()> {
        self.enter(format!("unassign {} {}", student_id, assignment_id))?;
        self.with_student(student_id, |s| {
            let before = s.assignments.len();
            s.assignments.retain(|a| a.id != assignment_id);
            if s.assignments.len() == before {
                return Err(CliError::request_failed(404, "Not found."));
            }
            Ok(())
        })
    }
}
