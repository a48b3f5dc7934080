//! `tragres students` command implementation
//!
//! Lists, shows, registers, edits and deletes students.

use super::{ensure_loaded, heading, new_table, print_notices, warn_if_stale};
use crate::controllers::{DirectoryController, DirectoryEmpty, ProfileController, ViewState};
use crate::error::{CliError, Result};
use crate::store::StudentStore;
use crate::UpdateFields;
use colored::Colorize;
use std::sync::Arc;
use tragres_common::types::{NewStudent, Student};

/// List students, optionally filtered by a search term
pub async fn list(store: Arc<dyn StudentStore>, search: Option<String>) -> Result<()> {
    let mut directory = DirectoryController::new(store);
    directory.activate().await;
    ensure_loaded(directory.state())?;

    if let Some(query) = search {
        directory.set_query(query);
    }

    match directory.empty_reason() {
        Some(DirectoryEmpty::NoStudents) => {
            println!("No students registered yet.");
            println!("Run 'tragres students add' to register one.");
            return Ok(());
        }
        Some(DirectoryEmpty::NoMatches) => {
            println!("No students match '{}'.", directory.query());
            return Ok(());
        }
        None => {}
    }

    let students = directory.filtered();
    let mut table = new_table();
    table.set_header(vec!["ID", "Name", "Course", "Phone", "Email", "Attendance"]);
    for student in &students {
        table.add_row(vec![
            student.id.clone(),
            student.name.clone(),
            student.course.clone(),
            student.phone.clone(),
            student.email.clone().unwrap_or_else(|| "-".to_string()),
            format!("{}%", student.attendance_rate()),
        ]);
    }

    println!("{}", table);
    println!("\nTotal: {} student(s)", students.len());

    Ok(())
}

/// Show one student's profile
pub async fn show(store: Arc<dyn StudentStore>, id: String) -> Result<()> {
    let profile = load_profile(store, &id).await?;
    let Some(student) = profile.student() else {
        return Err(CliError::StudentNotFound(id));
    };

    println!("{}", student.name.green().bold());
    let mut details = new_table();
    details.add_row(vec!["ID", student.id.as_str()]);
    details.add_row(vec!["Phone", student.phone.as_str()]);
    details.add_row(vec!["Email", student.email.as_deref().unwrap_or("-")]);
    details.add_row(vec!["Course", student.course.as_str()]);
    let added = student.created_at.format("%Y-%m-%d").to_string();
    details.add_row(vec!["Added", added.as_str()]);
    println!("{}", details);

    let stats = profile.stats();
    println!(
        "  Attendance:  {}% ({} of {} present)",
        stats.attendance_rate, stats.present, stats.total_attendance
    );
    println!(
        "  Assignments: {} of {} completed",
        stats.completed_assignments, stats.total_assignments
    );
    println!();

    print_assignments(student);
    print_history(&profile);

    Ok(())
}

/// Register a new student
pub async fn add(
    store: Arc<dyn StudentStore>,
    name: String,
    phone: String,
    course: String,
    email: Option<String>,
    photo: Option<String>,
) -> Result<()> {
    let mut new = NewStudent::new(name.trim(), phone.trim(), course.trim());
    if let Some(email) = email.map(|e| e.trim().to_string()).filter(|e| !e.is_empty()) {
        new = new.with_email(email);
    }
    if let Some(photo) = photo.filter(|p| !p.is_empty()) {
        new = new.with_profile_photo(photo);
    }
    new.validate()?;

    // The server may echo only the submitted fields
    let created = store.create_student(new).await?;
    match created.id.as_deref() {
        Some(id) => println!(
            "{} Student added successfully: {} ({})",
            "✓".green(),
            created.name,
            id.dimmed()
        ),
        None => println!("{} Student added successfully: {}", "✓".green(), created.name),
    }

    Ok(())
}

/// Change a student's details through the profile edit flow
pub async fn update(store: Arc<dyn StudentStore>, id: String, fields: UpdateFields) -> Result<()> {
    if fields.is_empty() {
        return Err(CliError::validation(
            "Nothing to update. Pass at least one of --name, --phone, --email, --course or --photo.",
        ));
    }

    let mut profile = load_profile(store, &id).await?;
    if !profile.begin_edit() {
        return Err(CliError::StudentNotFound(id));
    }
    if let Some(draft) = profile.draft_mut() {
        fields.apply(draft);
    }

    profile.save_edit().await?;
    print_notices(profile.notices_mut());
    warn_if_stale(profile.state());

    Ok(())
}

/// Delete a student and all their records
pub async fn delete(store: Arc<dyn StudentStore>, id: String) -> Result<()> {
    let mut profile = load_profile(store, &id).await?;
    if profile.student().is_none() {
        return Err(CliError::StudentNotFound(id));
    }

    profile.delete_student().await?;
    print_notices(profile.notices_mut());

    Ok(())
}

/// Load a profile, failing on anything but a found or missing student
pub(crate) async fn load_profile(store: Arc<dyn StudentStore>, id: &str) -> Result<ProfileController> {
    let mut profile = ProfileController::new(store, id);
    profile.activate().await;
    ensure_loaded(profile.state())?;

    if let ViewState::Empty = profile.state() {
        return Err(CliError::StudentNotFound(id.to_string()));
    }
    Ok(profile)
}

pub(crate) fn print_assignments(student: &Student) {
    heading("Assignments:");
    if student.assignments.is_empty() {
        println!("  No assignments yet.");
        println!();
        return;
    }

    let mut table = new_table();
    table.set_header(vec!["ID", "Title", "Assigned", "Status"]);
    for assignment in &student.assignments {
        let status = match assignment.completed_date {
            Some(date) if assignment.completed => format!("Done {}", date),
            _ if assignment.completed => "Done".to_string(),
            _ => "Open".to_string(),
        };
        table.add_row(vec![
            assignment.id.clone(),
            assignment.title.clone(),
            assignment.assigned_date.to_string(),
            status,
        ]);
    }
    println!("{}", table);
    println!();
}

fn print_history(profile: &ProfileController) {
    heading("Attendance history:");
    let history = profile.history();
    if history.is_empty() {
        println!("  No attendance recorded yet.");
        return;
    }

    let mut table = new_table();
    table.set_header(vec!["Date", "Status", "Topic"]);
    for record in history {
        let status = if record.present { "Present" } else { "Absent" };
        table.add_row(vec![
            record.date.to_string(),
            status.to_string(),
            record.topic.clone().unwrap_or_else(|| "-".to_string()),
        ]);
    }
    println!("{}", table);
}

impl UpdateFields {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.phone.is_none()
            && self.email.is_none()
            && self.course.is_none()
            && self.photo.is_none()
    }

    /// Overwrite the draft with every field that was given
    pub fn apply(&self, draft: &mut crate::controllers::EditDraft) {
        if let Some(ref name) = self.name {
            draft.name = name.clone();
        }
        if let Some(ref phone) = self.phone {
            draft.phone = phone.clone();
        }
        if let Some(ref email) = self.email {
            draft.email = email.clone();
        }
        if let Some(ref course) = self.course {
            draft.course = course.clone();
        }
        if let Some(ref photo) = self.photo {
            draft.profile_photo = photo.clone();
        }
    }
}
