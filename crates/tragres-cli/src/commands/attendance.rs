//! `tragres attendance` command implementation

use super::{date_arg, ensure_loaded, heading, new_table, print_notices};
use crate::controllers::AttendanceController;
use crate::error::{CliError, Result};
use crate::store::StudentStore;
use colored::Colorize;
use std::sync::Arc;
use tragres_common::types::Presence;

/// Marks requested on the command line
#[derive(Debug, Clone, Default)]
pub struct MarkRequest {
    pub present: Vec<String>,
    pub absent: Vec<String>,
    /// Topic for every student
    pub topic: Option<String>,
    /// Raw `ID=TEXT` per-student topics
    pub notes: Vec<String>,
}

/// Show each student's mark for a date
pub async fn show(store: Arc<dyn StudentStore>, date: Option<String>) -> Result<()> {
    let date = date_arg(date.as_deref())?;
    let mut attendance = AttendanceController::new(store, date);
    attendance.activate().await;
    ensure_loaded(attendance.state())?;

    if attendance.students().is_empty() {
        println!("No students registered yet.");
        return Ok(());
    }

    heading(&format!("Attendance for {}", date));
    let mut table = new_table();
    table.set_header(vec!["ID", "Name", "Course", "Status", "Topic"]);
    for student in attendance.students() {
        let mark = attendance.mark(&student.id);
        let status = match mark.presence {
            Presence::Present => "Present".green().to_string(),
            Presence::Absent => "Absent".red().to_string(),
            Presence::Unmarked => "-".to_string(),
        };
        let topic = if mark.topic.is_empty() { "-".to_string() } else { mark.topic };
        table.add_row(vec![
            student.id.clone(),
            student.name.clone(),
            student.course.clone(),
            status,
            topic,
        ]);
    }
    println!("{}", table);

    let tally = attendance.tally();
    println!(
        "\nPresent: {}  Absent: {}  Unmarked: {}",
        tally.present, tally.absent, tally.unmarked
    );

    Ok(())
}

/// Stage the requested marks on top of what is saved, then save
pub async fn save(
    store: Arc<dyn StudentStore>,
    date: Option<String>,
    request: MarkRequest,
) -> Result<()> {
    let date = date_arg(date.as_deref())?;
    let mut attendance = AttendanceController::new(store, date);
    attendance.activate().await;
    ensure_loaded(attendance.state())?;

    stage(&mut attendance, &request)?;

    let outcome = attendance.save().await?;
    if let Some(failure) = outcome.failure {
        eprintln!(
            "{} Saved {} of {} before the failure",
            "✗".red(),
            outcome.saved,
            outcome.attempted
        );
        return Err(failure.error);
    }

    print_notices(attendance.notices_mut());
    Ok(())
}

fn stage(attendance: &mut AttendanceController, request: &MarkRequest) -> Result<()> {
    if let Some(id) = request.present.iter().find(|id| request.absent.contains(*id)) {
        return Err(CliError::validation(format!(
            "Student '{}' cannot be both present and absent",
            id
        )));
    }

    for id in &request.present {
        mark(attendance, id, Presence::Present)?;
    }
    for id in &request.absent {
        mark(attendance, id, Presence::Absent)?;
    }

    if let Some(ref topic) = request.topic {
        attendance.apply_topic_to_all(topic);
    }

    for note in &request.notes {
        let (id, text) = note.split_once('=').ok_or_else(|| {
            CliError::validation(format!("Invalid note '{}': expected ID=TEXT", note))
        })?;
        if !attendance.set_topic(id.trim(), text.trim()) {
            return Err(unknown_student(id.trim()));
        }
    }

    Ok(())
}

fn mark(attendance: &mut AttendanceController, id: &str, presence: Presence) -> Result<()> {
    if attendance.set_presence(id, presence) {
        Ok(())
    } else {
        Err(unknown_student(id))
    }
}

fn unknown_student(id: &str) -> CliError {
    CliError::validation(format!("Unknown student ID: {}", id))
}
