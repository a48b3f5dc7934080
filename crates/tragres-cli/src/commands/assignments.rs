//! `tragres assignments` command implementation

use super::{print_notices, warn_if_stale};
use super::students::{load_profile, print_assignments};
use crate::error::Result;
use crate::store::StudentStore;
use colored::Colorize;
use std::sync::Arc;

/// Add an assignment dated today
pub async fn add(store: Arc<dyn StudentStore>, student_id: String, title: String) -> Result<()> {
    let mut profile = load_profile(store, &student_id).await?;
    profile.add_assignment(&title).await?;
    print_notices(profile.notices_mut());
    warn_if_stale(profile.state());

    if let Some(student) = profile.student() {
        print_assignments(student);
    }
    Ok(())
}

/// Flip an assignment between completed and open
pub async fn toggle(
    store: Arc<dyn StudentStore>,
    student_id: String,
    assignment_id: String,
) -> Result<()> {
    let mut profile = load_profile(store, &student_id).await?;
    profile.toggle_assignment(&assignment_id).await?;
    warn_if_stale(profile.state());

    let toggled = profile
        .student()
        .and_then(|s| s.assignments.iter().find(|a| a.id == assignment_id));
    match toggled {
        Some(assignment) if assignment.completed => {
            println!("{} Completed: {}", "✓".green(), assignment.title)
        }
        Some(assignment) => println!("{} Reopened: {}", "✓".green(), assignment.title),
        None => println!("{} Toggled assignment {}", "✓".green(), assignment_id),
    }
    Ok(())
}

/// Remove an assignment
pub async fn delete(
    store: Arc<dyn StudentStore>,
    student_id: String,
    assignment_id: String,
) -> Result<()> {
    let mut profile = load_profile(store, &student_id).await?;
    profile.delete_assignment(&assignment_id).await?;
    print_notices(profile.notices_mut());
    warn_if_stale(profile.state());
    Ok(())
}
