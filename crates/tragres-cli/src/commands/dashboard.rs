//! `tragres dashboard` command implementation

use super::{ensure_loaded, heading, new_table};
use crate::controllers::DashboardController;
use crate::error::Result;
use crate::store::StudentStore;
use colored::Colorize;
use std::sync::Arc;

pub async fn run(store: Arc<dyn StudentStore>) -> Result<()> {
    let mut dashboard = DashboardController::new(store);
    dashboard.activate().await;
    ensure_loaded(dashboard.state())?;

    let summary = dashboard.summary();
    heading(&format!("Dashboard for {}", dashboard.today()));
    println!("  Total students:  {}", summary.total_students);
    println!("  Present today:   {}", summary.present_today);
    println!(
        "  Assignments:     {} of {} completed",
        summary.completed_assignments, summary.total_assignments
    );
    println!();

    let recent = dashboard.recent_students();
    if recent.is_empty() {
        println!("No students registered yet.");
        println!("Run 'tragres students add' to register one.");
        return Ok(());
    }

    heading("Recently added:");
    let mut table = new_table();
    table.set_header(vec!["ID", "Name", "Course", "Added"]);
    for student in recent {
        table.add_row(vec![
            student.id.clone(),
            student.name.clone(),
            student.course.clone(),
            student.created_at.format("%Y-%m-%d").to_string(),
        ]);
    }
    println!("{}", table);

    if summary.present_today == 0 {
        println!("{}", "No attendance recorded as present today.".dimmed());
    }

    Ok(())
}
