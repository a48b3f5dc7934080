//! API endpoint paths
//!
//! Paths are relative to the configured base URL and keep the trailing
//! slash the server routes expect.

/// Student collection (list, create)
pub fn students_path() -> String {
    "/students/".to_string()
}

/// A single student (get, update, delete)
pub fn student_path(id: &str) -> String {
    format!("/students/{}/", id)
}

/// Attendance collection of a student (create)
pub fn attendance_path(student_id: &str) -> String {
    format!("/students/{}/attendance/", student_id)
}

/// Assignment collection of a student (create)
pub fn assignments_path(student_id: &str) -> String {
    format!("/students/{}/assignments/", student_id)
}

/// A single assignment (delete)
pub fn assignment_path(student_id: &str, assignment_id: &str) -> String {
    format!("/students/{}/assignments/{}/", student_id, assignment_id)
}

/// Completion toggle of an assignment
pub fn assignment_toggle_path(student_id: &str, assignment_id: &str) -> String {
    format!("/students/{}/assignments/{}/toggle/", student_id, assignment_id)
}

/// Join a base URL and an endpoint path
pub fn url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}
