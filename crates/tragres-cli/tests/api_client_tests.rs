//! HTTP contract tests for the student store
//!
//! Each test mounts the server responses on a mock server and drives
//! [`ApiStore`] against it:
//! - Resource paths and methods
//! - Request bodies
//! - Partial write echoes and empty bodies
//! - Error message extraction and not-found handling

use chrono::NaiveDate;
use serde_json::json;
use std::sync::Arc;
use tragres_cli::api::ApiClient;
use tragres_cli::controllers::ProfileController;
use tragres_cli::store::{ApiStore, StudentLookup, StudentStore};
use tragres_cli::CliError;
use tragres_common::types::{NewStudent, StudentUpdate};
use wiremock::{
    matchers::{body_json, method, path},
    Mock, MockServer, ResponseTemplate,
};

/// A student as the server serializes it
fn student_json(id: &str, name: &str, course: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "phone": "555-0101",
        "email": "",
        "course": course,
        "profilePhoto": "",
        "attendance": [
            {"id": "a1", "date": "2026-10-13", "present": true, "topic": ""}
        ],
        "assignments": [],
        "createdAt": "2026-09-01T09:00:00Z"
    })
}

async fn store_for(server: &MockServer) -> ApiStore {
    let client = ApiClient::new(format!("{}/api/", server.uri())).unwrap();
    ApiStore::new(client)
}

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
}

#[tokio::test]
async fn test_list_students() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/students/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            student_json("s1", "Ana Ray", "Math"),
            student_json("s2", "Ben Lee", "Art"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let students = store_for(&server).await.list_students().await.unwrap();

    let names: Vec<&str> = students.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Ana Ray", "Ben Lee"]);
    assert_eq!(students[0].email, None);
    assert_eq!(students[0].attendance[0].topic, None);
}

#[tokio::test]
async fn test_get_student_found_missing_and_failed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/students/s1/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(student_json("s1", "Ana Ray", "Math")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/students/missing/"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Not found."})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/students/broken/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<h1>Server Error</h1>"))
        .mount(&server)
        .await;

    let store = store_for(&server).await;

    match store.get_student("s1").await {
        StudentLookup::Found(student) => assert_eq!(student.course, "Math"),
        other => panic!("expected Found, got {:?}", other),
    }
    assert!(matches!(store.get_student("missing").await, StudentLookup::NotFound));
    match store.get_student("broken").await {
        StudentLookup::Failed(err) => {
            assert_eq!(err.status(), Some(500));
            assert_eq!(err.to_string(), "Request failed (HTTP 500)");
        }
        other => panic!("expected Failed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_create_student_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/students/"))
        .and(body_json(json!({
            "name": "Ana Ray",
            "phone": "555-0101",
            "email": "ana@example.com",
            "course": "Math"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(student_json("s1", "Ana Ray", "Math")))
        .expect(1)
        .mount(&server)
        .await;

    let new = NewStudent::new("Ana Ray", "555-0101", "Math").with_email("ana@example.com");
    let created = store_for(&server).await.create_student(new).await.unwrap();
    assert_eq!(created.id.as_deref(), Some("s1"));
    assert_eq!(created.into_student().map(|s| s.course), Some("Math".to_string()));
}

/// What the server returns for a create or update: the written fields only
fn field_echo(course: &str) -> serde_json::Value {
    json!({"name": "Ana", "phone": "555", "email": "", "course": course, "profilePhoto": ""})
}

#[tokio::test]
async fn test_create_accepts_field_echo() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/students/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(field_echo("Math")))
        .expect(1)
        .mount(&server)
        .await;

    let created = store_for(&server)
        .await
        .create_student(NewStudent::new("Ana", "555", "Math"))
        .await
        .unwrap();
    assert_eq!(created.id, None);
    assert_eq!(created.name, "Ana");
    assert_eq!(created.email, None);
    assert!(created.into_student().is_none());
}

#[tokio::test]
async fn test_profile_edit_refetches_after_field_echo() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/students/s1/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(student_json("s1", "Ana", "Math")))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/students/s1/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(student_json("s1", "Ana", "Physics")))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/students/s1/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(field_echo("Physics")))
        .expect(1)
        .mount(&server)
        .await;

    let store: Arc<dyn StudentStore> = Arc::new(store_for(&server).await);
    let mut profile = ProfileController::new(store, "s1");
    profile.activate().await;
    assert!(profile.begin_edit());
    profile.draft_mut().unwrap().course = "Physics".to_string();

    profile.save_edit().await.unwrap();

    assert!(!profile.is_editing());
    let student = profile.student().unwrap();
    assert_eq!(student.id, "s1");
    assert_eq!(student.course, "Physics");
    assert_eq!(student.attendance.len(), 1);
    assert_eq!(
        profile.notices().last().map(|n| n.description.as_str()),
        Some("Profile updated successfully")
    );
}

#[tokio::test]
async fn test_update_sends_patch_with_changed_fields() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/students/s1/"))
        .and(body_json(json!({"course": "Physics"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(student_json("s1", "Ana Ray", "Physics")))
        .expect(1)
        .mount(&server)
        .await;

    let update = StudentUpdate {
        course: Some("Physics".to_string()),
        ..StudentUpdate::default()
    };
    let updated = store_for(&server).await.update_student("s1", update).await.unwrap();
    assert_eq!(updated.course, "Physics");
}

#[tokio::test]
async fn test_delete_accepts_empty_ok_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/students/s1/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/students/s1/assignments/h1/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("\n"))
        .expect(1)
        .mount(&server)
        .await;

    let store = store_for(&server).await;
    store.delete_student("s1").await.unwrap();
    store.delete_assignment("s1", "h1").await.unwrap();
}

#[tokio::test]
async fn test_delete_accepts_no_content() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/students/s1/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/students/s1/assignments/h1/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let store = store_for(&server).await;
    store.delete_student("s1").await.unwrap();
    store.delete_assignment("s1", "h1").await.unwrap();
}

#[tokio::test]
async fn test_error_messages() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/students/s1/"))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_json(json!({"detail": "You do not have permission to perform this action."})),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/students/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "phone": ["This field may not be blank."],
            "name": ["This field is required."]
        })))
        .mount(&server)
        .await;

    let store = store_for(&server).await;

    let err = store.delete_student("s1").await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "You do not have permission to perform this action. (HTTP 403)"
    );
    assert!(!err.is_not_found());

    let err = store
        .create_student(NewStudent::new("Ana", "555", "Math"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CliError::RequestFailed { status: 400, ref message }
            if message == "name: This field is required.; phone: This field may not be blank."
    ));
}

#[tokio::test]
async fn test_record_attendance_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/students/s1/attendance/"))
        .and(body_json(json!({"date": "2026-10-14", "present": false, "topic": ""})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "a7", "date": "2026-10-14", "present": false, "topic": ""
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/students/s2/attendance/"))
        .and(body_json(json!({"date": "2026-10-14", "present": true, "topic": "Fractions"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "a8", "date": "2026-10-14", "present": true, "topicCovered": "Fractions"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = store_for(&server).await;

    let absent = store.record_attendance("s1", date(14), false, None).await.unwrap();
    assert!(!absent.present);
    assert_eq!(absent.topic, None);

    let present = store
        .record_attendance("s2", date(14), true, Some("Fractions"))
        .await
        .unwrap();
    assert_eq!(present.topic.as_deref(), Some("Fractions"));
}

#[tokio::test]
async fn test_assignment_add_and_toggle() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/students/s1/assignments/"))
        .and(body_json(json!({"title": "Essay", "assignedDate": "2026-10-14", "completed": false})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "h1", "title": "Essay", "assignedDate": "2026-10-14",
            "completed": false, "completedDate": null
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/students/s1/assignments/h1/toggle/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "h1", "title": "Essay", "assignedDate": "2026-10-14",
            "completed": true, "completedDate": "2026-10-15"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = store_for(&server).await;

    let added = store.add_assignment("s1", "Essay", date(14)).await.unwrap();
    assert!(!added.completed);
    assert_eq!(added.completed_date, None);

    let toggled = store.toggle_assignment("s1", "h1").await.unwrap();
    assert!(toggled.completed);
    assert_eq!(toggled.completed_date, Some(date(15)));
}

#[tokio::test]
async fn test_health_check() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/api/students/"))
        .respond_with(ResponseTemplate::new(405))
        .mount(&server)
        .await;

    let client = ApiClient::new(format!("{}/api", server.uri())).unwrap();
    assert!(client.health_check().await);
}
