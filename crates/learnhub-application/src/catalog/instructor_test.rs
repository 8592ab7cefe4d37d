use crate::catalog::{InstructorCourseStore, LoadState};
use async_trait::async_trait;
use learnhub_api::{ApiClient, ApiRequest, ApiResponse, HttpTransport, Method};
use learnhub_core::course::{CourseDraft, CourseQuery};
use learnhub_core::notify::{Notification, NotificationKind, NotificationSink};
use learnhub_core::{LearnhubError, Result};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

struct MockTransport {
    requests: Mutex<Vec<ApiRequest>>,
    responses: Mutex<Vec<Result<ApiResponse>>>,
}

impl MockTransport {
    fn new(responses: Vec<Result<ApiResponse>>) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            responses: Mutex::new(responses.into_iter().rev().collect()),
        }
    }

    fn seen(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop()
            .expect("mock transport ran out of responses")
    }
}

#[derive(Default)]
struct RecordingSink {
    notifications: Mutex<Vec<Notification>>,
}

impl NotificationSink for RecordingSink {
    fn notify(&self, notification: Notification) {
        self.notifications.lock().unwrap().push(notification);
    }
}

fn store_over(transport: Arc<MockTransport>) -> (InstructorCourseStore, Arc<RecordingSink>) {
    let client = Arc::new(ApiClient::new(transport));
    let sink = Arc::new(RecordingSink::default());
    (
        InstructorCourseStore::new(client, sink.clone()),
        sink,
    )
}

fn course_json(id: &str, title: &str) -> Value {
    json!({
        "_id": id,
        "title": title,
        "createdAt": "2024-03-01T00:00:00Z",
        "students": []
    })
}

fn listing(courses: Vec<Value>) -> Result<ApiResponse> {
    Ok(ApiResponse {
        status: 200,
        body: json!({"success": true, "data": courses}),
    })
}

fn ok(body: Value) -> Result<ApiResponse> {
    Ok(ApiResponse { status: 200, body })
}

#[tokio::test]
async fn test_fetch_courses_fills_collection() {
    let transport = Arc::new(MockTransport::new(vec![listing(vec![
        course_json("c1", "Rust 101"),
        course_json("c2", "Rust 201"),
    ])]));
    let (store, _) = store_over(transport);

    let courses = store.fetch_courses(&CourseQuery::default()).await.unwrap();

    assert_eq!(courses.len(), 2);
    assert_eq!(store.courses().await.len(), 2);
    assert_eq!(store.load_state(), LoadState::Ready);
    assert!(store.last_error().is_none());
}

#[tokio::test]
async fn test_fetch_course_caches_current() {
    let transport = Arc::new(MockTransport::new(vec![ok(
        json!({"success": true, "data": course_json("c1", "Rust 101")}),
    )]));
    let (store, _) = store_over(transport);

    let course = store.fetch_course("c1").await.unwrap();

    assert_eq!(course.title, "Rust 101");
    assert_eq!(store.current_course().await.unwrap().id, "c1");
}

#[tokio::test]
async fn test_create_course_refetches_list() {
    let transport = Arc::new(MockTransport::new(vec![
        ok(json!({"success": true, "data": course_json("c1", "New Course")})),
        listing(vec![course_json("c1", "New Course")]),
    ]));
    let (store, sink) = store_over(transport.clone());

    store
        .create_course(&CourseDraft {
            title: "New Course".to_string(),
            ..CourseDraft::default()
        })
        .await
        .unwrap();

    let seen = transport.seen();
    assert_eq!(seen[0].method, Method::Post);
    assert_eq!(seen[0].path, "/courses");
    assert_eq!(seen[1].method, Method::Get);
    assert_eq!(seen[1].path, "/courses/instructor-courses");

    assert_eq!(store.courses().await.len(), 1);
    let notifications = sink.notifications.lock().unwrap().clone();
    assert!(notifications
        .iter()
        .any(|n| n.kind == NotificationKind::Success));
}

#[tokio::test]
async fn test_update_course_refetches_list() {
    let transport = Arc::new(MockTransport::new(vec![
        ok(json!({"success": true})),
        listing(vec![course_json("c1", "Renamed")]),
    ]));
    let (store, _) = store_over(transport.clone());

    store
        .update_course(
            "c1",
            &CourseDraft {
                title: "Renamed".to_string(),
                ..CourseDraft::default()
            },
        )
        .await
        .unwrap();

    let seen = transport.seen();
    assert_eq!(seen[0].method, Method::Put);
    assert_eq!(seen[0].path, "/courses/c1");
    assert_eq!(store.courses().await[0].title, "Renamed");
}

#[tokio::test]
async fn test_update_course_requires_id() {
    let transport = Arc::new(MockTransport::new(vec![]));
    let (store, _) = store_over(transport.clone());

    let err = store
        .update_course("", &CourseDraft::default())
        .await
        .unwrap_err();

    assert!(err.is_validation());
    assert!(transport.seen().is_empty());
}

#[tokio::test]
async fn test_delete_course_names_cached_title() {
    let transport = Arc::new(MockTransport::new(vec![
        listing(vec![course_json("c1", "Rust 101")]),
        ok(json!({"success": true})),
        listing(vec![]),
    ]));
    let (store, sink) = store_over(transport);

    store.fetch_courses(&CourseQuery::default()).await.unwrap();
    store.delete_course("c1").await.unwrap();

    let notifications = sink.notifications.lock().unwrap().clone();
    assert!(notifications
        .iter()
        .any(|n| n.message == "Successfully deleted Rust 101!"));
    assert!(store.courses().await.is_empty());
}

#[tokio::test]
async fn test_delete_unknown_course_falls_back_to_generic_label() {
    let transport = Arc::new(MockTransport::new(vec![
        ok(json!({"success": true})),
        listing(vec![]),
    ]));
    let (store, sink) = store_over(transport);

    store.delete_course("ghost").await.unwrap();

    let notifications = sink.notifications.lock().unwrap().clone();
    assert!(notifications
        .iter()
        .any(|n| n.message == "Successfully deleted the course!"));
}

#[tokio::test]
async fn test_failure_records_server_message() {
    let transport = Arc::new(MockTransport::new(vec![Ok(ApiResponse {
        status: 403,
        body: json!({"success": false, "message": "Not your course"}),
    })]));
    let (store, sink) = store_over(transport);

    let err = store.delete_course("c1").await.unwrap_err();

    assert!(matches!(err, LearnhubError::Api { status: 403, .. }));
    assert_eq!(store.last_error(), Some("Not your course".to_string()));
    let notifications = sink.notifications.lock().unwrap().clone();
    assert!(notifications
        .iter()
        .any(|n| n.kind == NotificationKind::Error && n.message == "Not your course"));
}

#[tokio::test]
async fn test_failed_fetch_records_fallback_message() {
    let transport = Arc::new(MockTransport::new(vec![Err(LearnhubError::transport(
        "connection refused",
    ))]));
    let (store, _) = store_over(transport);

    assert!(store.fetch_courses(&CourseQuery::default()).await.is_err());
    assert_eq!(store.load_state(), LoadState::Errored);
    assert_eq!(
        store.last_error(),
        Some("Failed to fetch instructor courses".to_string())
    );
}
