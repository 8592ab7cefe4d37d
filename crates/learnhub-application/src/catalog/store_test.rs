use crate::catalog::{CourseStore, LoadState};
use crate::session::SessionManager;
use async_trait::async_trait;
use learnhub_api::{ApiClient, ApiRequest, ApiResponse, HttpTransport};
use learnhub_core::auth::{CredentialStore, StoredCredentials, UserProfile, UserRole};
use learnhub_core::course::{Course, CourseQuery};
use learnhub_core::notify::{Notification, NotificationKind, NotificationSink};
use learnhub_core::{LearnhubError, Result};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

// Mock transport replaying canned responses in order
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

// Transport that parks every request until released, to hold a mutation
// in flight
struct GateTransport {
    entered: Notify,
    release: Notify,
}

impl GateTransport {
    fn new() -> Self {
        Self {
            entered: Notify::new(),
            release: Notify::new(),
        }
    }
}

#[async_trait]
impl HttpTransport for GateTransport {
    async fn execute(&self, _request: ApiRequest) -> Result<ApiResponse> {
        self.entered.notify_one();
        self.release.notified().await;
        Ok(ApiResponse {
            status: 200,
            body: json!({"success": true}),
        })
    }
}

#[derive(Default)]
struct MemoryCredentialStore {
    slot: Mutex<Option<StoredCredentials>>,
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn load(&self) -> Result<Option<StoredCredentials>> {
        Ok(self.slot.lock().unwrap().clone())
    }

    async fn save(&self, credentials: &StoredCredentials) -> Result<()> {
        *self.slot.lock().unwrap() = Some(credentials.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.slot.lock().unwrap() = None;
        Ok(())
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

fn profile() -> UserProfile {
    UserProfile {
        id: "u1".to_string(),
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
        role: UserRole::Student,
        profile_image: None,
    }
}

async fn store_over(transport: Arc<dyn HttpTransport>) -> (Arc<CourseStore>, Arc<RecordingSink>) {
    let client = Arc::new(ApiClient::new(transport));
    let credentials = Arc::new(MemoryCredentialStore::default());
    credentials
        .save(&StoredCredentials {
            token: "tok".to_string(),
            user: Some(profile()),
        })
        .await
        .unwrap();
    let sink = Arc::new(RecordingSink::default());
    let sessions = Arc::new(SessionManager::new(
        client.clone(),
        credentials,
        sink.clone(),
    ));
    sessions.hydrate().await.unwrap();
    (
        Arc::new(CourseStore::new(client, sessions, sink.clone())),
        sink,
    )
}

fn course_json(id: &str, title: &str, created_at: &str) -> Value {
    json!({
        "_id": id,
        "title": title,
        "description": "",
        "createdAt": created_at,
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

fn sample_course(id: &str, title: &str) -> Course {
    serde_json::from_value(course_json(id, title, "2024-03-01T00:00:00Z")).unwrap()
}

#[tokio::test]
async fn test_fetch_courses_sorts_newest_first() {
    let transport = Arc::new(MockTransport::new(vec![
        listing(vec![
            course_json("c1", "Oldest", "2024-01-01T00:00:00Z"),
            course_json("c3", "Newest", "2024-03-01T00:00:00Z"),
            course_json("c2", "Middle", "2024-02-01T00:00:00Z"),
        ]),
        listing(vec![]), // my-courses cross-reference
    ]));
    let (store, _) = store_over(transport).await;

    let courses = store.fetch_courses(&CourseQuery::default()).await.unwrap();

    let ids: Vec<&str> = courses.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["c3", "c2", "c1"]);
    assert_eq!(store.load_state(), LoadState::Ready);
}

#[tokio::test]
async fn test_enrolled_set_comes_from_dedicated_endpoint() {
    // The listing has no flag on c1 and a (stale) flag on c2; only the
    // my-courses response decides.
    let transport = Arc::new(MockTransport::new(vec![
        listing(vec![
            course_json("c1", "Rust", "2024-03-01T00:00:00Z"),
            json!({
                "_id": "c2",
                "title": "Go",
                "createdAt": "2024-02-01T00:00:00Z",
                "isEnrolled": true,
                "students": []
            }),
        ]),
        listing(vec![course_json("c1", "Rust", "2024-03-01T00:00:00Z")]),
    ]));
    let (store, _) = store_over(transport.clone()).await;

    let courses = store.fetch_courses(&CourseQuery::default()).await.unwrap();

    assert!(store.is_enrolled("c1"));
    assert!(!store.is_enrolled("c2"));
    assert!(courses.iter().find(|c| c.id == "c1").unwrap().is_enrolled);
    assert!(!courses.iter().find(|c| c.id == "c2").unwrap().is_enrolled);

    let seen = transport.seen();
    let paths: Vec<&str> = seen.iter().map(|r| r.path.as_str()).collect();
    assert_eq!(paths, vec!["/courses", "/courses/my-courses"]);
}

#[tokio::test]
async fn test_fetch_my_courses_replaces_collection_and_set() {
    let transport = Arc::new(MockTransport::new(vec![
        listing(vec![
            course_json("c1", "Rust", "2024-03-01T00:00:00Z"),
            course_json("c2", "Go", "2024-02-01T00:00:00Z"),
        ]),
        listing(vec![course_json("c2", "Go", "2024-02-01T00:00:00Z")]),
        listing(vec![course_json("c2", "Go", "2024-02-01T00:00:00Z")]),
    ]));
    let (store, _) = store_over(transport).await;

    store.fetch_courses(&CourseQuery::default()).await.unwrap();
    assert!(store.is_enrolled("c2"));

    let mine = store.fetch_my_courses(&CourseQuery::default()).await.unwrap();

    assert_eq!(mine.len(), 1);
    assert!(mine[0].is_enrolled);
    assert_eq!(store.courses().await.len(), 1);
    assert!(store.is_enrolled("c2"));
    assert!(!store.is_enrolled("c1"));
}

#[tokio::test]
async fn test_enroll_updates_set_entry_and_students() {
    let transport = Arc::new(MockTransport::new(vec![
        listing(vec![course_json("c1", "Rust", "2024-03-01T00:00:00Z")]),
        listing(vec![]),
        ok(json!({"success": true})),
    ]));
    let (store, sink) = store_over(transport).await;

    store.fetch_courses(&CourseQuery::default()).await.unwrap();
    let course = sample_course("c1", "Rust");

    store.enroll(&course).await.unwrap();

    assert!(store.is_enrolled("c1"));
    let cached = store.courses().await;
    let entry = cached.iter().find(|c| c.id == "c1").unwrap();
    assert!(entry.is_enrolled);
    assert_eq!(entry.students.len(), 1);
    assert_eq!(entry.students[0].id, "u1");

    let notifications = sink.notifications.lock().unwrap().clone();
    assert!(notifications
        .iter()
        .any(|n| n.kind == NotificationKind::Success && n.message.contains("Rust")));
}

#[tokio::test]
async fn test_enroll_then_unenroll_restores_pre_enroll_state() {
    let transport = Arc::new(MockTransport::new(vec![
        listing(vec![course_json("c1", "Rust", "2024-03-01T00:00:00Z")]),
        listing(vec![]),
        ok(json!({"success": true})),
        ok(json!({"success": true})),
    ]));
    let (store, _) = store_over(transport).await;

    store.fetch_courses(&CourseQuery::default()).await.unwrap();
    let course = sample_course("c1", "Rust");
    let before = store.courses().await;

    store.enroll(&course).await.unwrap();
    store.unenroll(&course).await.unwrap();

    assert!(!store.is_enrolled("c1"));
    let after = store.courses().await;
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_enroll_tolerates_course_outside_current_page() {
    let transport = Arc::new(MockTransport::new(vec![ok(json!({"success": true}))]));
    let (store, _) = store_over(transport).await;

    // Nothing fetched: the collection is empty, but the set still updates.
    let course = sample_course("c9", "Elsewhere");
    store.enroll(&course).await.unwrap();

    assert!(store.is_enrolled("c9"));
    assert!(store.courses().await.is_empty());
}

#[tokio::test]
async fn test_enroll_without_id_fails_before_any_request() {
    let transport = Arc::new(MockTransport::new(vec![]));
    let (store, _) = store_over(transport.clone()).await;

    let mut course = sample_course("c1", "Rust");
    course.id = String::new();

    let err = store.enroll(&course).await.unwrap_err();
    assert!(err.is_validation());
    assert!(transport.seen().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_second_enroll_rejected_while_first_in_flight() {
    let gate = Arc::new(GateTransport::new());
    let (store, _) = store_over(gate.clone()).await;

    let course = sample_course("c1", "Rust");
    let first = {
        let store = store.clone();
        let course = course.clone();
        tokio::spawn(async move { store.enroll(&course).await })
    };

    // Wait until the first request is parked inside the transport.
    gate.entered.notified().await;

    let err = store.enroll(&course).await.unwrap_err();
    assert!(matches!(err, LearnhubError::InFlight(_)));

    gate.release.notify_one();
    first.await.unwrap().unwrap();

    // The slot is free again once the first mutation resolved.
    assert!(store.is_enrolled("c1"));
}

#[tokio::test]
async fn test_fetch_progress_degrades_to_default_on_failure() {
    let transport = Arc::new(MockTransport::new(vec![Ok(ApiResponse {
        status: 500,
        body: json!({"success": false, "message": "boom"}),
    })]));
    let (store, _) = store_over(transport).await;

    let err = store.fetch_progress("c1").await.unwrap_err();
    assert!(!err.is_validation());

    let cached = store.progress_for("c1").await.unwrap();
    assert_eq!(cached.percentage, 0.0);
    assert!(cached.completed_content.is_empty());
    assert!(cached.last_accessed.is_none());
    assert!(cached.course.is_none());
}

#[tokio::test]
async fn test_progress_requires_identifiers() {
    let transport = Arc::new(MockTransport::new(vec![]));
    let (store, _) = store_over(transport.clone()).await;

    assert!(store.fetch_progress("").await.unwrap_err().is_validation());
    assert!(
        store
            .update_progress("c1", "")
            .await
            .unwrap_err()
            .is_validation()
    );
    assert!(
        store
            .update_progress("", "s1")
            .await
            .unwrap_err()
            .is_validation()
    );
    assert!(transport.seen().is_empty());
}

#[tokio::test]
async fn test_update_progress_replaces_record_wholesale() {
    let transport = Arc::new(MockTransport::new(vec![
        ok(json!({
            "progress": 33.4,
            "completedContent": ["s1"],
            "lastAccessed": "2024-03-01T10:00:00Z"
        })),
        ok(json!({
            "progress": 66.7,
            "completedContent": ["s1", "s2"],
            "lastAccessed": "2024-03-01T10:05:00Z"
        })),
    ]));
    let (store, sink) = store_over(transport).await;

    store.fetch_progress("c1").await.unwrap();
    let updated = store.update_progress("c1", "s2").await.unwrap();

    assert_eq!(updated.percentage, 66.7);
    assert_eq!(updated.completed_content, vec!["s1", "s2"]);
    assert_eq!(store.progress_for("c1").await.unwrap(), updated);

    let notifications = sink.notifications.lock().unwrap().clone();
    assert!(notifications
        .iter()
        .any(|n| n.message == "Section Completed!"));
}

#[tokio::test]
async fn test_update_progress_failure_notifies_and_propagates() {
    let transport = Arc::new(MockTransport::new(vec![Ok(ApiResponse {
        status: 500,
        body: json!({"success": false, "message": "boom"}),
    })]));
    let (store, sink) = store_over(transport).await;

    assert!(store.update_progress("c1", "s1").await.is_err());

    let notifications = sink.notifications.lock().unwrap().clone();
    assert!(notifications
        .iter()
        .any(|n| n.kind == NotificationKind::Error));
}

#[tokio::test]
async fn test_failed_fetch_leaves_errored_state() {
    let transport = Arc::new(MockTransport::new(vec![Err(LearnhubError::transport(
        "connection refused",
    ))]));
    let (store, _) = store_over(transport).await;

    assert_eq!(store.load_state(), LoadState::Idle);
    assert!(store.fetch_courses(&CourseQuery::default()).await.is_err());
    assert_eq!(store.load_state(), LoadState::Errored);
}
