//! Learner-side collection synchronizer.
//!
//! Keeps the in-memory course list, the enrolled-course id set, and the
//! per-course progress cache consistent with the backend. The enrolled-id
//! set is the single source of truth for enrollment; the `is_enrolled` flag
//! on a cached record is a projection recomputed from the set after every
//! fetch and mutation.

use crate::catalog::state::LoadState;
use crate::session::SessionManager;
use chrono::{DateTime, Utc};
use learnhub_api::{ApiClient, Envelope};
use learnhub_core::course::{Course, CourseQuery};
use learnhub_core::notify::{Notification, NotificationSink};
use learnhub_core::progress::{CourseProgress, CourseSummary};
use learnhub_core::{LearnhubError, Result};
use parking_lot::{Mutex, RwLock as SyncRwLock};
use serde::Deserialize;
use serde_json::json;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Wire shape of `GET`/`POST /progress/:courseId`.
///
/// Every field is optional; the backend omits them for courses without
/// recorded progress.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProgressResponse {
    #[serde(default)]
    progress: Option<f32>,
    #[serde(default)]
    completed_content: Option<Vec<String>>,
    #[serde(default)]
    last_accessed: Option<DateTime<Utc>>,
    #[serde(default)]
    course: Option<CourseSummary>,
}

impl From<ProgressResponse> for CourseProgress {
    fn from(response: ProgressResponse) -> Self {
        Self {
            percentage: response.progress.unwrap_or(0.0),
            completed_content: response.completed_content.unwrap_or_default(),
            last_accessed: response.last_accessed,
            course: response.course,
        }
    }
}

/// Synchronizes the learner-facing course collection with the backend.
pub struct CourseStore {
    client: Arc<ApiClient>,
    sessions: Arc<SessionManager>,
    notifier: Arc<dyn NotificationSink>,
    courses: RwLock<Vec<Course>>,
    /// Canonical local cache of "am I enrolled", fed by the dedicated
    /// my-courses endpoint. Kept behind a synchronous lock so
    /// [`CourseStore::is_enrolled`] stays a plain predicate.
    enrolled_ids: SyncRwLock<HashSet<String>>,
    progress: RwLock<HashMap<String, CourseProgress>>,
    load_state: SyncRwLock<LoadState>,
    /// Course ids with an enroll/unenroll currently in flight. A second
    /// mutation for the same id is rejected, not coalesced.
    in_flight: Mutex<HashSet<String>>,
}

impl CourseStore {
    pub fn new(
        client: Arc<ApiClient>,
        sessions: Arc<SessionManager>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            client,
            sessions,
            notifier,
            courses: RwLock::new(Vec::new()),
            enrolled_ids: SyncRwLock::new(HashSet::new()),
            progress: RwLock::new(HashMap::new()),
            load_state: SyncRwLock::new(LoadState::Idle),
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    /// Fetches a page of the public course listing.
    ///
    /// The listing's own `isEnrolled` flags are discarded: the enrolled-id
    /// set is refreshed from the dedicated my-courses endpoint and every
    /// flag is recomputed from it, since the two endpoints may be served by
    /// different, eventually-consistent paths. Results are ordered newest
    /// first; this ordering is part of the contract.
    pub async fn fetch_courses(&self, query: &CourseQuery) -> Result<Vec<Course>> {
        *self.load_state.write() = LoadState::Loading;
        let result = self.fetch_courses_inner(query).await;
        *self.load_state.write() = match &result {
            Ok(_) => LoadState::Ready,
            Err(_) => LoadState::Errored,
        };
        result
    }

    async fn fetch_courses_inner(&self, query: &CourseQuery) -> Result<Vec<Course>> {
        let body = self.client.get("/courses", &query.to_params()).await?;
        let mut page: Vec<Course> =
            serde_json::from_value::<Envelope<Vec<Course>>>(body)?.into_data()?;

        let enrolled = self.fetch_enrolled_ids().await?;

        page.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let mut courses = self.courses.write().await;
        let mut ids = self.enrolled_ids.write();
        *ids = enrolled;
        for course in &mut page {
            course.is_enrolled = ids.contains(&course.id);
        }
        *courses = page.clone();

        Ok(page)
    }

    /// Fetches the caller's enrolled courses into the same collection.
    ///
    /// Shares the collection with [`CourseStore::fetch_courses`]: whichever
    /// fetch resolves last wins. The response ids replace the enrolled set
    /// wholesale, since this endpoint is its source of truth.
    pub async fn fetch_my_courses(&self, query: &CourseQuery) -> Result<Vec<Course>> {
        *self.load_state.write() = LoadState::Loading;
        let result = self.fetch_my_courses_inner(query).await;
        *self.load_state.write() = match &result {
            Ok(_) => LoadState::Ready,
            Err(_) => LoadState::Errored,
        };
        result
    }

    async fn fetch_my_courses_inner(&self, query: &CourseQuery) -> Result<Vec<Course>> {
        let body = self
            .client
            .get("/courses/my-courses", &query.to_params())
            .await?;
        let mut page: Vec<Course> =
            serde_json::from_value::<Envelope<Vec<Course>>>(body)?.into_data()?;

        page.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let mut courses = self.courses.write().await;
        let mut ids = self.enrolled_ids.write();
        *ids = page.iter().map(|course| course.id.clone()).collect();
        for course in &mut page {
            course.is_enrolled = true;
        }
        *courses = page.clone();

        Ok(page)
    }

    /// Enrolls the current user in a course.
    ///
    /// On success the enrolled set, the cached entry's flag, and its
    /// `students` list are updated together. The entry may legitimately be
    /// absent from the current page; the set is updated regardless.
    pub async fn enroll(&self, course: &Course) -> Result<()> {
        if course.id.is_empty() {
            return Err(LearnhubError::validation("course id is required"));
        }
        self.begin_mutation(&course.id)?;
        let result = self.enroll_inner(course).await;
        self.end_mutation(&course.id);
        result
    }

    async fn enroll_inner(&self, course: &Course) -> Result<()> {
        self.client
            .post(
                &format!("/courses/{}/enroll", course.id),
                Some(json!({ "courseId": course.id })),
            )
            .await?;

        let user = self.sessions.current_user().await;

        let mut courses = self.courses.write().await;
        let mut ids = self.enrolled_ids.write();
        ids.insert(course.id.clone());
        if let Some(entry) = courses.iter_mut().find(|c| c.id == course.id) {
            entry.is_enrolled = true;
            if let Some(user) = &user {
                if !entry.students.iter().any(|s| s.id == user.id) {
                    entry.students.push(user.clone());
                }
            }
        }
        drop(ids);
        drop(courses);

        self.notifier.notify(Notification::success(format!(
            "Successfully enrolled in {}!",
            course.title
        )));
        Ok(())
    }

    /// Removes the current user's enrollment. Mirror of [`CourseStore::enroll`].
    pub async fn unenroll(&self, course: &Course) -> Result<()> {
        if course.id.is_empty() {
            return Err(LearnhubError::validation("course id is required"));
        }
        self.begin_mutation(&course.id)?;
        let result = self.unenroll_inner(course).await;
        self.end_mutation(&course.id);
        result
    }

    async fn unenroll_inner(&self, course: &Course) -> Result<()> {
        self.client
            .post(
                &format!("/courses/{}/unenroll", course.id),
                Some(json!({ "courseId": course.id })),
            )
            .await?;

        let user = self.sessions.current_user().await;

        let mut courses = self.courses.write().await;
        let mut ids = self.enrolled_ids.write();
        ids.remove(&course.id);
        if let Some(entry) = courses.iter_mut().find(|c| c.id == course.id) {
            entry.is_enrolled = false;
            if let Some(user) = &user {
                entry.students.retain(|s| s.id != user.id);
            }
        }
        drop(ids);
        drop(courses);

        self.notifier
            .notify(Notification::success(format!("{} unenrolled!", course.title)));
        Ok(())
    }

    /// Whether the current user is enrolled in the given course.
    ///
    /// A pure read of the enrolled-id set; never touches the network.
    pub fn is_enrolled(&self, course_id: &str) -> bool {
        self.enrolled_ids.read().contains(course_id)
    }

    /// Fetches the progress record for a course.
    ///
    /// A failure degrades to the zeroed default record in the cache so the
    /// caller's rendering flow survives, but the error still propagates for
    /// reporting.
    pub async fn fetch_progress(&self, course_id: &str) -> Result<CourseProgress> {
        if course_id.is_empty() {
            return Err(LearnhubError::validation("course id is required"));
        }

        let result = match self.client.get(&format!("/progress/{}", course_id), &[]).await {
            Ok(body) => serde_json::from_value::<ProgressResponse>(body)
                .map(CourseProgress::from)
                .map_err(LearnhubError::from),
            Err(err) => Err(err),
        };

        match result {
            Ok(record) => {
                let mut progress = self.progress.write().await;
                progress.insert(course_id.to_string(), record.clone());
                Ok(record)
            }
            Err(err) => {
                tracing::warn!(course_id, error = %err, "progress fetch failed, caching default");
                let mut progress = self.progress.write().await;
                progress.insert(course_id.to_string(), CourseProgress::default());
                Err(err)
            }
        }
    }

    /// Marks a content section complete and adopts the server's recomputed
    /// record wholesale; the client never increments locally.
    pub async fn update_progress(
        &self,
        course_id: &str,
        content_id: &str,
    ) -> Result<CourseProgress> {
        if course_id.is_empty() || content_id.is_empty() {
            return Err(LearnhubError::validation(
                "course id and content id are required",
            ));
        }

        let result = match self
            .client
            .post(
                &format!("/progress/{}", course_id),
                Some(json!({ "contentId": content_id })),
            )
            .await
        {
            Ok(body) => serde_json::from_value::<ProgressResponse>(body)
                .map(CourseProgress::from)
                .map_err(LearnhubError::from),
            Err(err) => Err(err),
        };

        match result {
            Ok(record) => {
                {
                    let mut progress = self.progress.write().await;
                    progress.insert(course_id.to_string(), record.clone());
                }
                self.notifier
                    .notify(Notification::success("Section Completed!"));
                Ok(record)
            }
            Err(err) => {
                self.notifier.notify(Notification::error(
                    "Failed to update progress. Please try again.",
                ));
                Err(err)
            }
        }
    }

    /// Snapshot of the cached course collection.
    pub async fn courses(&self) -> Vec<Course> {
        self.courses.read().await.clone()
    }

    /// Cached progress record for a course, if one was fetched.
    pub async fn progress_for(&self, course_id: &str) -> Option<CourseProgress> {
        self.progress.read().await.get(course_id).cloned()
    }

    /// Current load state of the collection view.
    pub fn load_state(&self) -> LoadState {
        *self.load_state.read()
    }

    /// Refreshes the enrolled-id set from the my-courses endpoint.
    ///
    /// Uses the default query: the set answers "am I enrolled" globally,
    /// not per search page.
    async fn fetch_enrolled_ids(&self) -> Result<HashSet<String>> {
        let body = self
            .client
            .get("/courses/my-courses", &CourseQuery::default().to_params())
            .await?;
        let mine: Vec<Course> =
            serde_json::from_value::<Envelope<Vec<Course>>>(body)?.into_data()?;
        Ok(mine.into_iter().map(|course| course.id).collect())
    }

    fn begin_mutation(&self, course_id: &str) -> Result<()> {
        let mut in_flight = self.in_flight.lock();
        if !in_flight.insert(course_id.to_string()) {
            return Err(LearnhubError::InFlight(course_id.to_string()));
        }
        Ok(())
    }

    fn end_mutation(&self, course_id: &str) {
        self.in_flight.lock().remove(course_id);
    }
}
