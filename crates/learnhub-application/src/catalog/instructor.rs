//! Instructor-side course collection.
//!
//! Authored courses carry server-computed fields the client cannot safely
//! fabricate, so every mutation is followed by a full list re-fetch instead
//! of a local patch.

use crate::catalog::state::LoadState;
use learnhub_api::{ApiClient, Envelope};
use learnhub_core::course::{Course, CourseDraft, CourseQuery};
use learnhub_core::notify::{Notification, NotificationSink};
use learnhub_core::{LearnhubError, Result};
use parking_lot::RwLock as SyncRwLock;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Synchronizes an instructor's own authored courses with the backend.
pub struct InstructorCourseStore {
    client: Arc<ApiClient>,
    notifier: Arc<dyn NotificationSink>,
    courses: RwLock<Vec<Course>>,
    /// The course currently open in the editor, if any.
    current: RwLock<Option<Course>>,
    load_state: SyncRwLock<LoadState>,
    last_error: SyncRwLock<Option<String>>,
}

impl InstructorCourseStore {
    pub fn new(client: Arc<ApiClient>, notifier: Arc<dyn NotificationSink>) -> Self {
        Self {
            client,
            notifier,
            courses: RwLock::new(Vec::new()),
            current: RwLock::new(None),
            load_state: SyncRwLock::new(LoadState::Idle),
            last_error: SyncRwLock::new(None),
        }
    }

    /// Fetches the instructor's authored courses.
    pub async fn fetch_courses(&self, query: &CourseQuery) -> Result<Vec<Course>> {
        *self.load_state.write() = LoadState::Loading;
        let result = self.fetch_courses_inner(query).await;
        *self.load_state.write() = match &result {
            Ok(_) => LoadState::Ready,
            Err(_) => LoadState::Errored,
        };
        match result {
            Ok(courses) => Ok(courses),
            Err(err) => Err(self.record_failure(err, "Failed to fetch instructor courses")),
        }
    }

    async fn fetch_courses_inner(&self, query: &CourseQuery) -> Result<Vec<Course>> {
        let body = self
            .client
            .get("/courses/instructor-courses", &query.to_params())
            .await?;
        let page: Vec<Course> =
            serde_json::from_value::<Envelope<Vec<Course>>>(body)?.into_data()?;

        let mut courses = self.courses.write().await;
        *courses = page.clone();
        Ok(page)
    }

    /// Fetches a single course for editing.
    pub async fn fetch_course(&self, course_id: &str) -> Result<Course> {
        if course_id.is_empty() {
            return Err(LearnhubError::validation("course id is required"));
        }

        let result = match self.client.get(&format!("/courses/{}", course_id), &[]).await {
            Ok(body) => serde_json::from_value::<Envelope<Course>>(body)
                .map_err(LearnhubError::from)
                .and_then(Envelope::into_data),
            Err(err) => Err(err),
        };

        match result {
            Ok(course) => {
                let mut current = self.current.write().await;
                *current = Some(course.clone());
                Ok(course)
            }
            Err(err) => Err(self.record_failure(err, "Failed to fetch course")),
        }
    }

    /// Creates a course, then re-fetches the authored list.
    pub async fn create_course(&self, draft: &CourseDraft) -> Result<()> {
        match self
            .client
            .post("/courses", Some(serde_json::to_value(draft)?))
            .await
        {
            Ok(_) => {
                self.notifier
                    .notify(Notification::success("Course created successfully"));
                self.refetch().await
            }
            Err(err) => Err(self.record_failure(err, "Error creating course")),
        }
    }

    /// Updates a course, then re-fetches the authored list.
    pub async fn update_course(&self, course_id: &str, draft: &CourseDraft) -> Result<()> {
        if course_id.is_empty() {
            return Err(LearnhubError::validation("course id is required"));
        }

        match self
            .client
            .put(
                &format!("/courses/{}", course_id),
                serde_json::to_value(draft)?,
            )
            .await
        {
            Ok(_) => {
                self.notifier
                    .notify(Notification::success("Successfully updated the course!"));
                self.refetch().await
            }
            Err(err) => Err(self.record_failure(err, "Failed to update course")),
        }
    }

    /// Deletes a course, then re-fetches the authored list.
    ///
    /// The title is resolved before the request so the confirmation can name
    /// the course; an entry already gone from the cache falls back to a
    /// generic label.
    pub async fn delete_course(&self, course_id: &str) -> Result<()> {
        if course_id.is_empty() {
            return Err(LearnhubError::validation("course id is required"));
        }

        let title = {
            let courses = self.courses.read().await;
            courses
                .iter()
                .find(|course| course.id == course_id)
                .map(|course| course.title.clone())
                .unwrap_or_else(|| "the course".to_string())
        };

        match self
            .client
            .delete(&format!("/courses/{}", course_id))
            .await
        {
            Ok(_) => {
                self.notifier.notify(Notification::success(format!(
                    "Successfully deleted {}!",
                    title
                )));
                self.refetch().await
            }
            Err(err) => Err(self.record_failure(err, "Failed to delete course")),
        }
    }

    /// Snapshot of the cached authored-course list.
    pub async fn courses(&self) -> Vec<Course> {
        self.courses.read().await.clone()
    }

    /// The course currently open in the editor, if any.
    pub async fn current_course(&self) -> Option<Course> {
        self.current.read().await.clone()
    }

    /// Current load state of the collection view.
    pub fn load_state(&self) -> LoadState {
        *self.load_state.read()
    }

    /// The server message recorded by the most recent failure, if any.
    pub fn last_error(&self) -> Option<String> {
        self.last_error.read().clone()
    }

    /// Full re-fetch after a mutation; the server owns derived fields.
    async fn refetch(&self) -> Result<()> {
        self.fetch_courses(&CourseQuery::default()).await?;
        Ok(())
    }

    /// Records the failure message, surfaces it, and hands the error back.
    fn record_failure(&self, err: LearnhubError, fallback: &str) -> LearnhubError {
        let message = err.server_message().unwrap_or(fallback).to_string();
        *self.last_error.write() = Some(message.clone());
        self.notifier.notify(Notification::error(message));
        err
    }
}
