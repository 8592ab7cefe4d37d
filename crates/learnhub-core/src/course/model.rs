//! Course domain models.

use crate::auth::UserProfile;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single content section inside a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseContent {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A course record as served by the listing endpoints.
///
/// `is_enrolled` and `students` are derived fields. The local enrolled-id set
/// is the source of truth for enrollment; the flag on a cached record is a
/// projection recomputed from that set, never trusted from the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub content: Vec<CourseContent>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub is_enrolled: bool,
    #[serde(default)]
    pub students: Vec<UserProfile>,
}

/// Pagination and search parameters shared by all listing endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseQuery {
    pub page: u32,
    pub limit: u32,
    pub search: String,
}

impl Default for CourseQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            search: String::new(),
        }
    }
}

impl CourseQuery {
    /// Creates a query for the given search term on the first page.
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: term.into(),
            ..Self::default()
        }
    }

    /// The query-string pairs for a listing request.
    pub fn to_params(&self) -> Vec<(String, String)> {
        vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.limit.to_string()),
            ("search".to_string(), self.search.clone()),
        ]
    }
}

/// Payload for instructor create/update operations.
///
/// Server-computed fields (timestamps, enrollment, derived metadata) are
/// deliberately absent; the client never fabricates them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub content: Vec<CourseContent>,
}
