//! Per-course progress models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lightweight course reference attached to a progress record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSummary {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
}

/// Completion state for one course, keyed by course id in the local cache.
///
/// Created lazily on first fetch. The server is authoritative for the
/// percentage and the completed-content list; the client replaces the record
/// wholesale and never increments locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseProgress {
    pub percentage: f32,
    pub completed_content: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_accessed: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course: Option<CourseSummary>,
}

impl Default for CourseProgress {
    /// The zeroed record used when a progress fetch fails: no sections
    /// completed, nothing accessed.
    fn default() -> Self {
        Self {
            percentage: 0.0,
            completed_content: Vec::new(),
            last_accessed: None,
            course: None,
        }
    }
}
