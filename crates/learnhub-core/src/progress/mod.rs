//! Progress domain: per-course completion records.

pub mod model;

pub use model::{CourseProgress, CourseSummary};
