//! Course domain: records, queries, authoring payloads.

pub mod model;

pub use model::{Course, CourseContent, CourseDraft, CourseQuery};
