//! Use-case layer of the LearnHub client: the session manager and the
//! collection synchronizers, wired over the API client and the port traits
//! from `learnhub-core`.

pub mod catalog;
pub mod session;

pub use catalog::{CourseStore, InstructorCourseStore, LoadState};
pub use session::SessionManager;
