//! Collection synchronizers for courses and progress.

pub mod instructor;
pub mod state;
pub mod store;

#[cfg(test)]
mod instructor_test;
#[cfg(test)]
mod store_test;

pub use instructor::InstructorCourseStore;
pub use state::LoadState;
pub use store::CourseStore;
