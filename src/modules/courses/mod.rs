pub mod controller;
pub mod service;

pub use controller::CoursesPage;
pub use service::{CourseService, Courses};
