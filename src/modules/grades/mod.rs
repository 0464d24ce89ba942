pub mod controller;
pub mod service;

pub use controller::{GradesPage, stat_cards};
pub use service::{GradeService, Grades};
