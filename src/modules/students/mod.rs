pub mod controller;
pub mod service;

pub use controller::{StudentsPage, stat_cards};
pub use service::{StudentService, Students};
