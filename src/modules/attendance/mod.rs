pub mod controller;
pub mod service;

pub use controller::{AttendancePage, stat_cards};
pub use service::{Attendance, AttendanceService};
