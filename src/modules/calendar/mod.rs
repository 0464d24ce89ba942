pub mod controller;
pub mod service;

pub use controller::{CalendarPage, PublicCalendar};
pub use service::{CalendarService, Events};
