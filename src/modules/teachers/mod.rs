pub mod controller;
pub mod service;

pub use controller::{TeachersPage, stat_cards};
pub use service::Teachers;
