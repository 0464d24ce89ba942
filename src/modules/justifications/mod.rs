pub mod controller;
pub mod service;

pub use controller::{JustificationsPage, stat_cards};
pub use service::{JustificationService, Justifications};
