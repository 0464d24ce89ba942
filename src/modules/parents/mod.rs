pub mod controller;
pub mod service;

pub use controller::ParentsPage;
pub use service::{ParentService, Parents};
