pub mod controller;
pub mod service;

pub use controller::GpsPage;
pub use service::GpsService;
