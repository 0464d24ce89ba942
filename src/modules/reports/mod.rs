pub mod controller;
pub mod service;

pub use controller::ReportsPage;
pub use service::Reports;
