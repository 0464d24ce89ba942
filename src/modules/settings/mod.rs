pub mod controller;
pub mod service;

pub use controller::SettingsPage;
pub use service::SettingsService;
