// Settings service module
// Loads and saves engine settings as TOML

mod service;

pub use service::SettingsService;
