pub mod config;
pub mod error_handler;
pub mod service_profiles;
pub mod services;
pub mod telemetry;
