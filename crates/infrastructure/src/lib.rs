//! Authprobe Infrastructure - Adapters and implementations
//!
//! This crate provides the reqwest transport behind the application's
//! `HttpClient` port, the settings loader and logging setup.

pub mod adapters;
pub mod logging;
pub mod settings;

pub use adapters::{DEFAULT_TIMEOUT, ReqwestHttpClient};
pub use settings::{ApiSettings, SettingsError};
