//! Authprobe Application - Endpoint services and validators
//!
//! This crate wraps an injected [`ports::HttpClient`] into the base client
//! and the typed services for the login and password update endpoints.

pub mod client;
pub mod error;
pub mod ports;
pub mod services;
pub mod validation;

#[cfg(test)]
mod fake;

pub use client::BaseClient;
pub use error::{ApplicationError, ApplicationResult};
pub use ports::{HttpClient, HttpClientError, HttpFuture};
pub use services::{LoginService, UPDATE_PASSWORD_PATH, UpdatePasswordService};
