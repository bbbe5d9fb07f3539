//! Authprobe Domain - Core types
//!
//! This crate defines the domain model for the authprobe API test client:
//! request and response specifications, the login and password update
//! payloads, and the assertion vocabulary used to validate responses.
//! All types here are pure Rust with no I/O dependencies.

pub mod error;
pub mod models;
pub mod request;
pub mod response;
pub mod testing;

pub use error::{DomainError, DomainResult};
pub use models::{
    ErrorBody, LoginRequest, LoginResponse, UpdatePasswordRequest, UpdatePasswordResponse,
};
pub use request::{Headers, HttpMethod, RequestSpec};
pub use response::{ResponseSpec, StatusCode};
pub use testing::{
    Assertion, AssertionResult, SoftAssertions, Subject, TestResults,
    assert_hard,
};
