//! Response testing and assertions.
//!
//! This module provides types for checking HTTP responses and JSON bodies,
//! with hard (abort on first failure) and soft (collect, report at the end)
//! reporting.

mod assertion;
mod results;

pub use assertion::{Assertion, Subject};
pub use results::{AssertionResult, SoftAssertions, TestResults, assert_hard};
