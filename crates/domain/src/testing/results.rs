//! Assertion outcomes and the two reporting disciplines.
//!
//! [`assert_hard`] turns a failed check into an error on the spot.
//! [`SoftAssertions`] records every check and reports them together when the
//! scoped unit finishes.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use super::{Assertion, Subject};
use crate::error::{DomainError, DomainResult};

/// Result of running a single assertion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssertionResult {
    /// The assertion that was run.
    pub assertion: Assertion,
    /// Whether the assertion passed.
    pub passed: bool,
    /// Actual value found (for display).
    pub actual: Option<String>,
    /// Error message if failed.
    pub error: Option<String>,
}

impl AssertionResult {
    /// Create a passed result.
    #[must_use]
    pub const fn pass(assertion: Assertion) -> Self {
        Self {
            assertion,
            passed: true,
            actual: None,
            error: None,
        }
    }

    /// Create a passed result with actual value.
    #[must_use]
    pub fn pass_with_value(assertion: Assertion, actual: impl Into<String>) -> Self {
        Self {
            assertion,
            passed: true,
            actual: Some(actual.into()),
            error: None,
        }
    }

    /// Create a failed result.
    #[must_use]
    pub fn fail(assertion: Assertion, error: impl Into<String>) -> Self {
        Self {
            assertion,
            passed: false,
            actual: None,
            error: Some(error.into()),
        }
    }

    /// Create a failed result with actual value.
    #[must_use]
    pub fn fail_with_value(
        assertion: Assertion,
        actual: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            assertion,
            passed: false,
            actual: Some(actual.into()),
            error: Some(error.into()),
        }
    }

    /// One-line summary used in reports.
    #[must_use]
    pub fn summary(&self) -> String {
        let status = if self.passed { "ok" } else { "FAILED" };
        match &self.error {
            Some(error) => format!("{} ... {status}: {error}", self.assertion.description()),
            None => format!("{} ... {status}", self.assertion.description()),
        }
    }
}

/// Evaluates an assertion and aborts on failure.
///
/// # Errors
///
/// Returns [`DomainError::AssertionFailed`] when the check does not hold.
pub fn assert_hard<'a>(
    assertion: &Assertion,
    subject: impl Into<Subject<'a>>,
) -> DomainResult<AssertionResult> {
    let result = assertion.evaluate(subject.into());
    if result.passed {
        Ok(result)
    } else {
        Err(DomainError::AssertionFailed {
            assertion: assertion.description(),
            message: result.error.unwrap_or_default(),
        })
    }
}

/// Accumulates assertion outcomes without aborting.
#[derive(Debug)]
pub struct SoftAssertions {
    name: String,
    results: Vec<AssertionResult>,
    started: Instant,
}

impl SoftAssertions {
    /// Opens a scoped unit named `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            results: Vec::new(),
            started: Instant::now(),
        }
    }

    /// Name of the scoped unit.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Evaluates and records an assertion. Returns whether it passed.
    pub fn check<'a>(&mut self, assertion: Assertion, subject: impl Into<Subject<'a>>) -> bool {
        let result = assertion.evaluate(subject.into());
        self.record(result)
    }

    /// Records an externally produced result. Returns whether it passed.
    pub fn record(&mut self, result: AssertionResult) -> bool {
        let passed = result.passed;
        self.results.push(result);
        passed
    }

    /// Number of recorded assertions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Returns true if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Number of failed assertions so far.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.results.iter().filter(|r| !r.passed).count()
    }

    /// Closes the unit.
    #[must_use]
    pub fn finish(self) -> TestResults {
        let duration_ms = u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX);
        TestResults::new(self.name, self.results, duration_ms)
    }
}

/// Results from a closed scoped unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResults {
    /// Name of the unit that was run.
    pub suite_name: String,
    /// Individual assertion results.
    pub results: Vec<AssertionResult>,
    /// Total number of assertions.
    pub total: usize,
    /// Number of passed assertions.
    pub passed: usize,
    /// Number of failed assertions.
    pub failed: usize,
    /// Execution time in milliseconds.
    pub duration_ms: u64,
}

impl TestResults {
    /// Create new test results.
    #[must_use]
    pub fn new(
        suite_name: impl Into<String>,
        results: Vec<AssertionResult>,
        duration_ms: u64,
    ) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|r| r.passed).count();
        let failed = total - passed;

        Self {
            suite_name: suite_name.into(),
            results,
            total,
            passed,
            failed,
            duration_ms,
        }
    }

    /// Check if all tests passed.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Iterates over the failed results.
    pub fn failures(&self) -> impl Iterator<Item = &AssertionResult> {
        self.results.iter().filter(|r| !r.passed)
    }

    /// Reports every collected failure at once.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::SoftAssertionsFailed`] listing each failure.
    pub fn into_result(self) -> DomainResult<Self> {
        if self.all_passed() {
            return Ok(self);
        }
        let details = self
            .failures()
            .map(|r| format!("  - {}", r.summary()))
            .collect::<Vec<_>>()
            .join("\n");
        Err(DomainError::SoftAssertionsFailed {
            suite: self.suite_name,
            failed: self.failed,
            total: self.total,
            details,
        })
    }
}
