//! Authprobe - end-to-end scenarios for the login and password update APIs
//!
//! This crate holds the literal fixtures, the scenario catalog and the suite
//! runner used by the `authprobe` binary and the integration tests.

pub mod cli;
pub mod fixtures;
pub mod runner;
pub mod scenarios;

pub use runner::{RunError, ScenarioOutcome, SuiteReport, SuiteRunner, SuiteSelection, Verdict};
pub use scenarios::{Endpoint, LoginScenario, Scenario, ScenarioGroup, UpdatePasswordScenario};
