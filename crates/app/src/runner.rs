//! Suite runner.
//!
//! Runs catalog scenarios one after another and aggregates their outcomes
//! into a [`SuiteReport`].

use std::fmt;

use authprobe_application::{ApplicationError, LoginService, UpdatePasswordService};
use authprobe_domain::{SoftAssertions, TestResults};
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::scenarios::{Endpoint, Scenario};

/// Which endpoints to exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SuiteSelection {
    /// Both endpoints.
    #[default]
    All,
    /// Login endpoint only.
    Login,
    /// Password update endpoint only.
    #[value(alias = "update_password")]
    UpdatePassword,
}

impl SuiteSelection {
    /// Returns true if `endpoint` is selected.
    #[must_use]
    pub const fn includes(self, endpoint: Endpoint) -> bool {
        matches!(
            (self, endpoint),
            (Self::All, _)
                | (Self::Login, Endpoint::Login)
                | (Self::UpdatePassword, Endpoint::UpdatePassword)
        )
    }
}

/// Reason a scenario stopped before finishing.
#[derive(Debug, Error)]
pub enum RunError {
    /// The runner has no service for the scenario's endpoint.
    #[error("{0} service is not configured")]
    ServiceNotConfigured(Endpoint),

    /// The scenario raised.
    #[error(transparent)]
    Application(#[from] ApplicationError),
}

/// How a scenario ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", content = "reason", rename_all = "snake_case")]
pub enum Verdict {
    /// Every check held.
    Passed,
    /// Ran to completion with soft failures.
    Failed,
    /// Stopped by a hard failure.
    Aborted(String),
}

/// Result of one scenario.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioOutcome {
    /// Scenario that ran.
    pub scenario: Scenario,
    /// How it ended.
    #[serde(flatten)]
    pub verdict: Verdict,
    /// Soft checks recorded before it ended.
    pub results: TestResults,
}

impl ScenarioOutcome {
    /// Returns true for [`Verdict::Passed`].
    #[must_use]
    pub fn passed(&self) -> bool {
        self.verdict == Verdict::Passed
    }

    /// Multi-line explanation of a non-passing outcome.
    #[must_use]
    pub fn failure_report(&self) -> Option<String> {
        match &self.verdict {
            Verdict::Passed => None,
            Verdict::Aborted(reason) => Some(reason.clone()),
            Verdict::Failed => self.results.clone().into_result().err().map(|e| e.to_string()),
        }
    }
}

/// Aggregated outcome of a run.
#[derive(Debug, Clone, Serialize)]
pub struct SuiteReport {
    /// Identifier of this run.
    pub run_id: Uuid,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// When the run finished.
    pub finished_at: DateTime<Utc>,
    /// Per-scenario outcomes in execution order.
    pub outcomes: Vec<ScenarioOutcome>,
}

impl SuiteReport {
    /// Number of scenarios run.
    #[must_use]
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of passed scenarios.
    #[must_use]
    pub fn passed(&self) -> usize {
        self.count(|v| matches!(v, Verdict::Passed))
    }

    /// Number of scenarios with soft failures.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.count(|v| matches!(v, Verdict::Failed))
    }

    /// Number of aborted scenarios.
    #[must_use]
    pub fn aborted(&self) -> usize {
        self.count(|v| matches!(v, Verdict::Aborted(_)))
    }

    /// Returns true if every scenario passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.outcomes.iter().all(ScenarioOutcome::passed)
    }

    /// Outcome of `scenario`, if it ran.
    #[must_use]
    pub fn outcome(&self, scenario: Scenario) -> Option<&ScenarioOutcome> {
        self.outcomes.iter().find(|o| o.scenario == scenario)
    }

    fn count(&self, predicate: impl Fn(&Verdict) -> bool) -> usize {
        self.outcomes.iter().filter(|o| predicate(&o.verdict)).count()
    }
}

impl fmt::Display for SuiteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "run {} started {}", self.run_id, self.started_at.to_rfc3339())?;
        for outcome in &self.outcomes {
            let label = match outcome.verdict {
                Verdict::Passed => "PASS",
                Verdict::Failed => "FAIL",
                Verdict::Aborted(_) => "ABORT",
            };
            writeln!(
                f,
                "{label:<5} {} ({}): {}",
                outcome.scenario,
                outcome.scenario.group(),
                outcome.scenario.description()
            )?;
            if let Some(report) = outcome.failure_report() {
                for line in report.lines() {
                    writeln!(f, "      {line}")?;
                }
            }
        }
        write!(
            f,
            "{} scenarios: {} passed, {} failed, {} aborted",
            self.total(),
            self.passed(),
            self.failed(),
            self.aborted()
        )
    }
}

/// Runs scenarios against the configured services.
#[derive(Debug, Clone, Default)]
pub struct SuiteRunner {
    login: Option<LoginService>,
    update_password: Option<UpdatePasswordService>,
    stop_on_failure: bool,
}

impl SuiteRunner {
    /// Creates a runner without services.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the login service.
    #[must_use]
    pub fn with_login(mut self, service: LoginService) -> Self {
        self.login = Some(service);
        self
    }

    /// Sets the password update service.
    #[must_use]
    pub fn with_update_password(mut self, service: UpdatePasswordService) -> Self {
        self.update_password = Some(service);
        self
    }

    /// Set whether to stop after the first scenario that does not pass.
    #[must_use]
    pub const fn with_stop_on_failure(mut self, stop: bool) -> Self {
        self.stop_on_failure = stop;
        self
    }

    /// Scenarios of `selection` whose service is configured.
    #[must_use]
    pub fn scenarios(&self, selection: SuiteSelection) -> Vec<Scenario> {
        Scenario::all()
            .filter(|s| selection.includes(s.endpoint()))
            .filter(|s| match s.endpoint() {
                Endpoint::Login => self.login.is_some(),
                Endpoint::UpdatePassword => self.update_password.is_some(),
            })
            .collect()
    }

    /// Runs a single scenario in a fresh soft-assertion unit.
    pub async fn run_scenario(&self, scenario: Scenario) -> ScenarioOutcome {
        let mut soft = SoftAssertions::new(scenario.id());
        let result: Result<(), RunError> = match scenario {
            Scenario::Login(s) => match &self.login {
                Some(service) => s.run(service, &mut soft).await.map_err(RunError::from),
                None => Err(RunError::ServiceNotConfigured(Endpoint::Login)),
            },
            Scenario::UpdatePassword(s) => match &self.update_password {
                Some(service) => s.run(service, &mut soft).await.map_err(RunError::from),
                None => Err(RunError::ServiceNotConfigured(Endpoint::UpdatePassword)),
            },
        };

        let results = soft.finish();
        let verdict = match result {
            Err(err) => {
                warn!(scenario = %scenario, error = %err, "scenario aborted");
                Verdict::Aborted(err.to_string())
            }
            Ok(()) if results.all_passed() => Verdict::Passed,
            Ok(()) => {
                warn!(scenario = %scenario, failed = results.failed, total = results.total, "scenario failed");
                Verdict::Failed
            }
        };
        info!(scenario = %scenario, ?verdict, duration_ms = results.duration_ms, "scenario finished");

        ScenarioOutcome {
            scenario,
            verdict,
            results,
        }
    }

    /// Runs every scenario of `selection` in catalog order.
    pub async fn run(&self, selection: SuiteSelection) -> SuiteReport {
        let run_id = Uuid::now_v7();
        let started_at = Utc::now();
        info!(%run_id, ?selection, "starting suite");

        let mut outcomes = Vec::new();
        for scenario in self.scenarios(selection) {
            let outcome = self.run_scenario(scenario).await;
            let stop = self.stop_on_failure && !outcome.passed();
            outcomes.push(outcome);
            if stop {
                break;
            }
        }

        SuiteReport {
            run_id,
            started_at,
            finished_at: Utc::now(),
            outcomes,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::scenarios::{LoginScenario, UpdatePasswordScenario};
    use authprobe_domain::{Assertion, AssertionResult};
    use pretty_assertions::assert_eq;

    fn outcome(scenario: Scenario, verdict: Verdict, results: Vec<AssertionResult>) -> ScenarioOutcome {
        ScenarioOutcome {
            scenario,
            verdict,
            results: TestResults::new(scenario.id(), results, 1),
        }
    }

    #[test]
    fn test_suite_selection_names() {
        assert_eq!(SuiteSelection::from_str("all", false), Ok(SuiteSelection::All));
        assert_eq!(SuiteSelection::from_str("LOGIN", true), Ok(SuiteSelection::Login));
        assert_eq!(
            SuiteSelection::from_str("update-password", false),
            Ok(SuiteSelection::UpdatePassword)
        );
        assert_eq!(
            SuiteSelection::from_str("update_password", false),
            Ok(SuiteSelection::UpdatePassword)
        );
        assert!(SuiteSelection::from_str("logout", true).is_err());
    }

    #[test]
    fn test_selection_includes() {
        assert!(SuiteSelection::All.includes(Endpoint::Login));
        assert!(SuiteSelection::Login.includes(Endpoint::Login));
        assert!(!SuiteSelection::Login.includes(Endpoint::UpdatePassword));
    }

    #[test]
    fn test_no_services_no_scenarios() {
        assert!(SuiteRunner::new().scenarios(SuiteSelection::All).is_empty());
    }

    #[tokio::test]
    async fn test_unconfigured_service_aborts() {
        let outcome = SuiteRunner::new()
            .run_scenario(Scenario::Login(LoginScenario::StatusCode))
            .await;
        assert_eq!(
            outcome.verdict,
            Verdict::Aborted("login service is not configured".to_string())
        );

        let outcome = SuiteRunner::new()
            .run_scenario(Scenario::UpdatePassword(UpdatePasswordScenario::ValidCredentials))
            .await;
        assert_eq!(
            outcome.verdict,
            Verdict::Aborted("update-password service is not configured".to_string())
        );
    }

    #[test]
    fn test_report_counts_and_display() {
        let passed = Scenario::Login(LoginScenario::StatusCode);
        let failed = Scenario::UpdatePassword(UpdatePasswordScenario::NoCaching);
        let aborted = Scenario::UpdatePassword(UpdatePasswordScenario::EmptyBody);
        let report = SuiteReport {
            run_id: Uuid::now_v7(),
            started_at: Utc::now(),
            finished_at: Utc::now(),
            outcomes: vec![
                outcome(passed, Verdict::Passed, vec![AssertionResult::pass(Assertion::status(200))]),
                outcome(
                    failed,
                    Verdict::Failed,
                    vec![AssertionResult::fail(
                        Assertion::HeaderAbsent {
                            name: "server".to_string(),
                        },
                        "Header 'server' should not be sent",
                    )],
                ),
                outcome(aborted, Verdict::Aborted("Error response is null or undefined".to_string()), vec![]),
            ],
        };

        assert_eq!(
            (report.total(), report.passed(), report.failed(), report.aborted()),
            (3, 1, 1, 1)
        );
        assert!(!report.all_passed());
        assert!(report.outcome(passed).unwrap().passed());

        let text = report.to_string();
        assert!(text.contains("PASS  login/status-code (positive)"));
        assert!(text.contains("FAIL  update-password/no-caching (security)"));
        assert!(text.contains("Header 'server' should not be sent"));
        assert!(text.contains("ABORT update-password/empty-body (negative)"));
        assert!(text.ends_with("3 scenarios: 1 passed, 1 failed, 1 aborted"));
    }

    #[test]
    fn test_report_serializes_verdicts() {
        let report = SuiteReport {
            run_id: Uuid::now_v7(),
            started_at: Utc::now(),
            finished_at: Utc::now(),
            outcomes: vec![outcome(
                Scenario::Login(LoginScenario::InvalidToken),
                Verdict::Aborted("boom".to_string()),
                vec![],
            )],
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["outcomes"][0]["scenario"], "login/invalid-token");
        assert_eq!(value["outcomes"][0]["verdict"], "aborted");
        assert_eq!(value["outcomes"][0]["reason"], "boom");
    }
}
